use eframe::egui;

use starsearch::app::StarSearchApp;
use starsearch::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Using {} (cache in {})", config.api_url, config.cache_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Star Search")
            .with_resizable(true)
            .with_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Star Search",
        options,
        Box::new(move |cc| Ok(Box::new(StarSearchApp::new(cc, &config)?))),
    )?;

    Ok(())
}
