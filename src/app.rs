use eframe::egui;

use crate::config::Config;
use crate::provider::DataProvider;
use crate::storage::SnapshotCache;
use crate::swapi::SwapiClient;
use crate::ui::{SearchWindowState, WindowAction};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not prepare cache directory {path}: {source}")]
    CacheDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct StarSearchApp {
    search_window: SearchWindowState,
    provider: DataProvider,
    client: SwapiClient,
}

impl StarSearchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Result<Self, AppError> {
        let cache = SnapshotCache::new(config.cache_dir.clone()).map_err(|source| AppError::CacheDir {
            path: config.cache_dir.clone(),
            source,
        })?;
        let client = SwapiClient::new(&config.api_url, config.timeout)?;

        let ctx = cc.egui_ctx.clone();
        let mut provider = DataProvider::new(cache).with_wakeup(move || ctx.request_repaint());
        let fetch_client = client.clone();
        provider.start(move || fetch_client.fetch_snapshot_blocking());

        Ok(Self {
            search_window: SearchWindowState::new(),
            provider,
            client,
        })
    }

    fn refresh(&mut self) {
        log::info!("Refreshing data");
        let fetch_client = self.client.clone();
        self.provider.refresh(move || fetch_client.fetch_snapshot_blocking());
    }
}

impl eframe::App for StarSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.provider.poll() {
            self.search_window.invalidate();
        }

        match self.search_window.show(ctx, &self.provider) {
            WindowAction::Refresh => self.refresh(),
            WindowAction::None => {}
        }
    }
}
