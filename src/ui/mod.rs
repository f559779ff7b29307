pub mod search_window;

pub use search_window::{ResultList, SearchWindowState, WindowAction};
