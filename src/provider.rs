use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::storage::SnapshotCache;
use crate::swapi::{FetchError, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Owns the snapshot the search window reads and decides whether it comes from
/// the cache or the network. Every replacement is written back to the cache.
pub struct DataProvider {
    snapshot: Snapshot,
    state: LoadState,
    cache: SnapshotCache,
    pending: Option<Receiver<Result<Snapshot, FetchError>>>,
    wakeup: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// Calls the wake-up hook when the fetch thread finishes, including by panic.
struct WakeOnDrop(Option<Arc<dyn Fn() + Send + Sync>>);

impl Drop for WakeOnDrop {
    fn drop(&mut self) {
        if let Some(wake) = &self.0 {
            wake();
        }
    }
}

impl DataProvider {
    pub fn new(cache: SnapshotCache) -> Self {
        Self {
            snapshot: Snapshot::default(),
            state: LoadState::Loading,
            cache,
            pending: None,
            wakeup: None,
        }
    }

    /// `wake` runs on the fetch thread once its result is ready for [`poll`](Self::poll).
    pub fn with_wakeup(mut self, wake: impl Fn() + Send + Sync + 'static) -> Self {
        self.wakeup = Some(Arc::new(wake));
        self
    }

    /// Uses the cached snapshot when there is one, otherwise runs `fetch` in the
    /// background. An unreadable cache counts as no cache.
    pub fn start<F>(&mut self, fetch: F)
    where
        F: FnOnce() -> Result<Snapshot, FetchError> + Send + 'static,
    {
        match self.cache.load() {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Loaded {} characters from {}",
                    snapshot.characters.len(),
                    self.cache.file_path().display()
                );
                self.snapshot = snapshot;
                self.state = LoadState::Ready;
            }
            Ok(None) => {
                log::info!("No cached snapshot, fetching");
                self.begin_fetch(fetch);
            }
            Err(e) => {
                log::warn!("Ignoring unreadable cache: {}", e);
                self.begin_fetch(fetch);
            }
        }
    }

    /// Refetches regardless of the cache. The current snapshot stays readable
    /// until the new one arrives.
    pub fn refresh<F>(&mut self, fetch: F)
    where
        F: FnOnce() -> Result<Snapshot, FetchError> + Send + 'static,
    {
        self.begin_fetch(fetch);
    }

    fn begin_fetch<F>(&mut self, fetch: F)
    where
        F: FnOnce() -> Result<Snapshot, FetchError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let wakeup = self.wakeup.clone();
        thread::spawn(move || {
            // Dropped after `tx`, so the result is already sent when it fires.
            let _wake = WakeOnDrop(wakeup);
            let tx = tx;
            // The receiver is gone if a newer fetch replaced this one.
            let _ = tx.send(fetch());
        });
        self.pending = Some(rx);
        self.state = LoadState::Loading;
    }

    /// Applies a finished background fetch, if any. Returns true when the
    /// snapshot or state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        };
        self.pending = None;

        match result {
            Ok(snapshot) => {
                self.set_snapshot(snapshot);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                log::error!("Failed to fetch data: {}", e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.state = LoadState::Loading;
        } else if self.state == LoadState::Loading {
            self.state = LoadState::Ready;
        }
    }

    /// Replaces the snapshot wholesale and persists it.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        if let Err(e) = self.cache.save(&self.snapshot) {
            log::error!("Failed to cache snapshot: {}", e);
        }
    }
}
