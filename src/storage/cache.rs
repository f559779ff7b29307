use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::swapi::Snapshot;

const CACHE_FILE: &str = "api_data.json";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cached snapshot at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Stores the whole snapshot as a single JSON blob under a fixed file name.
pub struct SnapshotCache {
    pub base_path: PathBuf,
}

impl SnapshotCache {
    pub fn new(base_path: PathBuf) -> Result<Self, io::Error> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(CACHE_FILE)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let json = serde_json::to_vec_pretty(snapshot).map_err(CacheError::Serialize)?;

        let mut temp_file = NamedTempFile::new_in(&self.base_path)?;
        temp_file.write_all(&json)?;
        temp_file
            .persist(self.file_path())
            .map_err(|e| CacheError::Io(e.error))?;

        log::info!(
            "Cached {} characters to {}",
            snapshot.characters.len(),
            self.file_path().display()
        );
        Ok(())
    }

    /// `Ok(None)` when nothing has been cached yet.
    pub fn load(&self) -> Result<Option<Snapshot>, CacheError> {
        let path = self.file_path();
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|source| CacheError::Corrupt { path, source })
    }

    #[cfg(test)]
    pub fn clear(&self) -> Result<(), io::Error> {
        match fs::remove_file(self.file_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swapi::{Character, Planet, Species};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        Snapshot {
            characters: vec![Character {
                name: "Luke Skywalker".into(),
                homeworld: "https://swapi.dev/api/planets/1/".into(),
                species: vec![],
            }],
            planets: vec![Planet {
                name: "Tatooine".into(),
                url: "https://swapi.dev/api/planets/1/".into(),
            }],
            species: vec![Species {
                name: "Droid".into(),
                url: "https://swapi.dev/api/species/2/".into(),
            }],
        }
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().to_path_buf()).unwrap();
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn saved_snapshot_loads_back_equal() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().join("nested")).unwrap();
        let snapshot = sample();

        cache.save(&snapshot).unwrap();
        assert_eq!(cache.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn save_replaces_previous_blob() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().to_path_buf()).unwrap();

        cache.save(&sample()).unwrap();
        cache.save(&Snapshot::default()).unwrap();
        assert_eq!(cache.load().unwrap(), Some(Snapshot::default()));
    }

    #[test]
    fn corrupt_blob_is_reported() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().to_path_buf()).unwrap();
        fs::write(cache.file_path(), "{ not json").unwrap();

        assert!(matches!(cache.load(), Err(CacheError::Corrupt { .. })));
    }

    #[test]
    fn blob_without_record_urls_loads() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().to_path_buf()).unwrap();
        fs::write(
            cache.file_path(),
            r#"{"characters":[{"name":"Luke","homeworld":"https://swapi.dev/api/planets/1/","species":[]}],
                "planets":[{"name":"Tatooine"}],"species":[]}"#,
        )
        .unwrap();

        let snapshot = cache.load().unwrap().unwrap();
        assert_eq!(snapshot.planets[0].name, "Tatooine");
        assert!(snapshot.planets[0].url.is_empty());
    }

    #[test]
    fn clear_removes_blob() {
        let dir = TempDir::new().unwrap();
        let cache = SnapshotCache::new(dir.path().to_path_buf()).unwrap();
        cache.clear().unwrap();

        cache.save(&sample()).unwrap();
        cache.clear().unwrap();
        assert!(cache.load().unwrap().is_none());
    }
}
