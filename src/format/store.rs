//! Flat JSON annotation store.
//!
//! The whole store is one JSON object keyed by lowercase `#rrggbb` strings:
//!
//! ```json
//! {
//!     "#123456": {
//!         "name": "Sky",
//!         "tags": [
//!             "blue",
//!             "sky"
//!         ]
//!     }
//! }
//! ```
//!
//! The file is read once at startup and rewritten in full, with 4-space
//! indentation, after every change.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::error::StoreError;
use crate::color::Color;
use crate::model::AnnotationRecord;

/// Color → record mapping as held in memory.
pub type Records = BTreeMap<Color, AnnotationRecord>;

const INDENT: &[u8] = b"    ";

/// Serialize records the way they are written to disk.
pub fn to_json_pretty(records: &Records) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read every record from `path`. A missing file is an empty store.
pub fn load_records(path: &Path) -> Result<Records, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No store file at {:?}, starting empty", path);
            return Ok(Records::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    // Bytes, not a string: invalid UTF-8 is malformed content, not an I/O failure.
    serde_json::from_slice(&bytes).map_err(|e| StoreError::malformed(path, e))
}

/// Overwrite `path` with `records`.
pub fn save_records(path: &Path, records: &Records) -> Result<(), StoreError> {
    let json = to_json_pretty(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
    log::info!("Saved {} annotation(s) to {:?}", records.len(), path);
    Ok(())
}

/// In-memory annotation store bound to its backing file.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    path: PathBuf,
    records: Records,
}

impl AnnotationStore {
    /// Create an empty store without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Records::new(),
        }
    }

    /// Load the store at `path`, failing on unreadable content.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_records(&path)?;
        log::info!("Loaded {} annotation(s) from {:?}", records.len(), path);
        Ok(Self { path, records })
    }

    /// Load the store at `path`, starting empty if it cannot be read.
    ///
    /// The error, if any, is returned alongside the empty store so the caller
    /// can report it. A malformed file is copied to [`Self::backup_path`]
    /// first, since the next save overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let path = path.into();
        match Self::load(path.clone()) {
            Ok(store) => (store, None),
            Err(e) => {
                log::warn!("Annotation store unreadable, starting empty: {}", e);
                if e.is_malformed() {
                    let backup = Self::backup_path(&path);
                    match std::fs::copy(&path, &backup) {
                        Ok(_) => log::warn!("Copied unreadable store to {:?}", backup),
                        Err(copy_err) => {
                            log::warn!("Failed to back up {:?}: {}", path, copy_err)
                        }
                    }
                }
                (Self::new(path), Some(e))
            }
        }
    }

    /// Where an unreadable store file is preserved.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, color: Color) -> Option<&AnnotationRecord> {
        self.records.get(&color)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in color order.
    pub fn iter(&self) -> impl Iterator<Item = (&Color, &AnnotationRecord)> {
        self.records.iter()
    }

    /// Write the whole store to its file.
    pub fn save(&self) -> Result<(), StoreError> {
        save_records(&self.path, &self.records)
    }

    /// Assign a record to `color`, replacing any previous one, and persist.
    ///
    /// Returns the replaced record. If the write fails the in-memory store is
    /// left as it was before the call.
    pub fn set(
        &mut self,
        color: Color,
        record: AnnotationRecord,
    ) -> Result<Option<AnnotationRecord>, StoreError> {
        let previous = self.records.insert(color, record);
        if let Err(e) = self.save() {
            match previous {
                Some(prev) => self.records.insert(color, prev),
                None => self.records.remove(&color),
            };
            return Err(e);
        }
        if previous.is_some() {
            log::debug!("Overwrote annotation for {}", color);
        }
        Ok(previous)
    }

    /// The store as it appears on disk.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        to_json_pretty(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Per-test scratch directory, removed when dropped.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("hexspace-store-{}-{}", std::process::id(), name));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self) -> PathBuf {
            self.0.join("colors.json")
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let dir = TempDir::new("cleanup");
        let path = dir.path();
        AnnotationStore::new(&path)
            .set(Color::RED, AnnotationRecord::new("Red", vec![]))
            .unwrap();
        let root = dir.0.clone();
        assert!(path.exists());
        drop(dir);
        assert!(!root.exists());
    }

    fn sky() -> AnnotationRecord {
        AnnotationRecord::new("Sky", vec!["blue".into(), "sky".into()])
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new("missing");
        let path = dir.path();
        let store = AnnotationStore::load(&path).unwrap();
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_persists_immediately() {
        let dir = TempDir::new("set");
        let path = dir.path();
        let mut store = AnnotationStore::load(&path).unwrap();
        let color = Color::from_hex("#123456").unwrap();

        assert_eq!(store.set(color, sky()).unwrap(), None);

        let written = std::fs::read_to_string(&path).unwrap();
        let expected = "{\n    \"#123456\": {\n        \"name\": \"Sky\",\n        \"tags\": [\n            \"blue\",\n            \"sky\"\n        ]\n    }\n}";
        assert_eq!(written, expected);

        let reloaded = AnnotationStore::load(&path).unwrap();
        assert_eq!(reloaded.get(color), Some(&sky()));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new("overwrite");
        let path = dir.path();
        let mut store = AnnotationStore::new(&path);
        let color = Color::new(1, 2, 3);

        store.set(color, sky()).unwrap();
        let previous = store
            .set(color, AnnotationRecord::new("Navy", vec![]))
            .unwrap();

        assert_eq!(previous, Some(sky()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(color).unwrap().name, "Navy");
    }

    #[test]
    fn test_keys_are_lowercase() {
        let dir = TempDir::new("upper");
        let path = dir.path();
        std::fs::write(&path, r##"{"#ABCDEF": {"name": "x", "tags": []}}"##).unwrap();
        let store = AnnotationStore::load(&path).unwrap();
        store.save().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"#abcdef\""));
    }

    #[test]
    fn test_malformed_file_recovers_empty_with_backup() {
        let dir = TempDir::new("broken");
        let path = dir.path();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AnnotationStore::load(&path).unwrap_err().is_malformed());

        let (store, err) = AnnotationStore::open(&path);
        assert!(store.is_empty());
        assert!(err.unwrap().is_malformed());
        let backup = std::fs::read_to_string(AnnotationStore::backup_path(&path)).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[test]
    fn test_non_utf8_file_recovers_empty_with_backup() {
        let dir = TempDir::new("latin1");
        let path = dir.path();
        let original: &[u8] = b"{\"#123456\": {\"name\": \"Caf\xe9\", \"tags\": []}}";
        std::fs::write(&path, original).unwrap();

        let (mut store, err) = AnnotationStore::open(&path);
        assert!(store.is_empty());
        assert!(err.unwrap().is_malformed());

        store
            .set(Color::RED, AnnotationRecord::new("Red", vec![]))
            .unwrap();
        let backup = std::fs::read(AnnotationStore::backup_path(&path)).unwrap();
        assert_eq!(backup, original);
        assert!(std::fs::read_to_string(&path).unwrap().contains("#ff0000"));
    }

    #[test]
    fn test_bad_key_is_malformed() {
        let dir = TempDir::new("badkey");
        let path = dir.path();
        std::fs::write(&path, r#"{"red": {"name": "x", "tags": []}}"#).unwrap();
        assert!(AnnotationStore::load(&path).unwrap_err().is_malformed());
    }

    #[test]
    fn test_empty_store_json() {
        let store = AnnotationStore::new("unused.json");
        assert_eq!(store.to_json_pretty().unwrap(), "{}");
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            AnnotationStore::backup_path(Path::new("dir/colors.json")),
            PathBuf::from("dir/colors.json.bak")
        );
    }
}
