//! Catalog persistence backends.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entries::CatalogEntry;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;

/// Where a catalog's entries live between runs.
pub trait CatalogStore<T: CatalogEntry> {
    /// Read all entries. `Ok(None)` means the resource does not exist yet.
    fn load(&self) -> CalcResult<Option<Vec<T>>>;

    /// Replace the stored entries with `entries`.
    fn save(&mut self, entries: &[T]) -> CalcResult<()>;
}

/// JSON file store: a pretty-printed array of entries.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCatalogStore { path: path.into() }
    }

    /// Store at the entry type's default file name inside `dir`.
    pub fn in_dir<T: CatalogEntry>(dir: &Path) -> Self {
        JsonCatalogStore::new(dir.join(T::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: CatalogEntry> CatalogStore<T> for JsonCatalogStore {
    fn load(&self) -> CalcResult<Option<Vec<T>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CalcError::file_error("read", self.path.display().to_string(), e.to_string())
        })?;

        let entries: Vec<T> = serde_json::from_str(&contents).map_err(|e| {
            CalcError::serialization(format!(
                "Invalid {} catalog in {}: {}",
                T::KIND,
                self.path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), count = entries.len(), "loaded {} catalog", T::KIND);
        Ok(Some(entries))
    }

    fn save(&mut self, entries: &[T]) -> CalcResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CalcError::serialization(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// In-process store. Nothing outlives the value.
///
/// `fail_saves` makes every save return a `FileError`, which lets callers
/// exercise the failure path without touching the filesystem.
#[derive(Debug, Clone)]
pub struct MemoryCatalogStore<T> {
    entries: Option<Vec<T>>,
    pub fail_saves: bool,
}

impl<T> MemoryCatalogStore<T> {
    /// An empty store (behaves like a missing file).
    pub fn new() -> Self {
        MemoryCatalogStore {
            entries: None,
            fail_saves: false,
        }
    }

    /// A store that already holds `entries`.
    pub fn with_entries(entries: Vec<T>) -> Self {
        MemoryCatalogStore {
            entries: Some(entries),
            fail_saves: false,
        }
    }

    /// What was last saved (or seeded).
    pub fn stored(&self) -> Option<&[T]> {
        self.entries.as_deref()
    }
}

impl<T> Default for MemoryCatalogStore<T> {
    fn default() -> Self {
        MemoryCatalogStore::new()
    }
}

impl<T: CatalogEntry> CatalogStore<T> for MemoryCatalogStore<T> {
    fn load(&self) -> CalcResult<Option<Vec<T>>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[T]) -> CalcResult<()> {
        if self.fail_saves {
            return Err(CalcError::file_error(
                "save",
                format!("memory:{}", T::KIND),
                "store is read-only",
            ));
        }
        self.entries = Some(entries.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FilamentType, PrinterType};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = JsonCatalogStore::in_dir::<FilamentType>(dir.path());
        let loaded: Option<Vec<FilamentType>> = store.load().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = JsonCatalogStore::in_dir::<PrinterType>(dir.path());
        assert!(store.path().ends_with("printers.json"));

        let printers = vec![
            PrinterType::new("Prusa MK4", 80.0),
            PrinterType::new("Voron 2.4", 350.0),
        ];
        store.save(printers.as_slice()).unwrap();

        let loaded: Vec<PrinterType> = store.load().unwrap().unwrap();
        assert_eq!(loaded, printers);
    }

    #[test]
    fn test_reads_legacy_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("printers.json");
        fs::write(&path, r#"[{"name": "Anycubic i3 Mega S", "power": 150.0}]"#).unwrap();

        let store = JsonCatalogStore::new(path.clone());
        let loaded: Vec<PrinterType> = store.load().unwrap().unwrap();
        assert_eq!(loaded[0].power_watts, 150.0);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filaments.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonCatalogStore::new(path.clone());
        let result: CalcResult<Option<Vec<FilamentType>>> = store.load();
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_memory_store_failure_toggle() {
        let mut store = MemoryCatalogStore::<FilamentType>::new();
        store.save(&[FilamentType::new("PLA", 10.0)]).unwrap();
        assert_eq!(store.stored().unwrap().len(), 1);

        store.fail_saves = true;
        assert!(store.save(&[]).is_err());
        assert_eq!(store.stored().unwrap().len(), 1);
    }
}
