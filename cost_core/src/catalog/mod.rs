//! # Catalogs
//!
//! Named filament, printer and dryer entries the user picks from when
//! filling in a project.
//!
//! A [`Catalog`] is an ordered in-memory list over one entry type, backed by a
//! [`CatalogStore`]. Names are unique within a catalog, compared
//! case-insensitively; lookup by name is exact.
//!
//! ## Persistence failures
//!
//! Every mutation is saved immediately. If the save fails, the in-memory
//! change is rolled back, a warning is logged and the operation reports
//! failure, so memory and store never disagree.
//!
//! A store that exists but cannot be read is never written over. The catalog
//! shows the defaults, keeps the load error, and returns it from every
//! mutation until the store is repaired and the catalog reopened.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::catalog::{Catalog, FilamentType, MemoryCatalogStore};
//!
//! let mut filaments: Catalog<FilamentType, _> = Catalog::open(MemoryCatalogStore::new());
//! assert_eq!(filaments.list_names(), vec!["eSun PLA+ Black"]);
//!
//! assert!(filaments.add("PLA", 10.0));
//! assert!(!filaments.add("pla", 20.0)); // same name, different case
//! assert_eq!(filaments.find("PLA").unwrap().cost_per_kg, 10.0);
//! assert!(filaments.find("pla").is_none());
//! ```

pub mod entries;
pub mod store;

pub use entries::{CatalogEntry, DryerType, FilamentType, PrinterType, ValueUnit};
pub use store::{CatalogStore, JsonCatalogStore, MemoryCatalogStore};

use std::path::Path;

use tracing::{info, warn};

use crate::errors::{CalcError, CalcResult};

/// Ordered, name-unique collection of catalog entries.
#[derive(Debug)]
pub struct Catalog<T: CatalogEntry, S: CatalogStore<T>> {
    entries: Vec<T>,
    store: S,
    load_error: Option<CalcError>,
}

/// Filament catalog backed by `filaments.json`
pub type FilamentCatalog = Catalog<FilamentType, JsonCatalogStore>;
/// Printer catalog backed by `printers.json`
pub type PrinterCatalog = Catalog<PrinterType, JsonCatalogStore>;
/// Dryer catalog backed by `dryers.json`
pub type DryerCatalog = Catalog<DryerType, JsonCatalogStore>;

impl<T: CatalogEntry, S: CatalogStore<T>> Catalog<T, S> {
    /// Load a catalog from its store.
    ///
    /// A missing resource yields the built-in defaults. An unreadable or
    /// malformed one is logged and also yields the defaults, but the catalog
    /// becomes read-only so the store is left as it was.
    pub fn open(store: S) -> Self {
        let (entries, load_error) = match store.load() {
            Ok(Some(entries)) => (entries, None),
            Ok(None) => (T::defaults(), None),
            Err(e) => {
                warn!(
                    catalog = T::KIND,
                    error = %e,
                    "failed to load catalog, using defaults read-only"
                );
                (T::defaults(), Some(e))
            }
        };

        Catalog {
            entries,
            store,
            load_error,
        }
    }

    /// The error the store returned on open, if any. Mutations fail with it.
    pub fn load_error(&self) -> Option<&CalcError> {
        self.load_error.as_ref()
    }

    fn ensure_writable(&self) -> CalcResult<()> {
        match &self.load_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Entry names in stored order.
    pub fn list_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// True if an entry with this name exists, ignoring case.
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.entries.iter().any(|e| e.name().to_lowercase() == wanted)
    }

    /// Append a new entry and persist. Returns false on any failure.
    pub fn add(&mut self, name: &str, value: f64) -> bool {
        match self.try_add(name, value) {
            Ok(()) => true,
            Err(e) => {
                if e.is_persistence_error() {
                    warn!(catalog = T::KIND, name, error = %e, "add not saved");
                }
                false
            }
        }
    }

    /// Append a new entry and persist.
    ///
    /// Fails without mutating on a blank name, a non-positive or non-finite
    /// value, or a case-insensitive name collision. A failed save rolls the
    /// append back and returns the store's error. A catalog whose store
    /// failed to load returns that load error.
    pub fn try_add(&mut self, name: &str, value: f64) -> CalcResult<()> {
        self.ensure_writable()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CalcError::invalid_input("name", "", "Name must not be empty"));
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(
                T::ATTRIBUTE,
                value.to_string(),
                "Value must be positive",
            ));
        }
        if self.contains_ignore_case(name) {
            return Err(CalcError::duplicate_name(T::KIND, name));
        }

        self.entries.push(T::new(name, value));
        if let Err(e) = self.store.save(&self.entries) {
            self.entries.pop();
            return Err(e);
        }

        info!(catalog = T::KIND, name, value, "catalog entry added");
        Ok(())
    }

    /// Remove the entry with exactly this name and persist. Returns false on any failure.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.try_remove(name) {
            Ok(_) => true,
            Err(e) => {
                if e.is_persistence_error() {
                    warn!(catalog = T::KIND, name, error = %e, "remove not saved");
                }
                false
            }
        }
    }

    /// Remove the entry with exactly this name and persist, returning it.
    ///
    /// A failed save puts the entry back at its old position.
    pub fn try_remove(&mut self, name: &str) -> CalcResult<T> {
        self.ensure_writable()?;
        let index = self
            .entries
            .iter()
            .position(|e| e.name() == name)
            .ok_or_else(|| CalcError::entry_not_found(T::KIND, name))?;

        let removed = self.entries.remove(index);
        if let Err(e) = self.store.save(&self.entries) {
            self.entries.insert(index, removed);
            return Err(e);
        }

        info!(catalog = T::KIND, name, "catalog entry removed");
        Ok(removed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// The three catalogs of one data directory.
#[derive(Debug)]
pub struct Catalogs {
    pub filaments: FilamentCatalog,
    pub printers: PrinterCatalog,
    pub dryers: DryerCatalog,
}

impl Catalogs {
    /// Open `filaments.json`, `printers.json` and `dryers.json` in `dir`.
    pub fn open_in(dir: &Path) -> Self {
        Catalogs {
            filaments: Catalog::open(JsonCatalogStore::in_dir::<FilamentType>(dir)),
            printers: Catalog::open(JsonCatalogStore::in_dir::<PrinterType>(dir)),
            dryers: Catalog::open(JsonCatalogStore::in_dir::<DryerType>(dir)),
        }
    }
}
