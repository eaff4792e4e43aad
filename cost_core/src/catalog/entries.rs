//! Catalog entry types: filaments, printers and dryers.
//!
//! Each entry is a name plus one numeric attribute. On disk they serialize as
//! flat objects:
//!
//! ```json
//! { "name": "eSun PLA+ Black", "cost_per_kg": 16.99 }
//! { "name": "Anycubic i3 Mega S", "power_watts": 150.0 }
//! ```
//!
//! Printer and dryer files written by older versions used the key `power`;
//! it is accepted as an alias on read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Unit of a catalog entry's numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueUnit {
    /// Price per kilogram in the user's currency
    CurrencyPerKg,
    Watts,
}

/// Common shape of every catalog entry.
pub trait CatalogEntry: Clone + std::fmt::Debug + Serialize + DeserializeOwned {
    /// Catalog name used in errors and logs (e.g. "filament")
    const KIND: &'static str;

    /// Default file name inside the data directory
    const FILE_NAME: &'static str;

    /// Name of the numeric attribute, for error messages
    const ATTRIBUTE: &'static str;

    const UNIT: ValueUnit;

    fn new(name: impl Into<String>, value: f64) -> Self;

    fn name(&self) -> &str;

    /// The entry's numeric attribute (cost per kg or power in watts)
    fn value(&self) -> f64;

    /// Built-in entries used when the store holds nothing yet
    fn defaults() -> Vec<Self>;
}

/// A filament spool type and its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentType {
    pub name: String,
    pub cost_per_kg: f64,
}

/// A printer and its average power draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterType {
    pub name: String,
    #[serde(alias = "power")]
    pub power_watts: f64,
}

/// A filament dryer and its average power draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryerType {
    pub name: String,
    #[serde(alias = "power")]
    pub power_watts: f64,
}

impl CatalogEntry for FilamentType {
    const KIND: &'static str = "filament";
    const FILE_NAME: &'static str = "filaments.json";
    const ATTRIBUTE: &'static str = "cost_per_kg";
    const UNIT: ValueUnit = ValueUnit::CurrencyPerKg;

    fn new(name: impl Into<String>, cost_per_kg: f64) -> Self {
        FilamentType {
            name: name.into(),
            cost_per_kg,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.cost_per_kg
    }

    fn defaults() -> Vec<Self> {
        vec![FilamentType::new("eSun PLA+ Black", 16.99)]
    }
}

impl CatalogEntry for PrinterType {
    const KIND: &'static str = "printer";
    const FILE_NAME: &'static str = "printers.json";
    const ATTRIBUTE: &'static str = "power_watts";
    const UNIT: ValueUnit = ValueUnit::Watts;

    fn new(name: impl Into<String>, power_watts: f64) -> Self {
        PrinterType {
            name: name.into(),
            power_watts,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.power_watts
    }

    fn defaults() -> Vec<Self> {
        vec![PrinterType::new("Anycubic i3 Mega S", 150.0)]
    }
}

impl CatalogEntry for DryerType {
    const KIND: &'static str = "dryer";
    const FILE_NAME: &'static str = "dryers.json";
    const ATTRIBUTE: &'static str = "power_watts";
    const UNIT: ValueUnit = ValueUnit::Watts;

    fn new(name: impl Into<String>, power_watts: f64) -> Self {
        DryerType {
            name: name.into(),
            power_watts,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.power_watts
    }

    fn defaults() -> Vec<Self> {
        vec![DryerType::new("SUNLU S2", 48.0)]
    }
}
