use std::io::Write;

use anyhow::Result;
use cost_core::catalog::{Catalog, CatalogEntry, CatalogStore, ValueUnit};
use cost_core::input::parse_amount;
use cost_core::translate::Translate;

use super::user_error;
use crate::cli::CatalogCommands;

fn format_value(unit: ValueUnit, value: f64, t: &dyn Translate) -> String {
    match unit {
        ValueUnit::CurrencyPerKg => format!("{value:.2} {}/kg", t.text("units.currency")),
        ValueUnit::Watts => format!("{value:.0} W"),
    }
}

/// `printcost filament|printer|dryer ...`
pub fn run<T, S>(
    catalog: &mut Catalog<T, S>,
    action: &CatalogCommands,
    t: &dyn Translate,
    out: &mut dyn Write,
) -> Result<()>
where
    T: CatalogEntry,
    S: CatalogStore<T>,
{
    match action {
        CatalogCommands::List => {
            if catalog.is_empty() {
                writeln!(out, "{}", t.text("messages.info.catalog_empty"))?;
            }
            let width = catalog.list_names().iter().map(|n| n.chars().count()).max().unwrap_or(0);
            for entry in catalog.entries() {
                let value = format_value(T::UNIT, entry.value(), t);
                writeln!(out, "{:<width$}  {}", entry.name(), value)?;
            }
        }
        CatalogCommands::Add { name, value } => {
            let value = parse_amount(T::ATTRIBUTE, value).map_err(|e| user_error(e, t))?;
            catalog.try_add(name, value).map_err(|e| user_error(e, t))?;
            let key = format!("messages.success.{}_added", T::KIND);
            writeln!(out, "{}", t.translate(&key, &[("name", name.trim().to_string())]))?;
        }
        CatalogCommands::Remove { name } => {
            let removed = catalog.try_remove(name).map_err(|e| user_error(e, t))?;
            let key = format!("messages.success.{}_removed", T::KIND);
            writeln!(out, "{}", t.translate(&key, &[("name", removed.name().to_string())]))?;
        }
    }
    Ok(())
}
