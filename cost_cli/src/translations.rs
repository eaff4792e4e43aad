//! Embedded translation tables.
//!
//! One JSON file per language under `translations/`, compiled into the
//! binary. Keys are dotted paths into the nested objects.

use anyhow::{Context, Result};
use cost_core::translate::{substitute, Translate};
use rust_embed::RustEmbed;
use serde_json::Value;
use tracing::warn;

#[derive(RustEmbed)]
#[folder = "translations/"]
struct Tables;

const FALLBACK_LANGUAGE: &str = "en";

/// Translator for one language, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    table: Value,
}

impl Translator {
    /// Load the table for `language`, falling back to English if it is not bundled.
    pub fn load(language: &str) -> Result<Self> {
        let language = if Tables::get(&format!("{language}.json")).is_some() {
            language
        } else {
            warn!(language, "no translation table, falling back to {}", FALLBACK_LANGUAGE);
            FALLBACK_LANGUAGE
        };

        let file = Tables::get(&format!("{language}.json"))
            .with_context(|| format!("translation table {language}.json is not embedded"))?;
        let table: Value = serde_json::from_slice(&file.data)
            .with_context(|| format!("translation table {language}.json is not valid JSON"))?;

        Ok(Translator {
            language: language.to_string(),
            table,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Language codes of every bundled table, sorted.
    pub fn available() -> Vec<String> {
        let mut codes: Vec<String> = Tables::iter()
            .filter_map(|name| name.strip_suffix(".json").map(str::to_string))
            .collect();
        codes.sort();
        codes
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.table, |node, part| node.get(part))
            .and_then(Value::as_str)
    }
}

impl Translate for Translator {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        match self.lookup(key) {
            Some(text) => substitute(text, params),
            None => format!("[{key}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_core::report::keys;
    use cost_core::validation::ValidationIssue;

    const ISSUES: [ValidationIssue; 8] = [
        ValidationIssue::ProjectNameRequired,
        ValidationIssue::ModelNameRequired,
        ValidationIssue::PrintDurationInvalid,
        ValidationIssue::FilamentAmountInvalid,
        ValidationIssue::FilamentCostRequired,
        ValidationIssue::PrinterPowerRequired,
        ValidationIssue::ElectricityRateInvalid,
        ValidationIssue::DryerPowerRequired,
    ];

    #[test]
    fn test_nested_lookup() {
        let en = Translator::load("en").unwrap();
        assert_eq!(en.text("pdf.costs.material_costs"), "Material costs");

        let de = Translator::load("de").unwrap();
        assert_eq!(de.text("pdf.costs.material_costs"), "Materialkosten");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let en = Translator::load("en").unwrap();
        assert_eq!(en.text("pdf.costs.nope"), "[pdf.costs.nope]");
        // A branch is not a text
        assert_eq!(en.text("pdf.costs"), "[pdf.costs]");
    }

    #[test]
    fn test_parameters_substituted() {
        let en = Translator::load("en").unwrap();
        let text = en.translate("messages.success.filament_added", &[("name", "PETG".to_string())]);
        assert_eq!(text, "Filament 'PETG' added.");
    }

    #[test]
    fn test_unknown_language_uses_english() {
        let t = Translator::load("fr").unwrap();
        assert_eq!(t.language(), "en");
    }

    #[test]
    fn test_bundled_languages() {
        assert_eq!(Translator::available(), vec!["de".to_string(), "en".to_string()]);
    }

    #[test]
    fn test_every_used_key_is_translated() {
        let report_keys = [
            keys::TITLE,
            keys::PROJECT_INFO,
            keys::COST_BREAKDOWN,
            keys::COST_SUMMARY,
            keys::MATERIAL_COSTS,
            keys::ELECTRICITY_PRINTER,
            keys::ELECTRICITY_DRYER,
            keys::WEAR_MAINTENANCE,
            keys::MECHANICAL_WEAR,
            keys::TIME_WEAR,
            keys::ELECTRONIC_WEAR,
            keys::TOTAL_COSTS,
            keys::COST_PER_MODEL,
            keys::PERCENTAGE_OF_TOTAL,
        ];

        for language in Translator::available() {
            let t = Translator::load(&language).unwrap();
            for key in report_keys
                .iter()
                .copied()
                .chain(ISSUES.iter().map(|i| i.message_key()))
                .chain(crate::render::LABEL_KEYS.iter().copied())
                .chain(crate::commands::MESSAGE_KEYS.iter().copied())
            {
                assert!(t.lookup(key).is_some(), "{language}: missing {key}");
            }
        }
    }
}
