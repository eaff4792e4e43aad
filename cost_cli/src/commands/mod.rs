pub mod calc;
pub mod catalog;
pub mod config;
pub mod project;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use cost_core::catalog::Catalogs;
use cost_core::config::{AppConfig, CONFIG_FILE_NAME};
use cost_core::errors::CalcError;
use cost_core::project::PrintProject;
use cost_core::report::{build_report, ReportRenderer};
use cost_core::translate::Translate;

use crate::render::TextReportRenderer;
use crate::translations::Translator;

/// Message keys used by the command handlers.
#[cfg(test)]
pub const MESSAGE_KEYS: &[&str] = &[
    "messages.error.title",
    "messages.error.filament_exists",
    "messages.error.printer_exists",
    "messages.error.dryer_exists",
    "messages.error.filament_not_found",
    "messages.error.printer_not_found",
    "messages.error.dryer_not_found",
    "messages.error.invalid_input",
    "messages.success.filament_added",
    "messages.success.printer_added",
    "messages.success.dryer_added",
    "messages.success.filament_removed",
    "messages.success.printer_removed",
    "messages.success.dryer_removed",
    "messages.success.project_saved",
    "messages.success.language_set",
    "messages.info.catalog_empty",
    "gui.status.please_calculate",
];

/// State shared by every command of one run.
pub struct Session {
    pub config_path: PathBuf,
    pub config: AppConfig,
    pub translator: Translator,
}

impl Session {
    /// Load the config (defaults if the file is missing) and the translator.
    pub fn load(config_path: Option<PathBuf>, language: Option<&str>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let config = AppConfig::load(&config_path).with_context(|| {
            format!("failed to load configuration from {}", config_path.display())
        })?;
        let translator = Translator::load(language.unwrap_or(&config.language))?;

        Ok(Session {
            config_path,
            config,
            translator,
        })
    }

    /// Catalog directory; relative `data_dir` values are relative to the config file.
    pub fn data_dir(&self) -> PathBuf {
        let base = self.config_path.parent().unwrap_or_else(|| Path::new("."));
        self.config.catalogs_dir(base)
    }

    /// Open the catalogs, creating the data directory if needed.
    pub fn open_catalogs(&self) -> Result<Catalogs> {
        let dir = self.data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create data directory {}", dir.display()))?;
        Ok(Catalogs::open_in(&dir))
    }
}

/// User-facing text for a core error.
pub fn describe_error(error: &CalcError, t: &dyn Translate) -> String {
    match error {
        CalcError::ValidationFailed { issues } => {
            let mut text = t.text("messages.error.title");
            for issue in issues {
                text.push_str("\n  - ");
                text.push_str(&t.text(issue.message_key()));
            }
            text
        }
        CalcError::DuplicateName { catalog, name } => {
            t.translate(&format!("messages.error.{catalog}_exists"), &[("name", name.clone())])
        }
        CalcError::EntryNotFound { catalog, name } => {
            t.translate(&format!("messages.error.{catalog}_not_found"), &[("name", name.clone())])
        }
        CalcError::InvalidInput { field, value, .. } => t.translate(
            "messages.error.invalid_input",
            &[("field", field.clone()), ("value", value.clone())],
        ),
        CalcError::NotCalculated { .. } => t.text("gui.status.please_calculate"),
        other => other.to_string(),
    }
}

/// Wrap a core error so the translated description is shown first.
pub fn user_error(error: CalcError, t: &dyn Translate) -> anyhow::Error {
    let description = describe_error(&error, t);
    anyhow::Error::new(error).context(description)
}

/// Print a calculated project as a text report or as JSON.
pub fn print_report(
    project: &PrintProject,
    json: bool,
    t: &Translator,
    out: &mut dyn Write,
) -> Result<()> {
    let report = build_report(project).map_err(|e| user_error(e, t))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        let renderer =
            TextReportRenderer::with_date(Local::now().format("%Y-%m-%d %H:%M").to_string());
        out.write_all(&renderer.render(&report, t)?)?;
    }
    Ok(())
}
