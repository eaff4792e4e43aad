use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "printcost", version, about = "3D print cost calculator")]
pub struct Cli {
    /// Configuration file path [default: printcost.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Language for this run, overriding the configured one
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Calculate the cost of a print job
    Calc(CalcArgs),

    /// Work with saved project files
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },

    /// Manage the filament catalog
    Filament {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Manage the printer catalog
    Printer {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Manage the dryer catalog
    Dryer {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Inputs of a calculation. Numbers are kept as text so `,` decimals work.
#[derive(Args, Debug, Clone, Default)]
pub struct CalcArgs {
    #[arg(long, default_value = "")]
    pub project_name: String,

    #[arg(long, default_value = "")]
    pub model_name: String,

    /// Number of models printed in this job
    #[arg(long)]
    pub model_count: Option<String>,

    /// Print duration in hours
    #[arg(long)]
    pub hours: Option<String>,

    /// Filament catalog entry (fills name and cost per kg)
    #[arg(long)]
    pub filament: Option<String>,

    /// Filament used for all models, in grams
    #[arg(long)]
    pub grams: Option<String>,

    /// Filament cost per kg (overrides the catalog value)
    #[arg(long)]
    pub cost_per_kg: Option<String>,

    /// Printer catalog entry (fills name and power)
    #[arg(long)]
    pub printer: Option<String>,

    /// Printer power in watts (overrides the catalog value)
    #[arg(long)]
    pub printer_watts: Option<String>,

    /// Electricity rate per kWh [default: from config]
    #[arg(long)]
    pub rate: Option<String>,

    /// Dryer catalog entry; enables the dryer
    #[arg(long)]
    pub dryer: Option<String>,

    /// Dryer power in watts; enables the dryer
    #[arg(long)]
    pub dryer_watts: Option<String>,

    /// Save the calculated project to this file (`.pcp` is added if there is no extension)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalcArgs {
    pub fn dryer_enabled(&self) -> bool {
        self.dryer.is_some() || self.dryer_watts.is_some()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommands {
    /// Print a saved project
    Show {
        file: PathBuf,
        /// Print the project record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load, validate, recalculate and save a project
    Recalc { file: PathBuf },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// List entries in stored order
    List,

    /// Add an entry (cost per kg for filaments, watts for printers and dryers)
    Add { name: String, value: String },

    /// Remove the entry with exactly this name
    Remove { name: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Persist the preferred language
    SetLanguage { code: String },
}
