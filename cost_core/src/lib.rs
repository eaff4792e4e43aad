//! # cost_core - 3D Print Cost Estimation Engine
//!
//! `cost_core` computes what a 3D print job costs: filament, printer and
//! dryer electricity, and machine wear. It also manages the filament, printer
//! and dryer catalogs and saves projects to disk. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure engine**: cost functions never fail and never log
//! - **Batched validation**: every missing field is reported at once
//! - **Rich Errors**: Structured error types, not just strings
//! - **No UI text**: labels are translation keys resolved by the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use cost_core::engine::calculate_total_costs;
//! use cost_core::project::{PrintProject, ProjectInputs};
//! use cost_core::validation::validate_required_fields;
//!
//! let project = PrintProject::with_inputs(ProjectInputs {
//!     project_name: "Example".to_string(),
//!     model_name: "Benchy".to_string(),
//!     print_duration_hours: 5.0,
//!     filament_amount_grams: 200.0,
//!     filament_cost_per_kg: 17.0,
//!     printer_power_watts: 150.0,
//!     electricity_cost_per_kwh: 0.30,
//!     ..ProjectInputs::default()
//! });
//! assert!(validate_required_fields(&project).is_empty());
//!
//! let project = calculate_total_costs(project);
//! assert!((project.costs().unwrap().total_cost - 3.944125).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project inputs, computed costs and timestamps
//! - [`engine`] - Cost formulas and wear rates
//! - [`validation`] - Required-field checks
//! - [`catalog`] - Filament, printer and dryer catalogs with pluggable stores
//! - [`input`] - Parsing of user-typed numbers
//! - [`report`] - Presentation-neutral cost report and renderer trait
//! - [`translate`] - Text lookup capability
//! - [`config`] - `printcost.toml` settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Project files with atomic saves

pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod file_io;
pub mod input;
pub mod project;
pub mod report;
pub mod translate;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use catalog::{
    Catalog, CatalogEntry, CatalogStore, Catalogs, DryerType, FilamentType, PrinterType,
};
pub use config::AppConfig;
pub use engine::{calculate_total_costs, calculate_total_costs_with, WearRates};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{CostBreakdown, PrintProject, ProjectInputs};
pub use report::{build_report, CostReport, ReportRenderer};
pub use translate::Translate;
pub use validation::{validate_required_fields, ValidationIssue};
