//! # Cost Report
//!
//! Turns a calculated [`PrintProject`] into a presentation-neutral
//! [`CostReport`]: the input snapshot, one line per cost component with its
//! share of the total, the wear split, the total and the cost per model.
//!
//! Labels are translation keys, not text. A [`ReportRenderer`] resolves them
//! through a [`Translate`] implementation and produces bytes in whatever
//! format it supports.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::engine::calculate_total_costs;
//! use cost_core::project::{PrintProject, ProjectInputs};
//! use cost_core::report::{build_report, keys};
//!
//! let project = calculate_total_costs(PrintProject::with_inputs(ProjectInputs {
//!     filament_amount_grams: 200.0,
//!     filament_cost_per_kg: 17.0,
//!     ..ProjectInputs::default()
//! }));
//!
//! // Material 3.40 plus mechanical wear 0.068; no time or electricity
//! let report = build_report(&project).unwrap();
//! assert_eq!(report.lines[0].key, keys::MATERIAL_COSTS);
//! assert!((report.total_cost - 3.468).abs() < 1e-9);
//! assert!((report.lines[0].share_percent - 3.4 / 3.468 * 100.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::project::{PrintProject, ProjectInputs};
use crate::translate::Translate;

/// Translation keys used for report labels.
pub mod keys {
    pub const TITLE: &str = "pdf.title";
    pub const PROJECT_INFO: &str = "pdf.project_info";
    pub const COST_BREAKDOWN: &str = "pdf.cost_breakdown";
    pub const COST_SUMMARY: &str = "pdf.cost_summary";

    pub const MATERIAL_COSTS: &str = "pdf.costs.material_costs";
    pub const ELECTRICITY_PRINTER: &str = "pdf.costs.electricity_printer";
    pub const ELECTRICITY_DRYER: &str = "pdf.costs.electricity_dryer";
    pub const WEAR_MAINTENANCE: &str = "pdf.costs.wear_maintenance";
    pub const MECHANICAL_WEAR: &str = "pdf.costs.mechanical_wear";
    pub const TIME_WEAR: &str = "pdf.costs.time_wear";
    pub const ELECTRONIC_WEAR: &str = "pdf.costs.electronic_wear";
    pub const TOTAL_COSTS: &str = "pdf.costs.total_costs";
    pub const COST_PER_MODEL: &str = "pdf.costs.cost_per_model";
    pub const PERCENTAGE_OF_TOTAL: &str = "pdf.costs.percentage_of_total";
}

/// One labelled amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    /// Translation key of the label
    pub key: String,
    pub amount: f64,
    /// Share of the total cost, 0-100. Zero when the total is zero.
    pub share_percent: f64,
}

impl CostLine {
    fn new(key: &str, amount: f64, total: f64) -> Self {
        CostLine {
            key: key.to_string(),
            amount,
            share_percent: share_of(amount, total),
        }
    }
}

/// Everything a renderer needs to present one calculated project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub inputs: ProjectInputs,
    /// Material, printer electricity, dryer electricity (when enabled), wear
    pub lines: Vec<CostLine>,
    /// Mechanical, time and electronic wear. Shares are relative to the total cost.
    pub wear_lines: Vec<CostLine>,
    pub total_cost: f64,
    pub cost_per_model: f64,
}

fn share_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}

/// Build the report for a calculated project.
///
/// Fails with `NotCalculated` if the engine has not run on the current inputs.
pub fn build_report(project: &PrintProject) -> CalcResult<CostReport> {
    let costs = project.require_costs()?;
    let inputs = project.inputs();
    let total = costs.total_cost;

    let mut lines = vec![
        CostLine::new(keys::MATERIAL_COSTS, costs.filament_cost, total),
        CostLine::new(keys::ELECTRICITY_PRINTER, costs.electricity_cost_printer, total),
    ];
    if inputs.dryer_enabled {
        lines.push(CostLine::new(keys::ELECTRICITY_DRYER, costs.electricity_cost_dryer, total));
    }
    lines.push(CostLine::new(keys::WEAR_MAINTENANCE, costs.wear_cost, total));

    let wear_lines = vec![
        CostLine::new(keys::MECHANICAL_WEAR, costs.mechanical_wear_cost, total),
        CostLine::new(keys::TIME_WEAR, costs.time_wear_cost, total),
        CostLine::new(keys::ELECTRONIC_WEAR, costs.electronic_wear_cost, total),
    ];

    Ok(CostReport {
        inputs: inputs.clone(),
        lines,
        wear_lines,
        total_cost: total,
        cost_per_model: total / f64::from(inputs.model_count.max(1)),
    })
}

/// Presents a [`CostReport`] in some output format.
pub trait ReportRenderer {
    /// Render the report, resolving labels through `translator`.
    fn render(&self, report: &CostReport, translator: &dyn Translate) -> CalcResult<Vec<u8>>;
}
