//! # Project Data Structures
//!
//! `PrintProject` is the aggregate for one costing job. It holds the user's
//! inputs, the costs computed from them, and two bookkeeping timestamps.
//!
//! ## Structure
//!
//! ```text
//! PrintProject
//! ├── inputs: ProjectInputs (names, amounts, powers, rates, dryer switch)
//! ├── costs: Option<CostBreakdown> (None until the engine runs)
//! └── created_at / modified_at (stamped by file_io on save)
//! ```
//!
//! Computed costs are cleared whenever inputs are edited through
//! [`PrintProject::inputs_mut`], so stale numbers can never be read back.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::engine::calculate_total_costs;
//! use cost_core::project::PrintProject;
//!
//! let mut project = PrintProject::new();
//! project.inputs_mut().filament_amount_grams = 200.0;
//! project.inputs_mut().filament_cost_per_kg = 17.0;
//! assert!(project.costs().is_none());
//!
//! let project = calculate_total_costs(project);
//! assert!((project.costs().unwrap().filament_cost - 3.4).abs() < 1e-9);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{DryerType, FilamentType, PrinterType};
use crate::engine::WearCost;
use crate::errors::{CalcError, CalcResult};

/// Everything the user enters for a costing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    pub project_name: String,
    pub model_name: String,
    /// Number of models printed in this job (>= 1)
    pub model_count: u32,
    pub print_duration_hours: f64,

    pub filament_name: String,
    /// Total filament for all models, in grams
    pub filament_amount_grams: f64,
    pub filament_cost_per_kg: f64,

    pub printer_name: String,
    pub printer_power_watts: f64,
    pub electricity_cost_per_kwh: f64,

    pub dryer_enabled: bool,
    pub dryer_name: String,
    pub dryer_power_watts: f64,
}

impl Default for ProjectInputs {
    fn default() -> Self {
        ProjectInputs {
            project_name: String::new(),
            model_name: String::new(),
            model_count: 1,
            print_duration_hours: 0.0,
            filament_name: String::new(),
            filament_amount_grams: 0.0,
            filament_cost_per_kg: 0.0,
            printer_name: String::new(),
            printer_power_watts: 0.0,
            electricity_cost_per_kwh: 0.0,
            dryer_enabled: false,
            dryer_name: String::new(),
            dryer_power_watts: 0.0,
        }
    }
}

impl ProjectInputs {
    /// Copy a filament's name and price into the inputs.
    pub fn use_filament(&mut self, filament: &FilamentType) {
        self.filament_name = filament.name.clone();
        self.filament_cost_per_kg = filament.cost_per_kg;
    }

    /// Copy a printer's name and power draw into the inputs.
    pub fn use_printer(&mut self, printer: &PrinterType) {
        self.printer_name = printer.name.clone();
        self.printer_power_watts = printer.power_watts;
    }

    /// Copy a dryer's name and power draw into the inputs.
    ///
    /// Does not toggle `dryer_enabled`.
    pub fn use_dryer(&mut self, dryer: &DryerType) {
        self.dryer_name = dryer.name.clone();
        self.dryer_power_watts = dryer.power_watts;
    }

    /// Check the value domains of every numeric input.
    ///
    /// This is a structural check (model_count >= 1, numbers finite and not
    /// negative), not the required-field check in [`crate::validation`].
    pub fn check_ranges(&self) -> CalcResult<()> {
        if self.model_count < 1 {
            return Err(CalcError::invalid_input(
                "model_count",
                self.model_count.to_string(),
                "Model count must be at least 1",
            ));
        }

        let numeric = [
            ("print_duration_hours", self.print_duration_hours),
            ("filament_amount_grams", self.filament_amount_grams),
            ("filament_cost_per_kg", self.filament_cost_per_kg),
            ("printer_power_watts", self.printer_power_watts),
            ("electricity_cost_per_kwh", self.electricity_cost_per_kwh),
            ("dryer_power_watts", self.dryer_power_watts),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must be a finite number",
                ));
            }
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Costs computed by the engine for one input set.
///
/// Invariants (to floating-point tolerance):
/// - `total_cost = filament_cost + electricity_cost_printer + electricity_cost_dryer + wear_cost`
/// - `wear_cost = mechanical_wear_cost + time_wear_cost + electronic_wear_cost`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub filament_cost: f64,
    pub electricity_cost_printer: f64,
    pub electricity_cost_dryer: f64,
    pub wear_cost: f64,
    pub mechanical_wear_cost: f64,
    pub time_wear_cost: f64,
    pub electronic_wear_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Assemble a breakdown, deriving `total_cost` from its parts.
    pub fn new(
        filament_cost: f64,
        electricity_cost_printer: f64,
        electricity_cost_dryer: f64,
        wear: WearCost,
    ) -> Self {
        CostBreakdown {
            filament_cost,
            electricity_cost_printer,
            electricity_cost_dryer,
            wear_cost: wear.total,
            mechanical_wear_cost: wear.mechanical,
            time_wear_cost: wear.time,
            electronic_wear_cost: wear.electronic,
            total_cost: filament_cost
                + electricity_cost_printer
                + electricity_cost_dryer
                + wear.total,
        }
    }

    /// Printer plus dryer electricity.
    pub fn electricity_cost(&self) -> f64 {
        self.electricity_cost_printer + self.electricity_cost_dryer
    }

    /// Check a breakdown that did not come from the engine.
    ///
    /// Every amount must be finite and non-negative (`InvalidInput`), and both
    /// sum invariants must hold to a relative tolerance (`SerializationError`).
    pub fn check_consistency(&self) -> CalcResult<()> {
        let amounts = [
            ("filament_cost", self.filament_cost),
            ("electricity_cost_printer", self.electricity_cost_printer),
            ("electricity_cost_dryer", self.electricity_cost_dryer),
            ("wear_cost", self.wear_cost),
            ("mechanical_wear_cost", self.mechanical_wear_cost),
            ("time_wear_cost", self.time_wear_cost),
            ("electronic_wear_cost", self.electronic_wear_cost),
            ("total_cost", self.total_cost),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Cost must be a finite, non-negative number",
                ));
            }
        }

        let wear_parts =
            self.mechanical_wear_cost + self.time_wear_cost + self.electronic_wear_cost;
        if !nearly_equal(self.wear_cost, wear_parts) {
            return Err(CalcError::serialization(format!(
                "wear_cost {} does not match the sum of its parts {}",
                self.wear_cost, wear_parts
            )));
        }

        let total_parts = self.filament_cost + self.electricity_cost() + self.wear_cost;
        if !nearly_equal(self.total_cost, total_parts) {
            return Err(CalcError::serialization(format!(
                "total_cost {} does not match the sum of its parts {}",
                self.total_cost, total_parts
            )));
        }
        Ok(())
    }
}

fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= SUM_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Relative tolerance for the stored cost sums
const SUM_TOLERANCE: f64 = 1e-9;

/// One 3D-printing cost estimate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintProject {
    inputs: ProjectInputs,
    costs: Option<CostBreakdown>,
    created_at: Option<DateTime<Utc>>,
    modified_at: Option<DateTime<Utc>>,
}

impl PrintProject {
    /// Create an empty project (model_count 1, everything else blank or zero).
    pub fn new() -> Self {
        PrintProject::default()
    }

    /// Create a project from a prepared input set.
    pub fn with_inputs(inputs: ProjectInputs) -> Self {
        PrintProject {
            inputs,
            ..PrintProject::default()
        }
    }

    pub fn inputs(&self) -> &ProjectInputs {
        &self.inputs
    }

    /// Mutable access to the inputs.
    ///
    /// Clears any computed costs: they no longer describe the input set.
    pub fn inputs_mut(&mut self) -> &mut ProjectInputs {
        self.costs = None;
        &mut self.inputs
    }

    /// Computed costs, or `None` if the engine has not run on the current inputs.
    pub fn costs(&self) -> Option<&CostBreakdown> {
        self.costs.as_ref()
    }

    /// Computed costs, or `NotCalculated`.
    pub fn require_costs(&self) -> CalcResult<&CostBreakdown> {
        self.costs.as_ref().ok_or_else(|| CalcError::NotCalculated {
            project_name: self.inputs.project_name.clone(),
        })
    }

    pub fn is_calculated(&self) -> bool {
        self.costs.is_some()
    }

    /// Total cost divided by the model count (a count of 0 is treated as 1).
    pub fn cost_per_model(&self) -> Option<f64> {
        self.costs
            .as_ref()
            .map(|costs| costs.total_cost / f64::from(self.inputs.model_count.max(1)))
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    pub(crate) fn set_costs(&mut self, costs: CostBreakdown) {
        self.costs = Some(costs);
    }

    /// Stamp the save time; the creation time is set only once.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.modified_at = Some(now);
    }

    pub(crate) fn from_parts(
        inputs: ProjectInputs,
        costs: Option<CostBreakdown>,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        PrintProject {
            inputs,
            costs,
            created_at: Some(created_at),
            modified_at: Some(modified_at),
        }
    }
}
