//! # Cost Engine
//!
//! Pure functions turning a project's inputs into its cost breakdown.
//!
//! ## Cost Components
//!
//! - **Filament**: `(grams / 1000) * cost_per_kg`
//! - **Electricity**: `(watts / 1000) * hours * cost_per_kwh`, once for the
//!   printer and once for the dryer (dryer only when enabled)
//! - **Wear**: three additive parts, each with its own rate
//!   - mechanical: `filament_cost * 0.0001 * grams` (hotend, extruder)
//!   - time: `hours * 0.05` (motors, fans, bearings)
//!   - electronic: `electricity_cost * 0.005` (boards, PSU)
//!
//! Every guard returns 0 instead of failing, so the engine is total over its
//! numeric domain. NaN inputs fail the `> 0` guards and produce 0 as well.
//! No validation and no rounding happen here; callers run
//! [`crate::validation::validate_required_fields`] first.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::engine::{filament_cost, electricity_cost, automatic_wear_cost};
//!
//! let material = filament_cost(200.0, 17.0);
//! let power = electricity_cost(150.0, 5.0, 0.30);
//! let wear = automatic_wear_cost(200.0, 5.0, material, power);
//!
//! assert!((material - 3.4).abs() < 1e-9);
//! assert!((power - 0.225).abs() < 1e-9);
//! assert!((wear.total - 0.319125).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::project::{CostBreakdown, PrintProject, ProjectInputs};

/// Mechanical wear per gram, as a fraction of the filament cost
pub const MECHANICAL_WEAR_RATE_PER_GRAM: f64 = 0.0001;

/// Flat time-based wear per print hour
pub const TIME_WEAR_RATE_PER_HOUR: f64 = 0.05;

/// Electronic wear as a fraction of the electricity cost
pub const ELECTRONIC_WEAR_RATE: f64 = 0.005;

/// Rates for the three wear components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WearRates {
    pub mechanical_per_gram: f64,
    pub time_per_hour: f64,
    pub electronic_fraction: f64,
}

impl Default for WearRates {
    fn default() -> Self {
        WearRates {
            mechanical_per_gram: MECHANICAL_WEAR_RATE_PER_GRAM,
            time_per_hour: TIME_WEAR_RATE_PER_HOUR,
            electronic_fraction: ELECTRONIC_WEAR_RATE,
        }
    }
}

/// Wear cost split into its components. `total` is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WearCost {
    pub total: f64,
    pub mechanical: f64,
    pub time: f64,
    pub electronic: f64,
}

#[inline]
fn positive(value: f64) -> bool {
    value > 0.0
}

/// Material cost of a job. `amount_g` is the total for all models.
pub fn filament_cost(amount_g: f64, cost_per_kg: f64) -> f64 {
    if !positive(amount_g) || !positive(cost_per_kg) {
        return 0.0;
    }
    (amount_g / 1000.0) * cost_per_kg
}

/// Electricity cost of running one device for the given duration.
pub fn electricity_cost(power_watts: f64, duration_hours: f64, cost_per_kwh: f64) -> f64 {
    if !positive(power_watts) || !positive(duration_hours) || !positive(cost_per_kwh) {
        return 0.0;
    }
    (power_watts / 1000.0) * duration_hours * cost_per_kwh
}

/// Wear cost with the default rates.
pub fn automatic_wear_cost(
    filament_amount_g: f64,
    duration_hours: f64,
    filament_cost: f64,
    electricity_cost: f64,
) -> WearCost {
    automatic_wear_cost_with(
        &WearRates::default(),
        filament_amount_g,
        duration_hours,
        filament_cost,
        electricity_cost,
    )
}

/// Wear cost with explicit rates.
///
/// `electricity_cost` is the combined printer and dryer electricity.
pub fn automatic_wear_cost_with(
    rates: &WearRates,
    filament_amount_g: f64,
    duration_hours: f64,
    filament_cost: f64,
    electricity_cost: f64,
) -> WearCost {
    let mechanical = if positive(filament_amount_g) {
        filament_cost * rates.mechanical_per_gram * filament_amount_g
    } else {
        0.0
    };

    let time = if positive(duration_hours) {
        duration_hours * rates.time_per_hour
    } else {
        0.0
    };

    let electronic = if positive(electricity_cost) {
        electricity_cost * rates.electronic_fraction
    } else {
        0.0
    };

    WearCost {
        total: mechanical + time + electronic,
        mechanical,
        time,
        electronic,
    }
}

/// Compute every cost of a project with the default wear rates.
///
/// Returns the same project with its costs overwritten.
pub fn calculate_total_costs(project: PrintProject) -> PrintProject {
    calculate_total_costs_with(project, &WearRates::default())
}

/// Compute every cost of a project with explicit wear rates.
pub fn calculate_total_costs_with(mut project: PrintProject, rates: &WearRates) -> PrintProject {
    let costs = compute_breakdown(project.inputs(), rates);
    project.set_costs(costs);
    project
}

fn compute_breakdown(inputs: &ProjectInputs, rates: &WearRates) -> CostBreakdown {
    let material = filament_cost(inputs.filament_amount_grams, inputs.filament_cost_per_kg);

    let printer = electricity_cost(
        inputs.printer_power_watts,
        inputs.print_duration_hours,
        inputs.electricity_cost_per_kwh,
    );

    let dryer = if inputs.dryer_enabled {
        electricity_cost(
            inputs.dryer_power_watts,
            inputs.print_duration_hours,
            inputs.electricity_cost_per_kwh,
        )
    } else {
        0.0
    };

    let wear = automatic_wear_cost_with(
        rates,
        inputs.filament_amount_grams,
        inputs.print_duration_hours,
        material,
        printer + dryer,
    );

    CostBreakdown::new(material, printer, dryer, wear)
}
