//! # Required-Field Validation
//!
//! Checks a project's inputs before calculation. Every violated rule yields
//! one [`ValidationIssue`]; all issues are collected and returned together so
//! the caller can show them as a single report.
//!
//! ```rust
//! use cost_core::project::PrintProject;
//! use cost_core::validation::{validate_required_fields, ValidationIssue};
//!
//! let issues = validate_required_fields(&PrintProject::new());
//! assert_eq!(issues.len(), 7);
//! assert_eq!(issues[0], ValidationIssue::ProjectNameRequired);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::PrintProject;

/// One violated input rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationIssue {
    ProjectNameRequired,
    ModelNameRequired,
    PrintDurationInvalid,
    FilamentAmountInvalid,
    FilamentCostRequired,
    PrinterPowerRequired,
    ElectricityRateInvalid,
    /// Only reported when the dryer is enabled
    DryerPowerRequired,
}

impl ValidationIssue {
    /// Input field the issue concerns
    pub fn field(&self) -> &'static str {
        match self {
            ValidationIssue::ProjectNameRequired => "project_name",
            ValidationIssue::ModelNameRequired => "model_name",
            ValidationIssue::PrintDurationInvalid => "print_duration_hours",
            ValidationIssue::FilamentAmountInvalid => "filament_amount_grams",
            ValidationIssue::FilamentCostRequired => "filament_cost_per_kg",
            ValidationIssue::PrinterPowerRequired => "printer_power_watts",
            ValidationIssue::ElectricityRateInvalid => "electricity_cost_per_kwh",
            ValidationIssue::DryerPowerRequired => "dryer_power_watts",
        }
    }

    /// Translation key for the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationIssue::ProjectNameRequired => "messages.error.project_name_required",
            ValidationIssue::ModelNameRequired => "messages.error.model_name_required",
            ValidationIssue::PrintDurationInvalid => "messages.error.print_duration_invalid",
            ValidationIssue::FilamentAmountInvalid => "messages.error.filament_amount_invalid",
            ValidationIssue::FilamentCostRequired => "messages.error.cost_required",
            ValidationIssue::PrinterPowerRequired => "messages.error.power_required",
            ValidationIssue::ElectricityRateInvalid => "messages.error.electricity_rate_invalid",
            ValidationIssue::DryerPowerRequired => "messages.error.dryer_power_required",
        }
    }
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Collect every violated required-field rule, in a fixed order.
///
/// Whitespace-only names count as empty. Does not modify the project.
pub fn validate_required_fields(project: &PrintProject) -> Vec<ValidationIssue> {
    let inputs = project.inputs();
    let mut issues = Vec::new();

    if inputs.project_name.trim().is_empty() {
        issues.push(ValidationIssue::ProjectNameRequired);
    }
    if inputs.model_name.trim().is_empty() {
        issues.push(ValidationIssue::ModelNameRequired);
    }
    if !is_positive(inputs.print_duration_hours) {
        issues.push(ValidationIssue::PrintDurationInvalid);
    }
    if !is_positive(inputs.filament_amount_grams) {
        issues.push(ValidationIssue::FilamentAmountInvalid);
    }
    if !is_positive(inputs.filament_cost_per_kg) {
        issues.push(ValidationIssue::FilamentCostRequired);
    }
    if !is_positive(inputs.printer_power_watts) {
        issues.push(ValidationIssue::PrinterPowerRequired);
    }
    if !is_positive(inputs.electricity_cost_per_kwh) {
        issues.push(ValidationIssue::ElectricityRateInvalid);
    }
    if inputs.dryer_enabled && !is_positive(inputs.dryer_power_watts) {
        issues.push(ValidationIssue::DryerPowerRequired);
    }

    issues
}

/// `Ok` if no rule is violated, otherwise one `ValidationFailed` with all issues.
pub fn ensure_valid(project: &PrintProject) -> CalcResult<()> {
    let issues = validate_required_fields(project);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CalcError::ValidationFailed { issues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectInputs;

    fn valid_project() -> PrintProject {
        PrintProject::with_inputs(ProjectInputs {
            project_name: "Gears".to_string(),
            model_name: "gear_20t".to_string(),
            print_duration_hours: 2.5,
            filament_amount_grams: 45.0,
            filament_cost_per_kg: 24.0,
            printer_power_watts: 120.0,
            electricity_cost_per_kwh: 0.35,
            ..ProjectInputs::default()
        })
    }

    #[test]
    fn test_valid_project_has_no_issues() {
        assert!(validate_required_fields(&valid_project()).is_empty());
        assert!(ensure_valid(&valid_project()).is_ok());
    }

    #[test]
    fn test_all_issues_collected_in_order() {
        let mut project = PrintProject::new();
        project.inputs_mut().dryer_enabled = true;

        let issues = validate_required_fields(&project);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::ProjectNameRequired,
                ValidationIssue::ModelNameRequired,
                ValidationIssue::PrintDurationInvalid,
                ValidationIssue::FilamentAmountInvalid,
                ValidationIssue::FilamentCostRequired,
                ValidationIssue::PrinterPowerRequired,
                ValidationIssue::ElectricityRateInvalid,
                ValidationIssue::DryerPowerRequired,
            ]
        );
    }

    #[test]
    fn test_dryer_power_only_checked_when_enabled() {
        let mut project = valid_project();
        project.inputs_mut().dryer_power_watts = 0.0;
        assert!(validate_required_fields(&project).is_empty());

        project.inputs_mut().dryer_enabled = true;
        assert_eq!(validate_required_fields(&project), vec![ValidationIssue::DryerPowerRequired]);
    }

    #[test]
    fn test_whitespace_name_is_empty() {
        let mut project = valid_project();
        project.inputs_mut().model_name = "   ".to_string();
        assert_eq!(validate_required_fields(&project), vec![ValidationIssue::ModelNameRequired]);
    }

    #[test]
    fn test_validation_does_not_touch_costs() {
        let project = crate::engine::calculate_total_costs(valid_project());
        let _ = validate_required_fields(&project);
        assert!(project.is_calculated());
    }

    #[test]
    fn test_ensure_valid_batches_issues() {
        let mut project = valid_project();
        project.inputs_mut().project_name.clear();
        project.inputs_mut().electricity_cost_per_kwh = 0.0;

        match ensure_valid(&project) {
            Err(CalcError::ValidationFailed { issues }) => {
                assert_eq!(
                    issues,
                    vec![
                        ValidationIssue::ProjectNameRequired,
                        ValidationIssue::ElectricityRateInvalid
                    ]
                );
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_issue_metadata() {
        assert_eq!(ValidationIssue::FilamentCostRequired.field(), "filament_cost_per_kg");
        assert_eq!(
            ValidationIssue::PrinterPowerRequired.message_key(),
            "messages.error.power_required"
        );
    }
}
