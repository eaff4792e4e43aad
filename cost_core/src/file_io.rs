//! # File I/O Module
//!
//! Handles project and catalog file writes with safety features:
//! - **Atomic saves**: write to `.tmp`, fsync, rename, so an interrupted save
//!   never leaves a half-written file
//! - **Explicit schema**: projects are written through [`ProjectRecord`], a
//!   flat, versioned record whose keys are fixed independently of the
//!   in-memory types
//! - **Strict loads**: unknown keys, missing keys, a newer schema version or
//!   out-of-range values fail the load instead of defaulting
//!
//! ## File Format
//!
//! Projects are saved as pretty-printed JSON (`.pcp` by convention):
//!
//! ```json
//! {
//!   "schema_version": "0.1.0",
//!   "project_name": "Bracket",
//!   "model_name": "bracket_v2",
//!   "model_count": 4,
//!   "print_duration_hours": 5.0,
//!   ...
//!   "calculated": true,
//!   "filament_cost": 3.4,
//!   ...
//!   "created_at": "2025-03-01T10:00:00Z",
//!   "modified_at": "2025-03-01T10:05:00Z"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use cost_core::file_io::{save_project, load_project};
//! use cost_core::project::PrintProject;
//! use std::path::Path;
//!
//! let mut project = PrintProject::new();
//! save_project(&mut project, Path::new("job.pcp"))?;
//!
//! let loaded = load_project(Path::new("job.pcp"))?;
//! assert_eq!(loaded.inputs(), project.inputs());
//! # Ok::<(), cost_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{CostBreakdown, PrintProject, ProjectInputs};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Conventional extension for project files
pub const PROJECT_EXTENSION: &str = "pcp";

/// `path` with [`PROJECT_EXTENSION`] appended if it has no extension.
pub fn with_project_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PROJECT_EXTENSION)
    }
}

/// On-disk shape of a project. Every key is required.
///
/// When `calculated` is false the cost keys are written as 0 and ignored on
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    pub schema_version: String,

    pub project_name: String,
    pub model_name: String,
    pub model_count: u32,
    pub print_duration_hours: f64,
    pub filament_name: String,
    pub filament_amount_grams: f64,
    pub filament_cost_per_kg: f64,
    pub printer_name: String,
    pub printer_power_watts: f64,
    pub electricity_cost_per_kwh: f64,
    pub dryer_enabled: bool,
    pub dryer_name: String,
    pub dryer_power_watts: f64,

    pub calculated: bool,
    pub filament_cost: f64,
    pub electricity_cost_printer: f64,
    pub electricity_cost_dryer: f64,
    pub wear_cost: f64,
    pub mechanical_wear_cost: f64,
    pub time_wear_cost: f64,
    pub electronic_wear_cost: f64,
    pub total_cost: f64,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Snapshot a project. Missing timestamps are filled with `now`.
    pub fn from_project(project: &PrintProject, now: DateTime<Utc>) -> Self {
        let inputs = project.inputs().clone();
        let costs = project.costs().copied().unwrap_or_default();

        ProjectRecord {
            schema_version: SCHEMA_VERSION.to_string(),
            project_name: inputs.project_name,
            model_name: inputs.model_name,
            model_count: inputs.model_count,
            print_duration_hours: inputs.print_duration_hours,
            filament_name: inputs.filament_name,
            filament_amount_grams: inputs.filament_amount_grams,
            filament_cost_per_kg: inputs.filament_cost_per_kg,
            printer_name: inputs.printer_name,
            printer_power_watts: inputs.printer_power_watts,
            electricity_cost_per_kwh: inputs.electricity_cost_per_kwh,
            dryer_enabled: inputs.dryer_enabled,
            dryer_name: inputs.dryer_name,
            dryer_power_watts: inputs.dryer_power_watts,
            calculated: project.is_calculated(),
            filament_cost: costs.filament_cost,
            electricity_cost_printer: costs.electricity_cost_printer,
            electricity_cost_dryer: costs.electricity_cost_dryer,
            wear_cost: costs.wear_cost,
            mechanical_wear_cost: costs.mechanical_wear_cost,
            time_wear_cost: costs.time_wear_cost,
            electronic_wear_cost: costs.electronic_wear_cost,
            total_cost: costs.total_cost,
            created_at: project.created_at().unwrap_or(now),
            modified_at: project.modified_at().unwrap_or(now),
        }
    }

    /// Rebuild the project, checking version, value ranges and, for a
    /// calculated record, that the stored costs add up.
    pub fn into_project(self) -> CalcResult<PrintProject> {
        validate_version(&self.schema_version)?;

        let inputs = ProjectInputs {
            project_name: self.project_name,
            model_name: self.model_name,
            model_count: self.model_count,
            print_duration_hours: self.print_duration_hours,
            filament_name: self.filament_name,
            filament_amount_grams: self.filament_amount_grams,
            filament_cost_per_kg: self.filament_cost_per_kg,
            printer_name: self.printer_name,
            printer_power_watts: self.printer_power_watts,
            electricity_cost_per_kwh: self.electricity_cost_per_kwh,
            dryer_enabled: self.dryer_enabled,
            dryer_name: self.dryer_name,
            dryer_power_watts: self.dryer_power_watts,
        };
        inputs.check_ranges()?;

        let costs = if self.calculated {
            let costs = CostBreakdown {
                filament_cost: self.filament_cost,
                electricity_cost_printer: self.electricity_cost_printer,
                electricity_cost_dryer: self.electricity_cost_dryer,
                wear_cost: self.wear_cost,
                mechanical_wear_cost: self.mechanical_wear_cost,
                time_wear_cost: self.time_wear_cost,
                electronic_wear_cost: self.electronic_wear_cost,
                total_cost: self.total_cost,
            };
            costs.check_consistency()?;
            if !inputs.dryer_enabled && costs.electricity_cost_dryer != 0.0 {
                return Err(CalcError::serialization(
                    "electricity_cost_dryer must be 0 when the dryer is disabled",
                ));
            }
            Some(costs)
        } else {
            None
        };

        Ok(PrintProject::from_parts(inputs, costs, self.created_at, self.modified_at))
    }
}

/// Serialize a project to pretty JSON without touching its timestamps.
pub fn encode_project(project: &PrintProject) -> CalcResult<String> {
    let record = ProjectRecord::from_project(project, Utc::now());
    serde_json::to_string_pretty(&record).map_err(|e| CalcError::serialization(e.to_string()))
}

/// Parse a project from JSON produced by [`encode_project`] or [`save_project`].
pub fn decode_project(json: &str) -> CalcResult<PrintProject> {
    let record: ProjectRecord =
        serde_json::from_str(json).map_err(|e| CalcError::serialization(e.to_string()))?;
    record.into_project()
}

/// Write bytes to `path` atomically.
///
/// The save process:
/// 1. Write to a sibling temporary file (`<name>.<ext>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Save a project, stamping `modified_at` (and `created_at` on first save).
///
/// The timestamps are only updated on the in-memory project if the write
/// succeeds.
pub fn save_project(project: &mut PrintProject, path: &Path) -> CalcResult<()> {
    let mut stamped = project.clone();
    stamped.touch(Utc::now());

    let record = ProjectRecord::from_project(&stamped, Utc::now());
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())?;

    *project = stamped;
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(PrintProject)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON, unknown or missing keys
/// * `Err(CalcError::InvalidInput)` - A value is out of range
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<PrintProject> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let record: ProjectRecord = serde_json::from_str(&contents)
        .map_err(|e| {
            CalcError::serialization(format!("Invalid project file {}: {}", path.display(), e))
        })?;

    let project = record.into_project()?;
    debug!(path = %path.display(), project = %project.inputs().project_name, "project loaded");
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate_total_costs;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn calculated_project() -> PrintProject {
        calculate_total_costs(PrintProject::with_inputs(ProjectInputs {
            project_name: "Lamp shade".to_string(),
            model_name: "shade_v3".to_string(),
            model_count: 2,
            print_duration_hours: 11.75,
            filament_name: "eSun PLA+ Black".to_string(),
            filament_amount_grams: 312.4,
            filament_cost_per_kg: 16.99,
            printer_name: "Anycubic i3 Mega S".to_string(),
            printer_power_watts: 150.0,
            electricity_cost_per_kwh: 0.3187,
            dryer_enabled: true,
            dryer_name: "SUNLU S2".to_string(),
            dryer_power_watts: 48.0,
        }))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/a/job.pcp")), Path::new("/a/job.pcp.tmp"));
        assert_eq!(tmp_path_for(Path::new("/a/job")), Path::new("/a/job.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lamp.pcp");

        let mut project = calculated_project();
        save_project(&mut project, &path).unwrap();
        let loaded = load_project(&path).unwrap();

        assert_eq!(loaded.inputs(), project.inputs());
        let (a, b) = (loaded.costs().unwrap(), project.costs().unwrap());
        assert_relative_eq!(a.total_cost, b.total_cost, epsilon = 1e-12);
        assert_relative_eq!(a.wear_cost, b.wear_cost, epsilon = 1e-12);
        assert_relative_eq!(a.electricity_cost_dryer, b.electricity_cost_dryer, epsilon = 1e-12);
        assert_eq!(loaded.created_at(), project.created_at());
        assert_eq!(loaded.modified_at(), project.modified_at());
    }

    #[test]
    fn test_uncalculated_project_roundtrip() {
        let project = PrintProject::new();
        let loaded = decode_project(&encode_project(&project).unwrap()).unwrap();
        assert_eq!(loaded.inputs(), project.inputs());
        assert!(!loaded.is_calculated());
    }

    #[test]
    fn test_save_stamps_timestamps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stamp.pcp");

        let mut project = PrintProject::new();
        assert!(project.created_at().is_none());
        save_project(&mut project, &path).unwrap();

        let created = project.created_at().unwrap();
        assert!(project.modified_at().unwrap() >= created);

        save_project(&mut project, &path).unwrap();
        assert_eq!(project.created_at(), Some(created));
    }

    #[test]
    fn test_failed_save_leaves_project_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("x.pcp");

        let mut project = PrintProject::new();
        let result = save_project(&mut project, &path);
        assert!(matches!(result, Err(CalcError::FileError { .. })));
        assert!(project.created_at().is_none());
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.pcp");

        save_project(&mut PrintProject::new(), &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_unknown_key_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["wear_cost_percent"] = serde_json::json!(0.0);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_missing_key_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("electricity_cost_per_kwh");

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_out_of_range_value_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["filament_amount_grams"] = serde_json::json!(-1.0);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_negative_cost_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["wear_cost"] = serde_json::json!(-5.0);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_total_not_matching_parts_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["total_cost"] = serde_json::json!(999.0);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_wear_not_matching_parts_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let time_wear = value["time_wear_cost"].as_f64().unwrap();
        value["time_wear_cost"] = serde_json::json!(time_wear + 0.5);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_dryer_cost_with_dryer_disabled_fails() {
        let mut project = calculated_project();
        project.inputs_mut().dryer_enabled = false;
        let json = encode_project(&calculate_total_costs(project)).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // Shift printer electricity onto the disabled dryer; the sums still hold
        let printer = value["electricity_cost_printer"].as_f64().unwrap();
        value["electricity_cost_printer"] = serde_json::json!(0.0);
        value["electricity_cost_dryer"] = serde_json::json!(printer);

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_uncalculated_costs_are_ignored() {
        let json = encode_project(&PrintProject::new()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["total_cost"] = serde_json::json!(12.5);

        let loaded = decode_project(&value.to_string()).unwrap();
        assert!(!loaded.is_calculated());
    }

    #[test]
    fn test_project_extension_added_when_missing() {
        assert_eq!(with_project_extension(Path::new("/a/job")), Path::new("/a/job.pcp"));
        assert_eq!(with_project_extension(Path::new("/a/job.json")), Path::new("/a/job.json"));
    }

    #[test]
    fn test_zero_model_count_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["model_count"] = serde_json::json!(0);

        assert!(decode_project(&value.to_string()).is_err());
    }

    #[test]
    fn test_newer_schema_fails() {
        let json = encode_project(&calculated_project()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["schema_version"] = serde_json::json!("0.2.0");

        let result = decode_project(&value.to_string());
        assert!(matches!(result, Err(CalcError::VersionMismatch { .. })));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("latest").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_project(&dir.path().join("nope.pcp"));
        assert!(matches!(result, Err(CalcError::FileError { .. })));
    }

    #[test]
    fn test_record_keys() {
        let json = encode_project(&calculated_project()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "project_name",
            "model_count",
            "print_duration_hours",
            "filament_cost_per_kg",
            "dryer_power_watts",
            "electricity_cost_dryer",
            "mechanical_wear_cost",
            "total_cost",
            "created_at",
            "modified_at",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object.len(), 25);
    }
}
