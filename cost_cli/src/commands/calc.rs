use std::io::Write;

use anyhow::Result;
use cost_core::catalog::{Catalog, CatalogEntry, CatalogStore, Catalogs};
use cost_core::config::AppConfig;
use cost_core::engine::calculate_total_costs_with;
use cost_core::errors::{CalcError, CalcResult};
use cost_core::file_io::{save_project, with_project_extension};
use cost_core::input::{parse_amount, parse_model_count};
use cost_core::project::{PrintProject, ProjectInputs};
use cost_core::translate::Translate;
use cost_core::validation::ensure_valid;
use tracing::info;

use super::{print_report, user_error, Session};
use crate::cli::CalcArgs;

fn amount(field: &str, text: &Option<String>) -> CalcResult<f64> {
    parse_amount(field, text.as_deref().unwrap_or(""))
}

fn lookup<'a, T, S>(catalog: &'a Catalog<T, S>, name: &str) -> CalcResult<&'a T>
where
    T: CatalogEntry,
    S: CatalogStore<T>,
{
    catalog
        .find(name)
        .ok_or_else(|| CalcError::entry_not_found(T::KIND, name))
}

/// Fill project inputs from the command line.
///
/// A catalog name fills name and cost/power first; an explicit number then
/// overrides the catalog value.
pub fn build_project(
    args: &CalcArgs,
    catalogs: &Catalogs,
    config: &AppConfig,
) -> CalcResult<PrintProject> {
    let mut inputs = ProjectInputs {
        project_name: args.project_name.clone(),
        model_name: args.model_name.clone(),
        model_count: parse_model_count(args.model_count.as_deref().unwrap_or(""))?,
        print_duration_hours: amount("print_duration_hours", &args.hours)?,
        filament_amount_grams: amount("filament_amount_grams", &args.grams)?,
        electricity_cost_per_kwh: match &args.rate {
            Some(text) => parse_amount("electricity_cost_per_kwh", text)?,
            None => config.default_electricity_cost_per_kwh,
        },
        dryer_enabled: args.dryer_enabled(),
        ..ProjectInputs::default()
    };

    if let Some(name) = &args.filament {
        inputs.use_filament(lookup(&catalogs.filaments, name)?);
    }
    if args.cost_per_kg.is_some() {
        inputs.filament_cost_per_kg = amount("filament_cost_per_kg", &args.cost_per_kg)?;
    }

    if let Some(name) = &args.printer {
        inputs.use_printer(lookup(&catalogs.printers, name)?);
    }
    if args.printer_watts.is_some() {
        inputs.printer_power_watts = amount("printer_power_watts", &args.printer_watts)?;
    }

    if let Some(name) = &args.dryer {
        inputs.use_dryer(lookup(&catalogs.dryers, name)?);
    }
    if args.dryer_watts.is_some() {
        inputs.dryer_power_watts = amount("dryer_power_watts", &args.dryer_watts)?;
    }

    Ok(PrintProject::with_inputs(inputs))
}

/// `printcost calc`
pub fn run(session: &Session, args: &CalcArgs, out: &mut dyn Write) -> Result<()> {
    let t = &session.translator;
    let catalogs = Catalogs::open_in(&session.data_dir());

    let project = build_project(args, &catalogs, &session.config).map_err(|e| user_error(e, t))?;
    ensure_valid(&project).map_err(|e| user_error(e, t))?;
    let mut project = calculate_total_costs_with(project, &session.config.wear);

    let saved_to = args.save.as_deref().map(with_project_extension);
    if let Some(path) = &saved_to {
        save_project(&mut project, path).map_err(|e| user_error(e, t))?;
        info!(path = %path.display(), project = %project.inputs().project_name, "project saved");
    }

    print_report(&project, args.json, t, out)?;

    if let (Some(path), false) = (&saved_to, args.json) {
        writeln!(
            out,
            "\n{}",
            t.translate("messages.success.project_saved", &[("path", path.display().to_string())])
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, session};
    use cost_core::file_io::load_project;

    fn full_args() -> CalcArgs {
        CalcArgs {
            project_name: "Example".to_string(),
            model_name: "Benchy".to_string(),
            model_count: Some("4".to_string()),
            hours: Some("5".to_string()),
            filament: Some("eSun PLA+ Black".to_string()),
            grams: Some("200".to_string()),
            cost_per_kg: Some("17".to_string()),
            printer: Some("Anycubic i3 Mega S".to_string()),
            rate: Some("0,30".to_string()),
            ..CalcArgs::default()
        }
    }

    #[test]
    fn test_build_project_from_catalogs() {
        let (_dir, session) = session();
        let catalogs = session.open_catalogs().unwrap();

        let project = build_project(&full_args(), &catalogs, &session.config).unwrap();
        let inputs = project.inputs();
        assert_eq!(inputs.filament_name, "eSun PLA+ Black");
        assert_eq!(inputs.filament_cost_per_kg, 17.0);
        assert_eq!(inputs.printer_power_watts, 150.0);
        assert_eq!(inputs.electricity_cost_per_kwh, 0.30);
        assert_eq!(inputs.model_count, 4);
        assert!(!inputs.dryer_enabled);
    }

    #[test]
    fn test_rate_defaults_from_config() {
        let (_dir, session) = session();
        let catalogs = session.open_catalogs().unwrap();
        let args = CalcArgs {
            rate: None,
            ..full_args()
        };

        let project = build_project(&args, &catalogs, &session.config).unwrap();
        assert_eq!(
            project.inputs().electricity_cost_per_kwh,
            session.config.default_electricity_cost_per_kwh
        );
    }

    #[test]
    fn test_unknown_catalog_name() {
        let (_dir, session) = session();
        let catalogs = session.open_catalogs().unwrap();
        let args = CalcArgs {
            printer: Some("anycubic i3 mega s".to_string()),
            ..full_args()
        };

        let result = build_project(&args, &catalogs, &session.config);
        assert_eq!(result, Err(CalcError::entry_not_found("printer", "anycubic i3 mega s")));
    }

    #[test]
    fn test_run_prints_report_and_saves() {
        let (dir, session) = session();
        let path = dir.path().join("benchy.pcp");
        let args = CalcArgs {
            save: Some(path.clone()),
            ..full_args()
        };

        let mut out = Vec::new();
        run(&session, &args, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("Material costs"));
        assert!(text.contains("3.94"));
        assert!(text.contains(&path.display().to_string()));

        let saved = load_project(&path).unwrap();
        assert_eq!(saved.inputs().model_name, "Benchy");
        assert!(saved.is_calculated());
    }

    #[test]
    fn test_save_without_extension_adds_pcp() {
        let (dir, session) = session();
        let args = CalcArgs {
            save: Some(dir.path().join("benchy")),
            ..full_args()
        };

        let mut out = Vec::new();
        run(&session, &args, &mut out).unwrap();
        assert!(dir.path().join("benchy.pcp").exists());
        assert!(!dir.path().join("benchy").exists());
    }

    #[test]
    fn test_run_json_output() {
        let (_dir, session) = session();
        let args = CalcArgs {
            json: true,
            ..full_args()
        };

        let mut out = Vec::new();
        run(&session, &args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!((value["total_cost"].as_f64().unwrap() - 3.944125).abs() < 1e-9);
        assert_eq!(value["lines"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_run_reports_all_missing_fields() {
        let (_dir, session) = session();
        let mut out = Vec::new();

        let error = run(&session, &CalcArgs::default(), &mut out).unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with(&session.translator.text("messages.error.title")));
        // project, model, duration, amount, filament cost, printer power
        assert_eq!(message.lines().count(), 7);
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_number_rejected() {
        let (_dir, session) = session();
        let args = CalcArgs {
            grams: Some("lots".to_string()),
            ..full_args()
        };

        let mut out = Vec::new();
        assert!(run(&session, &args, &mut out).is_err());
    }
}
