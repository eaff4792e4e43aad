use std::io::Write;
use std::path::Path;

use anyhow::Result;
use cost_core::engine::calculate_total_costs_with;
use cost_core::file_io::{encode_project, load_project, save_project};
use cost_core::translate::Translate;
use cost_core::validation::ensure_valid;
use tracing::info;

use super::{print_report, user_error, Session};

/// `printcost project show`
pub fn show(session: &Session, file: &Path, json: bool, out: &mut dyn Write) -> Result<()> {
    let t = &session.translator;
    let project = load_project(file).map_err(|e| user_error(e, t))?;

    if json {
        writeln!(out, "{}", encode_project(&project).map_err(|e| user_error(e, t))?)?;
    } else if project.is_calculated() {
        print_report(&project, false, t, out)?;
    } else {
        writeln!(
            out,
            "{}: {}",
            t.text("pdf.parameters.project_name"),
            project.inputs().project_name
        )?;
        writeln!(out, "{}", t.text("gui.status.please_calculate"))?;
    }
    Ok(())
}

/// `printcost project recalc`: load, validate, calculate, save, print.
pub fn recalc(session: &Session, file: &Path, out: &mut dyn Write) -> Result<()> {
    let t = &session.translator;
    let project = load_project(file).map_err(|e| user_error(e, t))?;
    ensure_valid(&project).map_err(|e| user_error(e, t))?;

    let mut project = calculate_total_costs_with(project, &session.config.wear);
    save_project(&mut project, file).map_err(|e| user_error(e, t))?;
    info!(path = %file.display(), "project recalculated");

    print_report(&project, false, t, out)?;
    writeln!(
        out,
        "\n{}",
        t.translate("messages.success.project_saved", &[("path", file.display().to_string())])
    )?;
    Ok(())
}
