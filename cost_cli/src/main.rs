//! # printcost
//!
//! Command line front end for `cost_core`: calculates print costs, manages
//! the catalogs and project files, and renders translated text reports.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logger;
mod render;
mod translations;

use cli::{Cli, Commands, ConfigCommands, ProjectCommands};
use commands::Session;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_cli_logger(args.verbose);

    let session = Session::load(args.config.clone(), args.lang.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Commands::Calc(calc) => commands::calc::run(&session, calc, &mut out)?,
        Commands::Project { action } => match action {
            ProjectCommands::Show { file, json } => {
                commands::project::show(&session, file, *json, &mut out)?
            }
            ProjectCommands::Recalc { file } => {
                commands::project::recalc(&session, file, &mut out)?
            }
        },
        Commands::Filament { action } => {
            let mut catalogs = session.open_catalogs()?;
            commands::catalog::run(&mut catalogs.filaments, action, &session.translator, &mut out)?;
        }
        Commands::Printer { action } => {
            let mut catalogs = session.open_catalogs()?;
            commands::catalog::run(&mut catalogs.printers, action, &session.translator, &mut out)?;
        }
        Commands::Dryer { action } => {
            let mut catalogs = session.open_catalogs()?;
            commands::catalog::run(&mut catalogs.dryers, action, &session.translator, &mut out)?;
        }
        Commands::Config { action } => match action {
            ConfigCommands::Show => commands::config::show(&session, &mut out)?,
            ConfigCommands::SetLanguage { code } => {
                commands::config::set_language(&session, code, &mut out)?
            }
        },
    }

    out.flush()?;
    Ok(())
}
