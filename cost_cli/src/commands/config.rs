use std::io::Write;

use anyhow::{Context, Result};
use cost_core::translate::Translate;

use super::{user_error, Session};
use crate::translations::Translator;

/// `printcost config show`
pub fn show(session: &Session, out: &mut dyn Write) -> Result<()> {
    let rendered =
        toml::to_string_pretty(&session.config).context("failed to render configuration")?;

    writeln!(out, "# {}", session.config_path.display())?;
    writeln!(out, "# catalogs: {}", session.data_dir().display())?;
    writeln!(
        out,
        "# languages: {} (active: {})",
        Translator::available().join(", "),
        session.translator.language()
    )?;
    write!(out, "{rendered}")?;
    Ok(())
}

/// `printcost config set-language`
pub fn set_language(session: &Session, code: &str, out: &mut dyn Write) -> Result<()> {
    let mut config = session.config.clone();
    config.set_language(code).map_err(|e| user_error(e, &session.translator))?;
    config
        .save(&session.config_path)
        .map_err(|e| user_error(e, &session.translator))?;

    // Confirm in the newly selected language
    let translator = Translator::load(&config.language)?;
    let params = [("language", config.language.clone())];
    writeln!(out, "{}", translator.translate("messages.success.language_set", &params))?;
    Ok(())
}
