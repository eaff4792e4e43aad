//! Text lookup capability.
//!
//! The core never formats user-facing text itself. Anything that needs a
//! label or message takes a `&dyn Translate` built once by the caller.

/// Look up user-facing text by dotted key, e.g. `"pdf.costs.material_costs"`.
///
/// `{name}` placeholders in the text are replaced by the matching entry of
/// `params`. Implementations return `"[key]"` for unknown keys.
pub trait Translate {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;

    /// Lookup without parameters.
    fn text(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Translator with no tables: every key renders as `[key]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFallback;

impl Translate for KeyFallback {
    fn translate(&self, key: &str, _params: &[(&str, String)]) -> String {
        format!("[{key}]")
    }
}

/// Replace every `{name}` in `template` with its value from `params`.
///
/// Placeholders without a matching parameter are left as they are.
pub fn substitute(template: &str, params: &[(&str, String)]) -> String {
    params.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_fallback() {
        let t = KeyFallback;
        assert_eq!(t.text("pdf.costs.total"), "[pdf.costs.total]");
        assert_eq!(t.translate("a.b", &[("x", "1".to_string())]), "[a.b]");
    }

    #[test]
    fn test_substitute() {
        let params = [("name", "PLA".to_string()), ("count", "3".to_string())];
        assert_eq!(substitute("{name} x{count}", &params), "PLA x3");
        assert_eq!(substitute("{missing} {name}", &params), "{missing} PLA");
        assert_eq!(substitute("no params", &[]), "no params");
    }
}
