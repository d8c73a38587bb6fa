//! Localization lookup
//!
//! The decoder and renderer only ever ask for a label by key. [`Catalog`]
//! answers from a flat JSON map of `key -> template`, where templates are
//! handlebars strings with `{{name}}` placeholders.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use handlebars::Handlebars;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{Result, TelexError};

const EN_CATALOG: &str = include_str!("../locales/en.json");
const RU_CATALOG: &str = include_str!("../locales/ru.json");

// Labels are plain text, not HTML.
static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb
});

/// Label lookup used at every label-generation point
pub trait Translator: Send + Sync {
    /// Resolve `key` and substitute `params` into its template.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    fn label(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// JSON-backed translation catalog for one locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Parse a catalog from its JSON text
    pub fn from_json_str(locale: impl Into<String>, json: &str) -> Result<Self> {
        let locale = locale.into();
        let entries: HashMap<String, String> = serde_json::from_str(json).map_err(|e| {
            TelexError::catalog(format!("invalid catalog for locale '{locale}': {e}"))
        })?;
        debug!("Loaded {} labels for locale {}", entries.len(), locale);
        Ok(Self { locale, entries })
    }

    /// Load a catalog file; the locale is taken from the file stem (`ru.json`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let locale = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| TelexError::catalog(format!("no locale in {}", path.display())))?;
        let json = fs::read_to_string(path)?;
        Self::from_json_str(locale, &json)
    }

    /// One of the catalogs compiled into the crate
    pub fn builtin(locale: &str) -> Result<Self> {
        match locale {
            "en" => Self::from_json_str("en", EN_CATALOG),
            "ru" => Self::from_json_str("ru", RU_CATALOG),
            other => Err(TelexError::catalog(format!("no built-in catalog for '{other}'"))),
        }
    }

    #[must_use]
    pub fn english() -> Self {
        // The embedded catalog is covered by tests.
        Self::from_json_str("en", EN_CATALOG).unwrap_or_else(|_| Self {
            locale: "en".to_string(),
            entries: HashMap::new(),
        })
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };
        interpolate(template, params)
    }
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let data: Map<String, Value> = params
        .iter()
        .map(|(name, value)| ((*name).to_string(), Value::String((*value).to_string())))
        .collect();
    TEMPLATES
        .render_template(template, &data)
        .unwrap_or_else(|e| {
            warn!("Bad label template {:?}: {}", template, e);
            template.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalogs_parse() {
        assert_eq!(Catalog::builtin("en").unwrap().locale(), "en");
        assert_eq!(Catalog::builtin("ru").unwrap().locale(), "ru");
        assert!(Catalog::builtin("de").is_err());
    }

    #[test]
    fn test_interpolation() {
        let catalog = Catalog::english();
        assert_eq!(
            catalog.translate("time_range", &[("from", "0600"), ("to", "1800")]),
            "From 0600 to 1800"
        );
        assert_eq!(
            catalog.translate("unknown_station", &[("code", "99999")]),
            "Unknown station 99999"
        );
    }

    #[test]
    fn test_params_are_not_html_escaped() {
        let catalog = Catalog::from_json_str("xx", r#"{"issued": "By {{who}} <{{code}}>"}"#).unwrap();
        assert_eq!(
            catalog.translate("issued", &[("who", "A&B"), ("code", "31960")]),
            "By A&B <31960>"
        );
    }

    #[test]
    fn test_broken_template_is_returned_as_is() {
        let catalog = Catalog::from_json_str("xx", r#"{"bad": "From {{#if}}"}"#).unwrap();
        assert_eq!(catalog.label("bad"), "From {{#if}}");
    }

    #[test]
    fn test_missing_key_echoes_key() {
        let catalog = Catalog::english();
        assert_eq!(catalog.label("no_such_label"), "no_such_label");
    }

    #[test]
    fn test_load_from_file_uses_stem_as_locale() {
        let mut file = tempfile::Builder::new().prefix("xx").suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"wind": "Vent"}"#).unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.label("wind"), "Vent");
        assert!(catalog.locale().starts_with("xx"));
    }

    #[test]
    fn test_invalid_catalog_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2]").unwrap();
        assert!(matches!(
            Catalog::load(file.path()),
            Err(TelexError::Catalog { .. })
        ));
    }
}
