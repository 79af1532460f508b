//! Text lookup over nested JSON translation tables.
//!
//! Keys are dotted paths (`whatsapp.greeting`). A key is resolved in the
//! requested table first, then in the fallback table, and finally the key
//! itself is returned.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Haitian Creole
    #[default]
    Ht,
    Fr,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ht => "ht",
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ht" => Some(Language::Ht),
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// Language whose table backs every missing key.
pub const FALLBACK_LANGUAGE: Language = Language::En;

fn parse_table(lang: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::error!("Invalid {} translation table: {}", lang, e);
        Value::Null
    })
}

static HT: LazyLock<Value> = LazyLock::new(|| parse_table("ht", include_str!("../locales/ht.json")));
static FR: LazyLock<Value> = LazyLock::new(|| parse_table("fr", include_str!("../locales/fr.json")));
static EN: LazyLock<Value> = LazyLock::new(|| parse_table("en", include_str!("../locales/en.json")));

/// Bundled table for a language.
pub fn table(lang: Language) -> &'static Value {
    match lang {
        Language::Ht => &*HT,
        Language::Fr => &*FR,
        Language::En => &*EN,
    }
}

fn resolve<'a>(table: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(table, |node, part| node.as_object()?.get(part))
}

/// Resolve `key` in `table`, then in `fallback`, else return the key.
///
/// A path that resolves to something other than a string (a nested object,
/// a number) also yields the key.
pub fn lookup(table: &Value, key: &str, fallback: &Value) -> String {
    resolve(table, key)
        .or_else(|| resolve(fallback, key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// [`lookup`] followed by `{{param}}` substitution.
pub fn lookup_with(table: &Value, key: &str, fallback: &Value, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(lookup(table, key, fallback), |text, (name, value)| {
            text.replace(&format!("{{{{{}}}}}", name), value)
        })
}

/// Translate with the bundled tables.
pub fn t(lang: Language, key: &str, params: &[(&str, &str)]) -> String {
    lookup_with(table(lang), key, table(FALLBACK_LANGUAGE), params)
}
