//! Locale-keyed message templates loaded from a JSON file
//!
//! The file maps locale codes to greeting strings and two templates:
//! `message_body` with an `{emoji}` placeholder and `redeem_link` with
//! `{link}` and `{code}` placeholders. Loaded once, read-only. Unknown
//! locales fall back to the base locale, which must be present.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::BASE_LOCALE;
use crate::error::{Error, Result};

/// Templates for a single locale
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LocaleStrings {
    pub birthday_greeting: String,
    pub belated_birthday_greeting: String,
    pub message_body: String,
    pub redeem_link: String,
}

impl LocaleStrings {
    /// Greeting for the given belatedness
    pub fn greeting(&self, belated: bool) -> &str {
        if belated {
            &self.belated_birthday_greeting
        } else {
            &self.birthday_greeting
        }
    }

    /// Message body with the emoji placeholder filled in
    pub fn render_body(&self, emoji: &str) -> String {
        self.message_body.replace("{emoji}", emoji)
    }

    /// Redeem block with link and code filled in
    pub fn render_redeem(&self, link: &str, code: &str) -> String {
        self.redeem_link
            .replace("{link}", link)
            .replace("{code}", code)
    }
}

/// The full translation table
#[derive(Debug, Clone)]
pub struct Translations {
    locales: HashMap<String, LocaleStrings>,
}

impl Translations {
    /// Load the table from a JSON file and verify the base locale exists.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::TranslationError(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse the table from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let locales: HashMap<String, LocaleStrings> = serde_json::from_str(content)
            .map_err(|e| Error::TranslationError(format!("Malformed translation file: {}", e)))?;

        if !locales.contains_key(BASE_LOCALE) {
            return Err(Error::MissingBaseLocale(BASE_LOCALE.to_string()));
        }

        Ok(Self { locales })
    }

    /// Strings for a locale, falling back to the base locale.
    pub fn get(&self, locale: &str) -> &LocaleStrings {
        self.locales
            .get(locale)
            .unwrap_or_else(|| &self.locales[BASE_LOCALE])
    }

    /// Whether a locale has its own entry (no fallback).
    pub fn has(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}
