//! Run settings for the casing engine.
//!
//! Every recognized option is a field here; unknown keys in a settings file
//! are rejected rather than ignored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::casing::{CasingConvention, QuoteCarry};
use crate::error::{Error, Result};
use crate::language::LanguageTable;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CasingSettings {
    /// `camel`, `snake` or `pascal`. Required, no default.
    pub convention: Option<String>,
    /// Name or alias of the language table to use. Required.
    pub language: Option<String>,
    /// Glob patterns; matching identifiers are never renamed.
    pub ignore: Vec<String>,
    /// `line` or `file`; unset means `file`.
    pub quote_carry: Option<QuoteCarry>,
    /// Extra language tables. A table named like a built-in replaces it.
    pub languages: Vec<LanguageTable>,
}

impl CasingSettings {
    pub fn new(convention: impl Into<String>, language: impl Into<String>) -> Self {
        CasingSettings {
            convention: Some(convention.into()),
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// Load settings from a JSON file. `~` and `$VARS` in the path are expanded.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::full(path)
            .map_err(|e| {
                Error::config_invalid_value("config", Some(path.to_string()), e.to_string())
            })?
            .into_owned();
        let path_buf = PathBuf::from(&expanded);

        let content = std::fs::read_to_string(&path_buf).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read settings {}", expanded)))
        })?;

        Self::from_json(&content, &expanded)
    }

    pub fn from_json(content: &str, source: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))
    }

    /// Layer `other` on top of `self`: set fields in `other` win, lists append.
    pub fn merge(mut self, other: CasingSettings) -> Self {
        if other.convention.is_some() {
            self.convention = other.convention;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
        if other.quote_carry.is_some() {
            self.quote_carry = other.quote_carry;
        }
        self.ignore.extend(other.ignore);
        self.languages.extend(other.languages);
        self
    }

    pub fn convention(&self) -> Result<CasingConvention> {
        self.convention
            .as_deref()
            .ok_or_else(|| Error::config_missing_key("convention", None))?
            .parse()
    }

    pub fn quote_carry(&self) -> QuoteCarry {
        self.quote_carry.unwrap_or_default()
    }

    pub fn language(&self) -> Result<&str> {
        self.language
            .as_deref()
            .ok_or_else(|| Error::config_missing_key("language", None))
    }

    pub fn validate_ignore(&self) -> Result<()> {
        if self.ignore.iter().any(|p| p.is_empty()) {
            return Err(Error::config_invalid_value(
                "ignore",
                None,
                "Ignore patterns must not be empty",
            ));
        }
        Ok(())
    }
}
