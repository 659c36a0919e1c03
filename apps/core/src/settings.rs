use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, SearchMode, DEFAULT_MAX_RESULTS_PER_PROFILE};

pub const INCLUSIONS_KEY: &str = "Inclusions";
pub const MAX_RESULTS_KEY: &str = "MaxResults";
pub const SEARCH_BOOKMARKS_KEY: &str = "SearchBookmarks";
pub const SEARCH_HISTORY_KEY: &str = "SearchHistory";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings payload: {0}")]
    Payload(#[from] json5::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Options document pushed by the host whenever the user edits the plugin settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HostSettings {
    pub additional_options: Vec<HostOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HostOption {
    pub key: String,
    pub value: Option<bool>,
    pub combo_box_value: Option<i64>,
    pub number_value: Option<f64>,
}

impl HostSettings {
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        Ok(json5::from_str(raw)?)
    }

    fn option(&self, key: &str) -> Option<&HostOption> {
        self.additional_options
            .iter()
            .find(|option| option.key.eq_ignore_ascii_case(key))
    }

    /// The `Inclusions` combo wins; otherwise the two checkboxes decide, each defaulting to on.
    pub fn search_mode(&self) -> Result<SearchMode, SettingsError> {
        if let Some(code) = self.option(INCLUSIONS_KEY).and_then(|o| o.combo_box_value) {
            return mode_from_inclusion_code(code);
        }
        let bookmarks = self.flag(SEARCH_BOOKMARKS_KEY).unwrap_or(true);
        let history = self.flag(SEARCH_HISTORY_KEY).unwrap_or(true);
        SearchMode::from_flags(bookmarks, history).ok_or_else(|| {
            SettingsError::Invalid("Search bookmarks, history, or both.".to_string())
        })
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.option(key).and_then(|o| o.value)
    }

    pub fn max_results_per_profile(&self) -> Result<u32, SettingsError> {
        let Some(value) = self.option(MAX_RESULTS_KEY).and_then(|o| o.number_value) else {
            return Ok(DEFAULT_MAX_RESULTS_PER_PROFILE);
        };
        if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
            return Err(SettingsError::Invalid(format!(
                "Max results must be a positive integer, got {value}."
            )));
        }
        Ok(value as u32)
    }
}

/// Maps the host's combo-box codes onto the mode; codes never travel further than this.
pub fn mode_from_inclusion_code(code: i64) -> Result<SearchMode, SettingsError> {
    match code {
        0 => Ok(SearchMode::Both),
        1 => Ok(SearchMode::BookmarksOnly),
        2 => Ok(SearchMode::HistoryOnly),
        other => Err(SettingsError::Invalid(format!(
            "Unknown inclusion option {other}."
        ))),
    }
}

pub fn apply_host_options(cfg: &Config, raw: &str) -> Result<Config, SettingsError> {
    let settings = HostSettings::parse(raw)?;
    Ok(Config {
        search_mode: settings.search_mode()?,
        max_results_per_profile: settings.max_results_per_profile()?,
        ..cfg.clone()
    })
}
