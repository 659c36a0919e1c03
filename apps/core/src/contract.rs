use serde::{Deserialize, Serialize};

use crate::config::SearchMode;
use crate::model::ResultEntry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Prompt,
    Favorite,
    History,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultEntryDto {
    pub kind: EntryKind,
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<ResultEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub search_mode: Option<SearchMode>,
    #[serde(default)]
    pub max_results_per_profile: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSettingsResponse {
    pub search_mode: SearchMode,
    pub max_results_per_profile: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Search(SearchRequest),
    UpdateSettings(UpdateSettingsRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Search(SearchResponse),
    UpdateSettings(UpdateSettingsResponse),
}

impl From<ResultEntry> for ResultEntryDto {
    fn from(value: ResultEntry) -> Self {
        let subtitle = value.subtitle();
        match value {
            ResultEntry::Prompt { title, .. } => Self {
                kind: EntryKind::Prompt,
                title,
                subtitle,
                url: None,
            },
            ResultEntry::Match(result) => Self {
                kind: if result.is_favorite {
                    EntryKind::Favorite
                } else {
                    EntryKind::History
                },
                title: result.title,
                subtitle,
                url: Some(result.url),
            },
        }
    }
}
