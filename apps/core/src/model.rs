use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::action_executor::Activation;
use crate::config::SearchMode;

pub const PLUGIN_NAME: &str = "Firefox Search";
pub const PLUGIN_DESCRIPTION: &str = "Search Firefox bookmarks and history";
pub const UNTITLED_PLACEHOLDER: &str = "No title";

/// A candidate browser profile directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub root: PathBuf,
    pub database_path: PathBuf,
    pub has_database: bool,
}

impl Profile {
    pub fn new(root: PathBuf, database_file_name: &str) -> Self {
        let database_path = root.join(database_file_name);
        let has_database = database_path.is_file();
        Self {
            root,
            database_path,
            has_database,
        }
    }

    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub text: String,
    pub max_results_per_profile: u32,
    pub mode: SearchMode,
}

impl SearchRequest {
    pub fn new(text: &str, max_results_per_profile: u32, mode: SearchMode) -> Self {
        Self {
            text: text.to_string(),
            max_results_per_profile,
            mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Favorite,
    History,
}

impl Provenance {
    pub fn label(self) -> &'static str {
        match self {
            Self::Favorite => "Favorite",
            Self::History => "History",
        }
    }
}

/// One matched page. `last_visit` is in the store's native units and only used for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub last_visit: Option<i64>,
    pub is_favorite: bool,
}

impl SearchResult {
    pub fn provenance(&self) -> Provenance {
        if self.is_favorite {
            Provenance::Favorite
        } else {
            Provenance::History
        }
    }

    pub fn display_label(&self) -> String {
        format!("{}: {}", self.provenance().label(), self.url)
    }
}

/// What the host renders for one row of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEntry {
    Prompt { title: String, subtitle: String },
    Match(SearchResult),
}

impl ResultEntry {
    pub fn prompt() -> Self {
        Self::Prompt {
            title: PLUGIN_NAME.to_string(),
            subtitle: PLUGIN_DESCRIPTION.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Prompt { title, .. } => title,
            Self::Match(result) => &result.title,
        }
    }

    pub fn subtitle(&self) -> String {
        match self {
            Self::Prompt { subtitle, .. } => subtitle.clone(),
            Self::Match(result) => result.display_label(),
        }
    }

    pub fn as_match(&self) -> Option<&SearchResult> {
        match self {
            Self::Match(result) => Some(result),
            Self::Prompt { .. } => None,
        }
    }

    pub fn activation(&self) -> Activation {
        match self {
            Self::Prompt { .. } => Activation::Dismiss,
            Self::Match(result) => Activation::OpenUrl(result.url.clone()),
        }
    }
}

/// Cooperative cancellation flag checked between profiles and rows.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
