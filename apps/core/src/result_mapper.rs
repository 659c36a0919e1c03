use crate::config::SearchMode;
use crate::model::{SearchResult, UNTITLED_PLACEHOLDER};
use crate::places_store::RawRow;

/// Maps store rows for one query, re-checking the match with plain substring containment.
#[derive(Debug, Clone)]
pub struct ResultMapper {
    mode: SearchMode,
    needle: String,
}

impl ResultMapper {
    pub fn new(mode: SearchMode, search: &str) -> Self {
        Self {
            mode,
            needle: search.to_lowercase(),
        }
    }

    pub fn map(&self, row: RawRow) -> Option<SearchResult> {
        let url = row.url.filter(|url| !url.is_empty())?;
        let title = row
            .title
            .unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_string());

        if !self.matches(&title, &url) {
            return None;
        }

        let is_favorite = match self.mode {
            SearchMode::Both => row.favorite == Some(1),
            SearchMode::BookmarksOnly => true,
            SearchMode::HistoryOnly => false,
        };

        Some(SearchResult {
            title,
            url,
            last_visit: row.last_visit,
            is_favorite,
        })
    }

    // LIKE treats `%` and `_` as wildcards; this keeps them literal.
    fn matches(&self, title: &str, url: &str) -> bool {
        title.to_lowercase().contains(&self.needle) || url.to_lowercase().contains(&self.needle)
    }
}
