use rusqlite::ToSql;

use crate::config::SearchMode;

const BOTH_SQL: &str = "
    SELECT bm.title AS title, p.url AS url, p.last_visit_date AS last_visit_date, 1 AS favorite
    FROM moz_bookmarks AS bm
    JOIN moz_places AS p ON bm.fk = p.id
    WHERE bm.title LIKE '%' || :search || '%' OR p.url LIKE '%' || :search || '%'
    UNION
    SELECT p.title, p.url, p.last_visit_date, 0
    FROM moz_historyvisits AS h
    JOIN moz_places AS p ON h.place_id = p.id
    WHERE p.title LIKE '%' || :search || '%' OR p.url LIKE '%' || :search || '%'
    ORDER BY favorite DESC, last_visit_date DESC, title ASC, url ASC
    LIMIT :max_results";

const BOOKMARKS_SQL: &str = "
    SELECT bm.title AS title, p.url AS url, p.last_visit_date AS last_visit_date
    FROM moz_bookmarks AS bm
    JOIN moz_places AS p ON bm.fk = p.id
    WHERE bm.title LIKE '%' || :search || '%' OR p.url LIKE '%' || :search || '%'
    ORDER BY last_visit_date DESC, title ASC, url ASC
    LIMIT :max_results";

const HISTORY_SQL: &str = "
    SELECT p.title AS title, p.url AS url, p.last_visit_date AS last_visit_date
    FROM moz_historyvisits AS h
    JOIN moz_places AS p ON h.place_id = p.id
    WHERE p.title LIKE '%' || :search || '%' OR p.url LIKE '%' || :search || '%'
    ORDER BY last_visit_date DESC, title ASC, url ASC
    LIMIT :max_results";

pub const SEARCH_PARAM: &str = ":search";
pub const MAX_RESULTS_PARAM: &str = ":max_results";

/// Fixed SQL for a mode plus the values bound to it. User text never enters `sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub mode: SearchMode,
    pub sql: &'static str,
    pub search: String,
    pub max_results: i64,
}

impl QueryPlan {
    pub fn bindings(&self) -> [(&'static str, &dyn ToSql); 2] {
        [
            (SEARCH_PARAM, &self.search as &dyn ToSql),
            (MAX_RESULTS_PARAM, &self.max_results as &dyn ToSql),
        ]
    }

    /// Only the union shape carries the favorite column.
    pub fn has_favorite_column(&self) -> bool {
        matches!(self.mode, SearchMode::Both)
    }
}

pub fn sql_for(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Both => BOTH_SQL,
        SearchMode::BookmarksOnly => BOOKMARKS_SQL,
        SearchMode::HistoryOnly => HISTORY_SQL,
    }
}

pub fn build_query(mode: SearchMode, search: &str, max_results: u32) -> QueryPlan {
    QueryPlan {
        mode,
        sql: sql_for(mode),
        search: search.to_string(),
        max_results: i64::from(max_results),
    }
}
