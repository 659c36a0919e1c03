use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::types::FromSql;
use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::model::CancellationToken;
use crate::query_builder::QueryPlan;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile database unreadable '{}': {source}", path.display())]
    ProfileUnreadable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query cancelled")]
    Cancelled,
}

/// A row as the store returned it, before any mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub title: Option<String>,
    pub url: Option<String>,
    pub last_visit: Option<i64>,
    pub favorite: Option<i64>,
}

impl RawRow {
    fn from_row(row: &Row<'_>, with_favorite: bool) -> Self {
        Self {
            title: column(row, 0, "title"),
            url: column(row, 1, "url"),
            last_visit: column(row, 2, "last_visit_date"),
            favorite: if with_favorite {
                column(row, 3, "favorite")
            } else {
                None
            },
        }
    }
}

/// Reads a nullable column, treating a value of the wrong type as absent.
fn column<T: FromSql>(row: &Row<'_>, index: usize, name: &str) -> Option<T> {
    match row.get::<_, Option<T>>(index) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(column = name, "unexpected column value treated as null: {error}");
            None
        }
    }
}

/// Read-only connection to one profile's places database. Dropping it closes the connection.
pub struct ProfileQueryExecutor {
    path: PathBuf,
    db: Connection,
}

impl ProfileQueryExecutor {
    pub fn open(path: &Path) -> Result<Self, ProfileError> {
        let db = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| unreadable(path, source))?;
        // A browser holding the lock is reported, not waited on.
        db.busy_timeout(Duration::ZERO)
            .map_err(|source| unreadable(path, source))?;

        Ok(Self {
            path: path.to_path_buf(),
            db,
        })
    }

    /// Streams rows to `on_row` as the store produces them. Returns the number of rows seen.
    pub fn for_each_row<F>(
        &self,
        plan: &QueryPlan,
        cancel: &CancellationToken,
        mut on_row: F,
    ) -> Result<usize, ProfileError>
    where
        F: FnMut(RawRow),
    {
        let mut stmt = self
            .db
            .prepare(plan.sql)
            .map_err(|source| unreadable(&self.path, source))?;
        let mut rows = stmt
            .query(&plan.bindings()[..])
            .map_err(|source| unreadable(&self.path, source))?;

        let with_favorite = plan.has_favorite_column();
        let mut seen = 0;
        while let Some(row) = rows
            .next()
            .map_err(|source| unreadable(&self.path, source))?
        {
            if cancel.is_cancelled() {
                return Err(ProfileError::Cancelled);
            }
            on_row(RawRow::from_row(row, with_favorite));
            seen += 1;
        }
        Ok(seen)
    }

    pub fn close(self) -> Result<(), ProfileError> {
        let path = self.path;
        self.db
            .close()
            .map_err(|(_, source)| unreadable(&path, source))
    }
}

fn unreadable(path: &Path, source: rusqlite::Error) -> ProfileError {
    ProfileError::ProfileUnreadable {
        path: path.to_path_buf(),
        source,
    }
}
