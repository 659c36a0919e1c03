use std::path::PathBuf;

use thiserror::Error;
use walkdir::WalkDir;

use crate::model::Profile;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("profile root unavailable '{}': {message}", path.display())]
    ProfileRootUnavailable { path: PathBuf, message: String },
}

/// Lists profile directories under a root, rescanning on every call.
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    root: PathBuf,
    database_file_name: String,
}

impl ProfileLocator {
    pub fn new(root: impl Into<PathBuf>, database_file_name: &str) -> Self {
        Self {
            root: root.into(),
            database_file_name: database_file_name.to_string(),
        }
    }

    /// Every immediate subdirectory of the root, ordered by name.
    pub fn candidates(&self) -> Result<Vec<Profile>, LocateError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| self.unavailable(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(self.unavailable("not a directory".to_string()));
        }

        let mut out = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    return Err(self.unavailable(error.to_string()));
                }
                Err(error) => {
                    tracing::debug!("skipping unreadable profile entry: {error}");
                    continue;
                }
            };

            if !entry.path().is_dir() {
                continue;
            }
            out.push(Profile::new(entry.into_path(), &self.database_file_name));
        }
        Ok(out)
    }

    /// Candidates that actually hold a places database.
    pub fn locate(&self) -> Result<Vec<Profile>, LocateError> {
        Ok(self
            .candidates()?
            .into_iter()
            .filter(|profile| profile.has_database)
            .collect())
    }

    fn unavailable(&self, message: String) -> LocateError {
        LocateError::ProfileRootUnavailable {
            path: self.root.clone(),
            message,
        }
    }
}
