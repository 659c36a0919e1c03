use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("empty url")]
    EmptyUrl,
    #[error("browser launch failed for {url}: {message}")]
    Failed { url: String, message: String },
}

/// The external collaborator that opens a URL in the user's browser.
pub trait BrowserLauncher {
    fn open_url(&self, url: &str) -> Result<(), LaunchError>;
}

/// Deferred action attached to each result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Dismiss,
    OpenUrl(String),
}

impl Activation {
    pub fn activate(&self, launcher: &dyn BrowserLauncher) -> Result<bool, LaunchError> {
        match self {
            Self::Dismiss => Ok(true),
            Self::OpenUrl(url) => {
                let url = validate_url(url)?;
                launcher.open_url(url)?;
                Ok(true)
            }
        }
    }
}

pub fn validate_url(url: &str) -> Result<&str, LaunchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyUrl);
    }
    Ok(trimmed)
}
