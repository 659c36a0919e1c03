use thiserror::Error;

use crate::config::{validate, Config};
use crate::contract::{
    CoreRequest, CoreResponse, ResultEntryDto, SearchResponse, UpdateSettingsRequest,
    UpdateSettingsResponse,
};
use crate::discovery::ProfileLocator;
use crate::model::{CancellationToken, ResultEntry, SearchRequest};
use crate::search::{RankedAggregator, SearchError};
use crate::settings::{apply_host_options, SettingsError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("{0}")]
    Search(#[from] SearchError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Entry point the host drives: one search per debounced query event.
pub struct CoreService {
    config: Config,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn update_config(&mut self, config: Config) -> Result<(), ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        self.config = config;
        Ok(())
    }

    pub fn apply_host_settings(&mut self, raw: &str) -> Result<(), ServiceError> {
        let updated = apply_host_options(&self.config, raw)?;
        self.update_config(updated)
    }

    pub fn search(&self, query: &str) -> Result<Vec<ResultEntry>, ServiceError> {
        self.search_with_cancel(query, &CancellationToken::new())
    }

    pub fn search_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResultEntry>, ServiceError> {
        let request = SearchRequest::new(
            query,
            self.config.max_results_per_profile,
            self.config.search_mode,
        );
        let aggregator = RankedAggregator::new(ProfileLocator::new(
            self.config.profiles_root.clone(),
            &self.config.database_file_name,
        ));

        let outcome = match aggregator.search_with_cancel(&request, cancel) {
            Ok(outcome) => outcome,
            Err(SearchError::ProfileRootUnavailable(error)) => {
                tracing::warn!("{error}");
                return Err(SearchError::ProfileRootUnavailable(error).into());
            }
            Err(error) => return Err(error.into()),
        };

        for skipped in &outcome.skipped {
            tracing::warn!(
                profile = %skipped.profile.display(),
                "skipping profile: {}",
                skipped.reason
            );
        }
        tracing::debug!(
            mode = request.mode.as_str(),
            profiles = outcome.profiles_searched,
            results = outcome.entries.len(),
            "search complete"
        );

        Ok(outcome.entries)
    }

    pub fn handle_command(&mut self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Search(payload) => {
                let results = self
                    .search(&payload.query)?
                    .into_iter()
                    .map(ResultEntryDto::from)
                    .collect();
                Ok(CoreResponse::Search(SearchResponse { results }))
            }
            CoreRequest::UpdateSettings(payload) => self.update_settings(payload),
        }
    }

    fn update_settings(
        &mut self,
        payload: UpdateSettingsRequest,
    ) -> Result<CoreResponse, ServiceError> {
        if payload.max_results_per_profile == Some(0) {
            return Err(ServiceError::InvalidRequest(
                "max_results_per_profile must be a positive integer".to_string(),
            ));
        }

        let mut next = self.config.clone();
        if let Some(mode) = payload.search_mode {
            next.search_mode = mode;
        }
        if let Some(max) = payload.max_results_per_profile {
            next.max_results_per_profile = max;
        }
        self.update_config(next)?;

        Ok(CoreResponse::UpdateSettings(UpdateSettingsResponse {
            search_mode: self.config.search_mode,
            max_results_per_profile: self.config.max_results_per_profile,
        }))
    }
}
