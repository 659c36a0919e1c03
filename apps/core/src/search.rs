use std::path::PathBuf;

use thiserror::Error;

use crate::discovery::{LocateError, ProfileLocator};
use crate::model::{CancellationToken, Profile, ResultEntry, SearchRequest, SearchResult};
use crate::places_store::{ProfileError, ProfileQueryExecutor};
use crate::query_builder::{build_query, QueryPlan};
use crate::result_mapper::ResultMapper;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    ProfileRootUnavailable(#[from] LocateError),
    #[error("search cancelled")]
    Cancelled,
}

/// A profile that contributed nothing because its database could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProfile {
    pub profile: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub entries: Vec<ResultEntry>,
    pub profiles_searched: usize,
    pub skipped: Vec<SkippedProfile>,
}

impl SearchOutcome {
    pub fn results(&self) -> impl Iterator<Item = &SearchResult> {
        self.entries.iter().filter_map(ResultEntry::as_match)
    }
}

/// Runs a request against every located profile and concatenates their blocks.
pub struct RankedAggregator {
    locator: ProfileLocator,
}

impl RankedAggregator {
    pub fn new(locator: ProfileLocator) -> Self {
        Self { locator }
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.search_with_cancel(request, &CancellationToken::new())
    }

    pub fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        if request.text.is_empty() {
            return Ok(SearchOutcome {
                entries: vec![ResultEntry::prompt()],
                ..SearchOutcome::default()
            });
        }

        let profiles = self.locator.locate()?;
        merge_profiles(&profiles, request, cancel)
    }
}

/// Profile order is preserved; there is no global re-sort and the cap applies per profile.
pub fn merge_profiles(
    profiles: &[Profile],
    request: &SearchRequest,
    cancel: &CancellationToken,
) -> Result<SearchOutcome, SearchError> {
    let plan = build_query(request.mode, &request.text, request.max_results_per_profile);
    let mapper = ResultMapper::new(request.mode, &request.text);
    let mut outcome = SearchOutcome::default();

    for profile in profiles {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        match query_profile(profile, &plan, &mapper, cancel) {
            Ok(block) => {
                outcome
                    .entries
                    .extend(block.into_iter().map(ResultEntry::Match));
                outcome.profiles_searched += 1;
            }
            Err(ProfileError::Cancelled) => return Err(SearchError::Cancelled),
            Err(error) => outcome.skipped.push(SkippedProfile {
                profile: profile.root.clone(),
                reason: error.to_string(),
            }),
        }
    }

    Ok(outcome)
}

fn query_profile(
    profile: &Profile,
    plan: &QueryPlan,
    mapper: &ResultMapper,
    cancel: &CancellationToken,
) -> Result<Vec<SearchResult>, ProfileError> {
    let executor = ProfileQueryExecutor::open(&profile.database_path)?;
    let mut block = Vec::new();
    executor.for_each_row(plan, cancel, |row| {
        if let Some(result) = mapper.map(row) {
            block.push(result);
        }
    })?;
    Ok(block)
}
