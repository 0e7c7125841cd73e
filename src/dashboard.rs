//! The search page: form validation, request sequencing and the error notice,
//! wired to a [`ViewState`].

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::api::ApiClient;
use crate::auth::SessionEvent;
use crate::error::{ApiError, ValidationError};
use crate::models::JobSearchParams;
use crate::view::ViewState;

/// Radius choices offered by the search form, in miles.
pub const DISTANCES: [u32; 6] = [5, 10, 15, 25, 50, 100];

pub const DEFAULT_DISTANCE: u32 = 25;

/// Raw search form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub query: String,
    pub location: String,
    pub distance: u32,
    /// Comma-separated terms the backend should exclude.
    pub excluded_terms: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            distance: DEFAULT_DISTANCE,
            excluded_terms: None,
            date_from: None,
            date_to: None,
        }
    }
}

impl SearchForm {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Check the form and turn it into request parameters.
    pub fn validate(&self) -> Result<JobSearchParams, ValidationError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(ValidationError::MissingQuery);
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(ValidationError::MissingLocation);
        }
        if !DISTANCES.contains(&self.distance) {
            return Err(ValidationError::InvalidDistance(self.distance));
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(ValidationError::InvertedDateRange { from, to });
            }
        }

        let excluded_terms = self
            .excluded_terms
            .as_deref()
            .map(|terms| {
                terms
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .filter(|terms| !terms.is_empty());

        Ok(JobSearchParams {
            query: query.to_string(),
            location: location.to_string(),
            distance: self.distance,
            excluded_terms,
            date_from: self.date_from,
            date_to: self.date_to,
        })
    }
}

/// Tag identifying one search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Hands out increasing tickets so only the newest search may land.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Api,
    SessionEnded,
}

/// A dismissible message shown next to the search controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the current result set.
    Applied { count: usize },
    /// A newer search was issued while this one was in flight.
    Stale,
}

pub struct Dashboard {
    api: ApiClient,
    view: Mutex<ViewState>,
    sequencer: SearchSequencer,
    notice: Mutex<Option<Notice>>,
}

impl Dashboard {
    pub fn new(api: ApiClient, view: ViewState) -> Self {
        Self {
            api,
            view: Mutex::new(view),
            sequencer: SearchSequencer::default(),
            notice: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Lock the view state to read or adjust filters and pages.
    pub async fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().await
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.notice.lock().await.clone()
    }

    pub async fn dismiss_notice(&self) {
        *self.notice.lock().await = None;
    }

    /// Validate `form`, run the search and, if it is still the newest one when
    /// the response arrives, replace the result set.
    pub async fn search(&self, form: &SearchForm) -> Result<SearchOutcome, ApiError> {
        let params = match form.validate() {
            Ok(params) => params,
            Err(e) => {
                self.set_notice(NoticeKind::Validation, e.to_string()).await;
                return Err(e.into());
            }
        };
        self.run(&params).await
    }

    /// Re-execute a saved query by id.
    pub async fn run_saved_query(&self, id: i64) -> Result<SearchOutcome, ApiError> {
        let saved = match self.api.get_saved_query(id).await {
            Ok(saved) => saved,
            Err(e) => {
                self.report(&e).await;
                return Err(e);
            }
        };
        info!("Running saved search {id}: {} in {}", saved.query, saved.location);
        self.run(&saved.to_search_params()).await
    }

    /// Run already-validated parameters.
    pub async fn run(&self, params: &JobSearchParams) -> Result<SearchOutcome, ApiError> {
        let ticket = self.sequencer.begin();
        let result = self.api.search_jobs(params).await;

        if !self.sequencer.is_current(ticket) {
            debug!("Dropping stale search response {ticket:?}");
            return Ok(SearchOutcome::Stale);
        }

        match result {
            Ok(response) => {
                let count = response.results.len();
                self.view.lock().await.set_results(response.results);
                self.dismiss_notice().await;
                Ok(SearchOutcome::Applied { count })
            }
            Err(e) => {
                self.report(&e).await;
                Err(e)
            }
        }
    }

    /// React to a session event: a forced logout empties the dashboard.
    pub async fn handle_session_event(&self, event: &SessionEvent) {
        if let SessionEvent::ForcedLogout { reason } = event {
            self.view.lock().await.set_results(Vec::new());
            self.set_notice(NoticeKind::SessionEnded, reason.clone()).await;
        }
    }

    async fn report(&self, e: &ApiError) {
        error!("Search failed: {e}");
        let kind = if e.is_unauthorized() {
            // The session is gone; rows fetched under it go with it.
            self.view.lock().await.set_results(Vec::new());
            NoticeKind::SessionEnded
        } else {
            NoticeKind::Api
        };
        self.set_notice(kind, e.to_string()).await;
    }

    async fn set_notice(&self, kind: NoticeKind, message: String) {
        *self.notice.lock().await = Some(Notice { kind, message });
    }
}
