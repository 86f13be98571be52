//! Recommendation search flow
//!
//! The controller owns the search form, the last result list, and the
//! request state. A search is split in two halves so the caller decides how
//! to run the network call:
//!
//! 1. [`RecommendationController::submit`] marks the flow pending and returns
//!    a [`RecommendCall`].
//! 2. [`RecommendCall::run`] performs the request and yields a
//!    [`RecommendDone`], which goes back through
//!    [`RecommendationController::finish`].
//!
//! Overlapping searches are allowed. Only the most recently submitted one is
//! applied; older completions are dropped.

use crate::backend::{BackendClient, Book, Genre, RecommendRequest, RecommendResponse};
use crate::error::ApiError;

use super::request::{Generation, RequestState, Ticket};

/// Banner shown when the backend could not be reached or answered badly
pub const FETCH_FAILED: &str = "Failed to fetch recommendations. Please try again.";

pub const DEFAULT_MIN_RATING: f32 = 4.0;
pub const MIN_RATING_RANGE: (f32, f32) = (1.0, 5.0);

/// Search form contents
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub query: String,
    pub genre: Genre,
    pub min_rating: f32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            genre: Genre::Any,
            min_rating: DEFAULT_MIN_RATING,
        }
    }
}

impl SearchCriteria {
    pub fn to_request(&self) -> RecommendRequest {
        RecommendRequest {
            query: self.query.clone(),
            genre: self.genre,
            min_rating: self.min_rating,
        }
    }
}

/// Clamp a slider value into range and snap it to one decimal.
pub fn snap_rating(value: f32) -> f32 {
    if value.is_nan() {
        return DEFAULT_MIN_RATING;
    }
    let (low, high) = MIN_RATING_RANGE;
    (value.clamp(low, high) * 10.0).round() / 10.0
}

/// What a finished search means for the UI
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendOutcome {
    /// New result list, replacing the old one
    Recommendations(Vec<Book>),
    /// The backend explained why it has nothing for us
    Rejected(String),
    /// Network failure, bad status, or an unusable body
    Unavailable,
    /// A successful body that carried neither results nor an error
    NoChange,
}

impl RecommendOutcome {
    pub fn from_result(result: Result<RecommendResponse, ApiError>) -> Self {
        match result {
            Ok(RecommendResponse {
                recommendations: Some(books),
                ..
            }) => RecommendOutcome::Recommendations(books),
            Ok(RecommendResponse {
                error: Some(message),
                ..
            }) => RecommendOutcome::Rejected(message),
            Ok(_) => {
                tracing::warn!("Recommendation response had neither results nor error");
                RecommendOutcome::NoChange
            }
            Err(e) => {
                tracing::warn!("Recommendation request failed: {}", e);
                match e.server_message() {
                    Some(message) => RecommendOutcome::Rejected(message.to_string()),
                    None => RecommendOutcome::Unavailable,
                }
            }
        }
    }
}

/// One issued search, ready to be sent
#[derive(Debug, Clone)]
pub struct RecommendCall {
    ticket: Ticket,
    request: RecommendRequest,
}

impl RecommendCall {
    pub fn request(&self) -> &RecommendRequest {
        &self.request
    }

    pub async fn run(self, client: BackendClient) -> RecommendDone {
        let result = client.recommend(&self.request).await;
        RecommendDone {
            ticket: self.ticket,
            outcome: RecommendOutcome::from_result(result),
        }
    }
}

/// Completion of a [`RecommendCall`]
#[derive(Debug, Clone)]
pub struct RecommendDone {
    ticket: Ticket,
    outcome: RecommendOutcome,
}

impl RecommendDone {
    pub fn outcome(&self) -> &RecommendOutcome {
        &self.outcome
    }
}

#[derive(Debug, Default)]
pub struct RecommendationController {
    criteria: SearchCriteria,
    results: Vec<Book>,
    state: RequestState,
    generation: Generation,
}

impl RecommendationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, query: String) {
        self.criteria.query = query;
    }

    pub fn set_genre(&mut self, genre: Genre) {
        self.criteria.genre = genre;
    }

    pub fn set_min_rating(&mut self, rating: f32) {
        self.criteria.min_rating = snap_rating(rating);
    }

    pub fn results(&self) -> &[Book] {
        &self.results
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The search button is disabled while a request is outstanding
    pub fn can_submit(&self) -> bool {
        !self.state.is_pending()
    }

    /// Start a search with the current form contents.
    ///
    /// Clears any previous error. Results stay on screen until the new
    /// request succeeds.
    pub fn submit(&mut self) -> RecommendCall {
        let ticket = self.generation.issue();
        let request = self.criteria.to_request();
        tracing::info!(
            "Searching recommendations: query={:?} genre={:?} min_rating={:.1}",
            request.query,
            request.genre,
            request.min_rating
        );

        self.state = RequestState::Pending;
        RecommendCall { ticket, request }
    }

    /// Apply a completed search. Returns `false` if it was superseded by a
    /// newer submit and therefore ignored.
    pub fn finish(&mut self, done: RecommendDone) -> bool {
        if !self.generation.is_latest(done.ticket) {
            tracing::debug!("Discarding stale recommendation response");
            return false;
        }

        match done.outcome {
            RecommendOutcome::Recommendations(books) => {
                tracing::info!("Received {} recommendations", books.len());
                self.results = books;
                self.state = RequestState::Succeeded;
            }
            RecommendOutcome::Rejected(message) => {
                self.state = RequestState::Failed(message);
            }
            RecommendOutcome::Unavailable => {
                self.state = RequestState::Failed(FETCH_FAILED.to_string());
            }
            RecommendOutcome::NoChange => {
                self.state = RequestState::Idle;
            }
        }
        true
    }
}
