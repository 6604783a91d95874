use std::time::Instant;

use crate::error::LookupError;
use crate::models::destination::Destination;

use super::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No query, or the query is too short to search
    #[default]
    Idle,
    /// A keystroke arrived and the debounce timer is running
    Debouncing,
    /// A lookup has been dispatched and has not answered yet
    Pending,
    /// The latest dispatched lookup has answered
    Settled,
}

/// A lookup the host must run and report back with [`DestinationSearchController::apply_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDispatch {
    pub token: u64,
    pub query: String,
    pub limit: usize,
}

/// What happened to a lookup response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Results published
    Applied,
    /// Lookup failed; results cleared and the error recorded
    Failed,
    /// A newer session was issued after this one; the response was dropped
    Superseded,
}

/// Published view of the controller, cheap to clone across threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSnapshot {
    pub state: SearchState,
    pub query: String,
    pub results: Vec<Destination>,
    pub error: Option<String>,
    /// Token of the session the results belong to
    pub settled_token: Option<u64>,
}

/// Debounce and session bookkeeping for one autocomplete box.
///
/// Each instance owns its own timer deadline and token counter, so two
/// controllers never interfere.
pub struct DestinationSearchController {
    config: SearchConfig,
    state: SearchState,
    query: String,
    deadline: Option<Instant>,
    last_token: u64,
    /// Session whose response may still be applied
    authoritative: Option<u64>,
    results: Vec<Destination>,
    error: Option<LookupError>,
    settled_token: Option<u64>,
}

impl Default for DestinationSearchController {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl DestinationSearchController {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            state: SearchState::Idle,
            query: String::new(),
            deadline: None,
            last_token: 0,
            authoritative: None,
            results: Vec::new(),
            error: None,
            settled_token: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_results(&self) -> &[Destination] {
        &self.results
    }

    pub fn current_error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    /// When the pending debounce timer fires, if one is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn on_query_changed(&mut self, text: impl Into<String>) {
        self.on_query_changed_at(text, Instant::now());
    }

    /// Record a keystroke, restarting the debounce timer.
    pub fn on_query_changed_at(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();
        self.deadline = Some(now + self.config.debounce);
        self.state = SearchState::Debouncing;
        log::debug!("Search debounce restarted for {:?}", self.query);
    }

    pub fn poll(&mut self) -> Option<SearchDispatch> {
        self.poll_at(Instant::now())
    }

    /// Fire the debounce timer if it has elapsed.
    ///
    /// Returns the lookup to run when the query is long enough. A short query
    /// returns to idle, clears results, and orphans any in-flight lookup.
    pub fn poll_at(&mut self, now: Instant) -> Option<SearchDispatch> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.deadline = None,
            _ => return None,
        }

        let query = self.query.trim().to_string();
        if query.chars().count() < self.config.min_query_len {
            self.state = SearchState::Idle;
            self.authoritative = None;
            self.results.clear();
            self.error = None;
            self.settled_token = None;
            log::debug!("Search query {:?} too short, idle", query);
            return None;
        }

        self.last_token += 1;
        self.authoritative = Some(self.last_token);
        self.state = SearchState::Pending;

        let dispatch = SearchDispatch {
            token: self.last_token,
            query,
            limit: self.config.result_limit,
        };
        log::debug!("Dispatching search {} for {:?}", dispatch.token, dispatch.query);
        Some(dispatch)
    }

    /// Apply the answer to a dispatched lookup.
    ///
    /// Only the most recently dispatched session is applied; anything older
    /// is dropped no matter when it arrives.
    pub fn apply_response(
        &mut self,
        token: u64,
        response: Result<Vec<Destination>, LookupError>,
    ) -> ResponseOutcome {
        if self.authoritative != Some(token) {
            log::debug!(
                "Discarding superseded search {} (latest {:?})",
                token,
                self.authoritative
            );
            return ResponseOutcome::Superseded;
        }

        // a newer keystroke may already be debouncing
        self.state = if self.deadline.is_some() {
            SearchState::Debouncing
        } else {
            SearchState::Settled
        };
        self.settled_token = Some(token);

        match response {
            Ok(mut destinations) => {
                destinations.truncate(self.config.result_limit);
                self.results = destinations;
                self.error = None;
                ResponseOutcome::Applied
            }
            Err(err) => {
                log::warn!("Destination search {} failed: {}", token, err);
                self.results.clear();
                self.error = Some(err);
                ResponseOutcome::Failed
            }
        }
    }

    /// Drop all state, as when the host tears the search box down.
    pub fn reset(&mut self) {
        let config = self.config;
        let last_token = self.last_token;
        *self = Self::new(config);
        // keep tokens monotonic so stragglers stay superseded
        self.last_token = last_token;
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            state: self.state,
            query: self.query.clone(),
            results: self.results.clone(),
            error: self.error.as_ref().map(|err| err.to_string()),
            settled_token: self.settled_token,
        }
    }
}
