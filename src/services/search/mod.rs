//! Destination search: debounced, last-issued-wins lookups.
//!
//! [`DestinationSearchController`] is the synchronous state machine, driven
//! by explicit instants so it can be stepped deterministically.
//! [`SearchDriver`] runs one controller on the tokio runtime for a host UI.

use std::time::Duration;

use crate::models::settings::PlannerSettings;

mod controller;
mod driver;

pub use controller::{
    DestinationSearchController, ResponseOutcome, SearchDispatch, SearchSnapshot, SearchState,
};
pub use driver::{SearchDriver, SearchHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a lookup is dispatched
    pub debounce: Duration,
    /// Shorter queries never reach the lookup and clear the results
    pub min_query_len: usize,
    /// Maximum number of destinations published
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 2,
            result_limit: 5,
        }
    }
}

impl From<&PlannerSettings> for SearchConfig {
    fn from(settings: &PlannerSettings) -> Self {
        Self {
            debounce: Duration::from_millis(settings.search_debounce_ms),
            min_query_len: settings.search_min_query_len,
            result_limit: settings.search_result_limit,
        }
    }
}
