//! Collaborator interfaces consumed by the scheduling engine.
//!
//! The engine never persists anything itself: trips are read as snapshots
//! from a [`TripStore`] and update intents are handed back to it, and
//! destinations come from a [`DestinationLookup`].

use crate::error::{LookupError, PersistenceError};
use crate::models::destination::Destination;
use crate::models::trip::Trip;

/// Trip persistence.
#[cfg_attr(test, mockall::automock)]
pub trait TripStore {
    fn list_trips(&self) -> Result<Vec<Trip>, PersistenceError>;

    /// Insert `candidate` under its id, or replace the stored trip with that id.
    fn upsert_trip(&self, candidate: &Trip) -> Result<Trip, PersistenceError>;

    fn delete_trip(&self, id: i64) -> Result<(), PersistenceError>;
}

/// Destination search.
#[cfg_attr(test, mockall::automock)]
pub trait DestinationLookup {
    /// At most `limit` destinations matching `query`, in display order.
    fn search_destinations(&self, query: &str, limit: usize)
        -> Result<Vec<Destination>, LookupError>;
}
