//! Trip layout engine.
//!
//! Turns a trip snapshot into grid placements for a [`GridWindow`]: starting
//! column, span, and a lane so overlapping trips stack instead of covering
//! each other. Placements are recomputed from scratch on every change.

use std::cmp::Ordering;

use crate::error::ScheduleError;
use crate::models::trip::Trip;
use crate::services::grid::GridWindow;
use crate::utils::date::days_between;

/// A trip positioned on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTrip {
    pub trip: Trip,
    /// Zero-based column of the first visible day
    pub start_column: usize,
    /// Visible columns covered, always at least 1
    pub span_columns: usize,
    /// Stacking row among overlapping trips; 0 is the top
    pub lane: usize,
    /// Trip starts before the window
    pub clipped_start: bool,
    /// Trip continues past the window
    pub clipped_end: bool,
}

impl PlacedTrip {
    /// Last column covered by this placement.
    pub fn end_column(&self) -> usize {
        self.start_column + self.span_columns - 1
    }

    pub fn covers_column(&self, column: usize) -> bool {
        self.start_column <= column && column <= self.end_column()
    }
}

/// Placements for one window, ordered by start date then trip id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub window: GridWindow,
    pub placements: Vec<PlacedTrip>,
}

impl GridLayout {
    /// Rows needed to draw every lane.
    pub fn lane_count(&self) -> usize {
        self.placements
            .iter()
            .map(|placed| placed.lane + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn placement_for(&self, trip_id: i64) -> Option<&PlacedTrip> {
        self.placements.iter().find(|placed| placed.trip.id == trip_id)
    }

    /// Placements drawn in `column`, top lane first.
    pub fn in_column(&self, column: usize) -> Vec<&PlacedTrip> {
        let mut found: Vec<&PlacedTrip> = self
            .placements
            .iter()
            .filter(|placed| placed.covers_column(column))
            .collect();
        found.sort_by_key(|placed| placed.lane);
        found
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

fn render_order(a: &Trip, b: &Trip) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| a.id.cmp(&b.id))
}

/// Lay `trips` out on `window`.
///
/// Any trip ending before it starts rejects the whole snapshot: the caller
/// gets [`ScheduleError::InvalidRange`] rather than a silently repaired grid.
/// Trips entirely outside the window are left out; trips crossing an edge
/// are clipped to the visible columns.
pub fn layout(trips: &[Trip], window: &GridWindow) -> Result<GridLayout, ScheduleError> {
    for trip in trips {
        if let Err(err) = trip.validate_range() {
            log::warn!("Rejecting trip snapshot: {}", err);
            return Err(err);
        }
    }

    let mut layout = GridLayout {
        window: *window,
        placements: Vec::new(),
    };

    let Some(window_end) = window.end() else {
        return Ok(layout);
    };

    let mut ordered: Vec<&Trip> = trips.iter().collect();
    ordered.sort_by(|a, b| render_order(a, b));

    // last occupied column per lane
    let mut lane_ends: Vec<usize> = Vec::new();

    for trip in ordered {
        if trip.end_date < window.anchor() || trip.start_date > window_end {
            continue;
        }

        let visible_start = trip.start_date.max(window.anchor());
        let visible_end = trip.end_date.min(window_end);

        let start_column = days_between(window.anchor(), visible_start) as usize;
        let span_columns = (days_between(visible_start, visible_end) + 1).max(1) as usize;
        let end_column = start_column + span_columns - 1;

        let lane = match lane_ends.iter().position(|&last| last < start_column) {
            Some(free) => {
                lane_ends[free] = end_column;
                free
            }
            None => {
                lane_ends.push(end_column);
                lane_ends.len() - 1
            }
        };

        layout.placements.push(PlacedTrip {
            trip: trip.clone(),
            start_column,
            span_columns,
            lane,
            clipped_start: trip.start_date < window.anchor(),
            clipped_end: trip.end_date > window_end,
        });
    }

    log::debug!(
        "Laid out {} of {} trips from {} across {} lanes",
        layout.placements.len(),
        trips.len(),
        window.anchor(),
        lane_ends.len()
    );

    Ok(layout)
}
