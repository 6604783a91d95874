// Drag rescheduling
//
// Moves a trip along the grid by dragging it horizontally.
// - The pointer delta is converted to whole days (round half away from zero)
// - Start and end move together, so the duration never changes
// - Overlapping other trips is allowed; no conflict checks are made

use std::collections::HashMap;

use crate::error::{PersistenceError, ScheduleError};
use crate::models::trip::Trip;
use crate::services::ports::TripStore;

/// A drag gesture as reported by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragIntent {
    pub trip_id: i64,
    pub pixel_delta_x: f64,
    pub column_width_px: f64,
}

/// Whole-day offset for a horizontal pointer movement.
pub fn day_delta(pixel_delta_x: f64, column_width_px: f64) -> Result<i64, ScheduleError> {
    if !column_width_px.is_finite() || column_width_px <= 0.0 {
        return Err(ScheduleError::InvalidColumnWidth(column_width_px));
    }
    if !pixel_delta_x.is_finite() {
        return Err(ScheduleError::InvalidDragDelta(pixel_delta_x));
    }
    // f64::round rounds half away from zero
    Ok((pixel_delta_x / column_width_px).round() as i64)
}

/// Candidate trip after applying `intent`. Nothing is committed.
///
/// A drag that rounds to zero days returns the trip unchanged, so callers can
/// compare against the input to skip a spurious update.
pub fn reschedule(trip: &Trip, intent: &DragIntent) -> Result<Trip, ScheduleError> {
    if intent.trip_id != trip.id {
        return Err(ScheduleError::TripNotFound { id: intent.trip_id });
    }
    trip.validate_range()?;

    let days = day_delta(intent.pixel_delta_x, intent.column_width_px)?;
    if days == 0 {
        return Ok(trip.clone());
    }
    trip.shifted(days)
}

/// Identifies one in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragHandle(u64);

impl DragHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of a completed drag: the trip as it was and the candidate to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripUpdate {
    pub original: Trip,
    pub candidate: Trip,
    pub day_delta: i64,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    original: Trip,
    pixel_delta_x: f64,
}

/// Two-phase drag protocol: begin, preview any number of times, then end
/// (yielding a commit intent) or cancel.
pub struct DragRescheduler {
    column_width_px: f64,
    next_handle: u64,
    active: HashMap<u64, ActiveDrag>,
}

impl DragRescheduler {
    pub fn new(column_width_px: f64) -> Result<Self, ScheduleError> {
        if !column_width_px.is_finite() || column_width_px <= 0.0 {
            return Err(ScheduleError::InvalidColumnWidth(column_width_px));
        }

        Ok(Self {
            column_width_px,
            next_handle: 1,
            active: HashMap::new(),
        })
    }

    pub fn column_width_px(&self) -> f64 {
        self.column_width_px
    }

    /// Number of drags started but not yet ended or cancelled.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Start dragging `trip_id`, snapshotting it from `trips`.
    pub fn begin_drag(
        &mut self,
        trips: &[Trip],
        trip_id: i64,
    ) -> Result<DragHandle, ScheduleError> {
        let trip = trips
            .iter()
            .find(|trip| trip.id == trip_id)
            .ok_or(ScheduleError::TripNotFound { id: trip_id })?;
        trip.validate_range()?;

        let handle = DragHandle(self.next_handle);
        self.next_handle += 1;
        self.active.insert(
            handle.0,
            ActiveDrag {
                original: trip.clone(),
                pixel_delta_x: 0.0,
            },
        );

        log::debug!("Drag {} started for trip {}", handle.0, trip_id);
        Ok(handle)
    }

    /// Preview the trip at the pointer's current offset from the drag origin.
    pub fn update_drag(
        &mut self,
        handle: DragHandle,
        pixel_delta_x: f64,
    ) -> Result<Trip, ScheduleError> {
        let column_width_px = self.column_width_px;
        let drag = self
            .active
            .get_mut(&handle.0)
            .ok_or(ScheduleError::UnknownDragHandle(handle.0))?;

        let intent = Self::intent(drag, pixel_delta_x, column_width_px);
        let candidate = reschedule(&drag.original, &intent)?;
        drag.pixel_delta_x = pixel_delta_x;
        Ok(candidate)
    }

    /// Finish the drag. Returns `None` when the trip did not move.
    pub fn end_drag(
        &mut self,
        handle: DragHandle,
    ) -> Result<Option<TripUpdate>, ScheduleError> {
        let drag = self
            .active
            .remove(&handle.0)
            .ok_or(ScheduleError::UnknownDragHandle(handle.0))?;

        let days = day_delta(drag.pixel_delta_x, self.column_width_px)?;
        if days == 0 {
            log::debug!(
                "Drag {} ended without moving trip {}",
                handle.0,
                drag.original.id
            );
            return Ok(None);
        }

        let candidate = drag.original.shifted(days)?;
        log::debug!(
            "Drag {} moved trip {} by {} days to {}..{}",
            handle.0,
            drag.original.id,
            days,
            candidate.start_date,
            candidate.end_date
        );

        Ok(Some(TripUpdate {
            original: drag.original,
            candidate,
            day_delta: days,
        }))
    }

    /// Abandon the drag, returning the untouched trip.
    pub fn cancel_drag(&mut self, handle: DragHandle) -> Result<Trip, ScheduleError> {
        self.active
            .remove(&handle.0)
            .map(|drag| drag.original)
            .ok_or(ScheduleError::UnknownDragHandle(handle.0))
    }

    /// End the drag and forward the update to `store`.
    ///
    /// The returned trip is whatever the store persisted. On a store failure
    /// the drag is already closed; retrying means starting a new drag.
    pub fn commit_drag<S: TripStore + ?Sized>(
        &mut self,
        store: &S,
        handle: DragHandle,
    ) -> Result<Option<Trip>, PersistenceError> {
        let Some(update) = self.end_drag(handle)? else {
            return Ok(None);
        };

        match store.upsert_trip(&update.candidate) {
            Ok(saved) => Ok(Some(saved)),
            Err(err) => {
                log::warn!("Failed to save moved trip {}: {}", update.candidate.id, err);
                Err(err)
            }
        }
    }

    fn intent(drag: &ActiveDrag, pixel_delta_x: f64, column_width_px: f64) -> DragIntent {
        DragIntent {
            trip_id: drag.original.id,
            pixel_delta_x,
            column_width_px,
        }
    }
}
