// Property-based tests for the date grid, layout and drag rescheduling
// Checks placement and shifting rules over random windows and trip snapshots

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use travel_calendar::error::ScheduleError;
use travel_calendar::models::trip::Trip;
use travel_calendar::services::drag::{day_delta, reschedule, DragIntent};
use travel_calendar::services::grid::{dates_in_window, GridWindow};
use travel_calendar::services::layout::layout;
use travel_calendar::utils::date::{add_days, days_between};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

fn june_window() -> GridWindow {
    GridWindow::default_at(anchor()).unwrap()
}

/// Trips starting within a few weeks either side of the anchor.
fn trip_snapshot() -> impl Strategy<Value = Vec<Trip>> {
    prop::collection::vec((-40i64..60, 0i64..20), 0..25).prop_map(|ranges| {
        ranges
            .into_iter()
            .enumerate()
            .map(|(index, (offset, length))| {
                let id = index as i64 + 1;
                let start = add_days(anchor(), offset).unwrap();
                let end = add_days(start, length).unwrap();
                Trip::new(id, format!("Trip {}", id), start, end).unwrap()
            })
            .collect()
    })
}

/// Any representable anchor, including the last days chrono supports.
fn any_anchor() -> impl Strategy<Value = NaiveDate> {
    let first = NaiveDate::MIN.num_days_from_ce();
    let last = NaiveDate::MAX.num_days_from_ce();
    prop_oneof![
        (-3_000i64..3_000).prop_map(|offset| add_days(anchor(), offset).unwrap()),
        (0i64..120).prop_map(|back| add_days(NaiveDate::MAX, -back).unwrap()),
        (first..=last).prop_map(|days| NaiveDate::from_num_days_from_ce_opt(days).unwrap()),
    ]
}

proptest! {
    /// Property: a window lists exactly `length` consecutive days from its anchor
    #[test]
    fn prop_dates_in_window_are_consecutive(anchor in any_anchor(), length in 0u32..120) {
        match GridWindow::new(anchor, length) {
            Ok(window) => {
                let dates = dates_in_window(&window);
                prop_assert_eq!(dates.len(), length as usize);
                if let Some(first) = dates.first() {
                    prop_assert_eq!(*first, anchor);
                    prop_assert_eq!(dates.last().copied(), window.end());
                }
                for pair in dates.windows(2) {
                    prop_assert_eq!(pair[0].succ_opt(), Some(pair[1]));
                }
            }
            Err(err) => {
                // only windows running past the last supported date are refused
                prop_assert_eq!(err, ScheduleError::WindowOutOfRange { anchor, length });
                prop_assert!(add_days(anchor, i64::from(length) - 1).is_none());
            }
        }
    }

    /// Property: every placement stays inside the window
    #[test]
    fn prop_placements_fit_window(trips in trip_snapshot(), length in 1u32..60) {
        let window = GridWindow::new(anchor(), length).unwrap();
        let grid = layout(&trips, &window).unwrap();

        for placed in &grid.placements {
            prop_assert!(placed.span_columns >= 1);
            prop_assert!(placed.end_column() < length as usize);
        }
    }

    /// Property: a trip is placed exactly when it shares a day with the window
    #[test]
    fn prop_visible_trips_are_exactly_overlapping(trips in trip_snapshot()) {
        let window = june_window();
        let window_end = window.end().unwrap();
        let grid = layout(&trips, &window).unwrap();

        for trip in &trips {
            let overlaps = trip.start_date <= window_end && trip.end_date >= window.anchor();
            prop_assert_eq!(grid.placement_for(trip.id).is_some(), overlaps);
        }
    }

    /// Property: unclipped trips span one column per day
    #[test]
    fn prop_unclipped_span_matches_duration(trips in trip_snapshot()) {
        let window = june_window();
        let grid = layout(&trips, &window).unwrap();

        for placed in grid.placements.iter().filter(|p| !p.clipped_start && !p.clipped_end) {
            prop_assert_eq!(placed.span_columns as i64, placed.trip.duration_days());
            prop_assert_eq!(
                placed.start_column as i64,
                days_between(window.anchor(), placed.trip.start_date)
            );
        }
    }

    /// Property: trips sharing a lane never share a column
    #[test]
    fn prop_lanes_never_overlap(trips in trip_snapshot()) {
        let grid = layout(&trips, &june_window()).unwrap();

        for (i, a) in grid.placements.iter().enumerate() {
            for b in grid.placements.iter().skip(i + 1).filter(|b| b.lane == a.lane) {
                prop_assert!(a.end_column() < b.start_column || b.end_column() < a.start_column);
            }
        }
    }

    /// Property: placements come out ordered by start date then id
    #[test]
    fn prop_render_order_is_stable(trips in trip_snapshot()) {
        let window = june_window();
        let grid = layout(&trips, &window).unwrap();

        for pair in grid.placements.windows(2) {
            let (a, b) = (&pair[0].trip, &pair[1].trip);
            prop_assert!((a.start_date, a.id) < (b.start_date, b.id));
        }

        let mut reversed = trips.clone();
        reversed.reverse();
        prop_assert_eq!(layout(&reversed, &window).unwrap(), grid);
    }

    /// Property: a drag moves both ends by the same whole number of days
    #[test]
    fn prop_drag_preserves_duration(
        offset in -300i64..300,
        length in 0i64..30,
        pixels in -5000.0f64..5000.0,
        width in 20.0f64..200.0,
    ) {
        let start = add_days(anchor(), offset).unwrap();
        let end = add_days(start, length).unwrap();
        let trip = Trip::new(7, "Da Nang, Vietnam", start, end).unwrap();
        let intent = DragIntent { trip_id: 7, pixel_delta_x: pixels, column_width_px: width };

        let moved = reschedule(&trip, &intent).unwrap();
        let days = day_delta(pixels, width).unwrap();

        prop_assert_eq!(moved.duration_days(), trip.duration_days());
        prop_assert_eq!(days_between(trip.start_date, moved.start_date), days);
        prop_assert!((pixels / width - days as f64).abs() <= 0.5);
    }

    /// Property: a drag either keeps the duration or is refused, never clamped
    #[test]
    fn prop_huge_drag_never_resizes(
        length in 0i64..30,
        pixels in prop_oneof![-1e15f64..-1e6, 1e6f64..1e15],
    ) {
        let end = add_days(anchor(), length).unwrap();
        let trip = Trip::new(8, "Luang Prabang, Laos", anchor(), end).unwrap();
        let intent = DragIntent { trip_id: 8, pixel_delta_x: pixels, column_width_px: 1.0 };

        match reschedule(&trip, &intent) {
            Ok(moved) => prop_assert_eq!(moved.duration_days(), trip.duration_days()),
            Err(err) => {
                let out_of_range =
                    matches!(err, ScheduleError::DateOutOfRange { trip_id: 8, .. });
                prop_assert!(out_of_range);
            }
        }
    }
}
