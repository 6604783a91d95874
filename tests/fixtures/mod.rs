// Test fixtures - reusable test data
// Provides consistent trips and destinations across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use travel_calendar::models::destination::Price;
use travel_calendar::models::trip::{NewTrip, Trip};
use travel_calendar::services::destination::DestinationService;
use travel_calendar::services::grid::GridWindow;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Sunday June 2, 2024, the anchor of the sample window
    pub fn window_anchor() -> NaiveDate {
        ymd(2024, 6, 2)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Four-week window starting on the sample anchor
pub fn june_window() -> GridWindow {
    GridWindow::default_at(dates::window_anchor()).unwrap()
}

/// Sample trips for testing
pub mod trips {
    use super::*;

    /// Three days in Hanoi, columns 3..=5 of the sample window
    pub fn hanoi() -> NewTrip {
        NewTrip::new("Hanoi, Vietnam", dates::ymd(2024, 6, 5), dates::ymd(2024, 6, 7)).unwrap()
    }

    /// Overlaps the Hanoi trip
    pub fn bangkok() -> NewTrip {
        NewTrip::new("Bangkok, Thailand", dates::ymd(2024, 6, 6), dates::ymd(2024, 6, 10))
            .unwrap()
            .color("#f97316")
            .unwrap()
    }

    /// Starts before the sample window
    pub fn bali() -> NewTrip {
        NewTrip::new("Bali, Indonesia", dates::ymd(2024, 5, 28), dates::ymd(2024, 6, 3)).unwrap()
    }

    /// Entirely after the sample window
    pub fn tokyo() -> NewTrip {
        NewTrip::new("Tokyo, Japan", dates::ymd(2024, 7, 15), dates::ymd(2024, 7, 20)).unwrap()
    }

    pub fn saved(id: i64, start: NaiveDate, end: NaiveDate) -> Trip {
        Trip::new(id, format!("Trip {}", id), start, end).unwrap()
    }
}

/// Small destination catalog
pub fn seed_destinations(service: &DestinationService) {
    let rows = [
        ("Bangkok, Thailand", 8_500, "Comfort"),
        ("Bali, Indonesia", 15_400, "Luxury"),
        ("Hanoi, Vietnam", 4_200, "Basic"),
        ("Ha Long Bay, Vietnam", 28_700, "Luxury"),
        ("Siem Reap, Cambodia", 6_100, "Comfort"),
    ];
    for (name, cents, category) in rows {
        service
            .insert(name, Price::from_cents(cents).unwrap(), category)
            .unwrap();
    }
}
