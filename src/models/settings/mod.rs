// Settings module
// Tunables for the grid, drag gestures and destination search

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::trip::{validate_color, DEFAULT_TRIP_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Days shown in the grid window
    pub window_length_days: u32,
    /// Width of one day column in pixels, used to turn drag distance into days
    pub column_width_px: f64,
    pub search_debounce_ms: u64,
    pub search_min_query_len: usize,
    pub search_result_limit: usize,
    pub default_trip_color: String,
    /// SQLite file; `None` means the platform data directory
    pub database_path: Option<PathBuf>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            window_length_days: 28,
            column_width_px: 100.0,
            search_debounce_ms: 300,
            search_min_query_len: 2,
            search_result_limit: 5,
            default_trip_color: DEFAULT_TRIP_COLOR.to_string(),
            database_path: None,
        }
    }
}

impl PlannerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_length_days == 0 {
            return Err("window_length_days must be at least 1".to_string());
        }

        if !self.column_width_px.is_finite() || self.column_width_px <= 0.0 {
            return Err("column_width_px must be a positive number".to_string());
        }

        if self.search_result_limit == 0 {
            return Err("search_result_limit must be at least 1".to_string());
        }

        validate_color(&self.default_trip_color).map_err(|e| e.to_string())?;

        Ok(())
    }
}
