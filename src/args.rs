use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

use travel_calendar::utils::date::parse_iso_date;

/// Travel planning calendar
///
/// Lays planned trips out on a day grid, moves them by drag distance and
/// searches the destination catalog.
#[derive(Debug, Parser)]
#[command(version, about, name = "travel-calendar")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to the configured
    /// `database_path`, then $XDG_DATA_HOME/travel-calendar/trips.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Commands {
    /// Print the trip grid for a window (today when no date is given)
    Show(ShowArgs),
    /// Plan a trip; without an end date it covers a single day
    Add(AddArgs),
    /// Search destinations by name or category
    #[command(alias = "s")]
    Search(SearchArgs),
    /// Drag a trip by a horizontal pixel distance and save it
    Move(MoveArgs),
}

#[derive(Debug, PartialEq, ClapArgs)]
pub struct ShowArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub anchor: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, ClapArgs)]
pub struct AddArgs {
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub start: NaiveDate,
    /// Last day of the trip, inclusive (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub end: Option<NaiveDate>,
    /// Display colour (#RGB or #RRGGBB); defaults to `default_trip_color`
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Debug, PartialEq, ClapArgs)]
pub struct SearchArgs {
    /// Search text; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl SearchArgs {
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Debug, PartialEq, ClapArgs)]
pub struct MoveArgs {
    pub trip_id: i64,
    /// Horizontal pointer distance; negative moves earlier
    #[arg(allow_negative_numbers = true)]
    pub pixels: f64,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
}
