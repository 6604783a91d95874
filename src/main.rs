// Travel Calendar
// Command-line front end over the scheduling engine

mod args;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use args::{AddArgs, Args, Commands, MoveArgs, SearchArgs, ShowArgs};
use chrono::{Datelike, Local};
use clap::Parser;

use travel_calendar::models::settings::PlannerSettings;
use travel_calendar::models::trip::NewTrip;
use travel_calendar::services::database::Database;
use travel_calendar::services::destination::SharedDestinationLookup;
use travel_calendar::services::drag::DragRescheduler;
use travel_calendar::services::grid::{dates_in_window, weekday_headers, GridWindow};
use travel_calendar::services::layout::{layout, GridLayout};
use travel_calendar::services::ports::TripStore;
use travel_calendar::services::search::{
    SearchConfig, SearchDriver, SearchSnapshot, SearchState,
};
use travel_calendar::services::settings::SettingsService;
use travel_calendar::services::trip::TripService;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        command,
    } = Args::parse();

    let mut settings = SettingsService::with_default_path()?.load()?;
    if database_file.is_some() {
        settings.database_path = database_file;
    }
    let db_path = SettingsService::resolve_database_path(&settings)?;
    log::info!("Starting Travel Calendar with {}", db_path.display());

    match command {
        None => show(&settings, &db_path, ShowArgs { anchor: None }),
        Some(Commands::Show(args)) => show(&settings, &db_path, args),
        Some(Commands::Add(args)) => add_trip(&settings, &db_path, args),
        Some(Commands::Search(args)) => search(&settings, &db_path, args).await,
        Some(Commands::Move(args)) => move_trip(&settings, &db_path, args),
    }
}

fn open_database(path: &Path) -> Result<Database> {
    let db = Database::open(path)?;
    db.initialize_schema()?;
    Ok(db)
}

fn show(settings: &PlannerSettings, db_path: &Path, args: ShowArgs) -> Result<()> {
    let anchor = args.anchor.unwrap_or_else(|| Local::now().date_naive());
    let window = GridWindow::new(anchor, settings.window_length_days)?;

    let db = open_database(db_path)?;
    let trips = TripService::new(db.connection());

    let placed = layout(&trips.find_in_window(&window)?, &window)?;
    print!("{}", render_grid(&placed));
    Ok(())
}

fn render_grid(grid: &GridLayout) -> String {
    let dates = dates_in_window(&grid.window);
    let mut out = String::new();

    let headers = weekday_headers();
    for week in dates.chunks(7) {
        for date in week {
            let weekday = date.weekday().num_days_from_sunday() as usize;
            out.push_str(&format!("{} {:>2}  ", headers[weekday], date.day()));
        }
        out.push('\n');
    }

    for lane in 0..grid.lane_count() {
        let mut row = vec!['.'; dates.len()];
        for placed in grid.placements.iter().filter(|p| p.lane == lane) {
            let cells = row.iter_mut().skip(placed.start_column);
            for cell in cells.take(placed.span_columns) {
                *cell = '#';
            }
        }
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }

    for placed in &grid.placements {
        out.push_str(&format!(
            "[{}] lane {} col {}+{}  {}  {}..{}\n",
            placed.trip.id,
            placed.lane,
            placed.start_column,
            placed.span_columns,
            placed.trip.destination,
            placed.trip.start_date,
            placed.trip.end_date
        ));
    }
    out
}

fn add_trip(settings: &PlannerSettings, db_path: &Path, args: AddArgs) -> Result<()> {
    let AddArgs {
        destination,
        start,
        end,
        color,
    } = args;
    let draft = match end {
        Some(end) => NewTrip::new(destination, start, end)?,
        None => NewTrip::on_date(destination, start)?,
    }
    .color(color.unwrap_or_else(|| settings.default_trip_color.clone()))?;

    let db = open_database(db_path)?;
    let trip = TripService::new(db.connection()).create(draft)?;
    println!(
        "added trip {} to {} ({}..{})",
        trip.id, trip.destination, trip.start_date, trip.end_date
    );
    Ok(())
}

async fn search(settings: &PlannerSettings, db_path: &Path, args: SearchArgs) -> Result<()> {
    let text = args.query();
    let lookup = Arc::new(SharedDestinationLookup::open(db_path)?);
    let config = SearchConfig::from(settings);
    let mut handle = SearchDriver::spawn(lookup, config);

    handle.on_query_changed(text.as_str())?;
    let wait = config.debounce + Duration::from_secs(10);
    let finished = |s: &SearchSnapshot| {
        matches!(s.state, SearchState::Settled | SearchState::Idle) && s.query == text
    };
    let snapshot = tokio::time::timeout(wait, handle.wait_for(finished))
        .await
        .context("destination search timed out")??;

    if let Some(error) = snapshot.error {
        eprintln!("search failed: {}", error);
    }
    for destination in &snapshot.results {
        println!(
            "{:<32} {:<8} {}",
            destination.name,
            destination.category,
            destination.nightly_label()
        );
    }

    handle.shutdown().await;
    Ok(())
}

fn move_trip(settings: &PlannerSettings, db_path: &Path, args: MoveArgs) -> Result<()> {
    let MoveArgs { trip_id, pixels } = args;
    let db = open_database(db_path)?;
    let store = TripService::new(db.connection());
    let trips = store.list_trips()?;

    let mut drags = DragRescheduler::new(settings.column_width_px)?;
    let handle = drags.begin_drag(&trips, trip_id)?;
    let preview = drags.update_drag(handle, pixels)?;

    match drags.commit_drag(&store, handle)? {
        Some(saved) => println!(
            "moved trip {} to {}..{}",
            saved.id, saved.start_date, saved.end_date
        ),
        None => println!(
            "trip {} unchanged ({}..{})",
            preview.id, preview.start_date, preview.end_date
        ),
    }
    Ok(())
}
