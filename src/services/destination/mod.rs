//! Destination catalogue service.
//! SQLite-backed implementation of the [`DestinationLookup`] collaborator.

use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::{LookupError, PersistenceError};
use crate::models::destination::{Destination, Price};
use crate::services::database::Database;
use crate::services::ports::DestinationLookup;

/// Count and combined nightly price of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub count: usize,
    pub total_per_night: Price,
}

/// Service for querying destinations stored in SQLite.
pub struct DestinationService<'a> {
    conn: &'a Connection,
}

impl<'a> DestinationService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(
        &self,
        name: &str,
        price_per_night: Price,
        category: &str,
    ) -> Result<Destination, PersistenceError> {
        if name.trim().is_empty() {
            return Err(PersistenceError::InvalidPayload(
                "destination name cannot be empty".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO destinations (name, price_per_night_cents, category) VALUES (?1, ?2, ?3)",
            params![name, price_per_night.cents(), category],
        )?;

        Ok(Destination::new(
            self.conn.last_insert_rowid(),
            name,
            price_per_night,
            category,
        ))
    }

    pub fn list_all(&self) -> Result<Vec<Destination>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, price_per_night_cents, category FROM destinations ORDER BY id ASC",
        )?;

        let destinations = stmt
            .query_map([], map_destination_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(destinations)
    }

    /// Destinations whose name or category contains `query`, case-insensitively.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Destination>, LookupError> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Ok(vec![]);
        }

        let search_pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        let mut stmt = self.conn.prepare(
            "SELECT id, name, price_per_night_cents, category
             FROM destinations
             WHERE LOWER(name) LIKE ?1 ESCAPE '\\'
                OR LOWER(category) LIKE ?1 ESCAPE '\\'
             ORDER BY name ASC, id ASC
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let destinations = stmt
            .query_map(params![search_pattern, limit], map_destination_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(destinations)
    }

    pub fn summary(&self) -> Result<CatalogSummary, PersistenceError> {
        let (count, total_cents): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(price_per_night_cents), 0) FROM destinations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let total_per_night = Price::from_cents(total_cents).ok_or_else(|| {
            PersistenceError::InvalidPayload(format!(
                "catalogue total of {} cents is negative",
                total_cents
            ))
        })?;

        Ok(CatalogSummary {
            count: count as usize,
            total_per_night,
        })
    }
}

impl DestinationLookup for DestinationService<'_> {
    fn search_destinations(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Destination>, LookupError> {
        self.search(query, limit)
    }
}

/// Destination lookup that owns its connection, so it can be shared with
/// the background search task.
pub struct SharedDestinationLookup {
    db: Mutex<Database>,
}

impl SharedDestinationLookup {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::open(path)?;
        db.initialize_schema()?;
        Ok(Self::new(db))
    }
}

impl DestinationLookup for SharedDestinationLookup {
    fn search_destinations(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Destination>, LookupError> {
        let db = self
            .db
            .lock()
            .map_err(|_| LookupError::Backend("destination store lock poisoned".to_string()))?;
        DestinationService::new(db.connection()).search(query, limit)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn map_destination_row(row: &Row) -> rusqlite::Result<Destination> {
    let cents: i64 = row.get(2)?;
    let price = Price::from_cents(cents).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Integer,
            Box::new(PersistenceError::InvalidPayload(format!(
                "negative nightly price of {} cents",
                cents
            ))),
        )
    })?;
    let category: String = row.get(3)?;
    Ok(Destination::new(
        row.get(0)?,
        row.get::<_, String>(1)?,
        price,
        category.as_str(),
    ))
}
