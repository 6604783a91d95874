// Destination module
// Read-only destinations offered by the search collaborator

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::PersistenceError;

/// Nightly price held as whole cents so totals never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents >= 0).then_some(Self { cents })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Price from a JSON number such as `99.5`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = value * 100.0;
        // `as i64` would saturate at i64::MAX
        if scaled >= i64::MAX as f64 {
            return None;
        }
        let rounded = scaled.round();
        // more than two fractional digits
        if (scaled - rounded).abs() > 1e-6 {
            return None;
        }
        Self::from_cents(rounded as i64)
    }
}

impl FromStr for Price {
    type Err = String;

    /// Parses decimal strings like `"287.00"`, `"99"` or `"12.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("'{}' is not a non-negative decimal price", s));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("'{}' must have at most two decimal places", s));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| format!("'{}' is out of range", s))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(|cents| Price { cents })
            .ok_or_else(|| format!("'{}' is out of range", s))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Price band of a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DestinationCategory {
    Luxury,
    Comfort,
    Basic,
    /// Any label the store returns that is not one of the known bands
    Other(String),
}

impl DestinationCategory {
    pub fn as_str(&self) -> &str {
        match self {
            DestinationCategory::Luxury => "Luxury",
            DestinationCategory::Comfort => "Comfort",
            DestinationCategory::Basic => "Basic",
            DestinationCategory::Other(label) => label,
        }
    }
}

impl From<&str> for DestinationCategory {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "luxury" => DestinationCategory::Luxury,
            "comfort" => DestinationCategory::Comfort,
            "basic" => DestinationCategory::Basic,
            _ => DestinationCategory::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for DestinationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub price_per_night: Price,
    pub category: DestinationCategory,
}

impl Destination {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price_per_night: Price,
        category: impl Into<DestinationCategory>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price_per_night,
            category: category.into(),
        }
    }

    /// Label shown next to the name in the autocomplete list.
    pub fn nightly_label(&self) -> String {
        format!("${}/night", self.price_per_night)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let payload: DestinationPayload = serde_json::from_str(json)
            .map_err(|e| PersistenceError::InvalidPayload(e.to_string()))?;
        Destination::try_from(payload)
    }
}

/// Wire shape of a destination. The price may arrive as a decimal string
/// (`"287.00"`) or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPayload {
    pub id: i64,
    pub name: String,
    pub price_per_night: RawPrice,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

impl TryFrom<DestinationPayload> for Destination {
    type Error = PersistenceError;

    fn try_from(payload: DestinationPayload) -> Result<Self, Self::Error> {
        if payload.name.trim().is_empty() {
            return Err(PersistenceError::InvalidPayload(
                "destination name cannot be empty".to_string(),
            ));
        }

        let price = match payload.price_per_night {
            RawPrice::Text(text) => text
                .parse::<Price>()
                .map_err(PersistenceError::InvalidPayload)?,
            RawPrice::Number(n) => Price::from_f64(n).ok_or_else(|| {
                PersistenceError::InvalidPayload(format!("'{}' is not a valid price", n))
            })?,
        };

        Ok(Destination::new(
            payload.id,
            payload.name,
            price,
            payload.category.as_str(),
        ))
    }
}
