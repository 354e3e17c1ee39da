// src/wnb/station.rs
//! Loading stations (arm location and weight pairs)

use crate::error::{Result, WnbError};
use serde::{Deserialize, Serialize};

/// Number of stations a loading form can hold
pub const MAX_STATIONS: usize = 10;

/// Why a numeric field did not yield a value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Field left blank; contributes nothing
    Missing,
    /// Field has text that is not a real number
    Invalid(String),
}

/// Parse a numeric text field, distinguishing blank from malformed input
pub fn parse_field(text: &str) -> std::result::Result<f64, FieldError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::Invalid(trimmed.to_string())),
    }
}

/// Parse an optional numeric field: blank is `None`, malformed is an error
pub fn parse_optional(field: &str, text: &str) -> Result<Option<f64>> {
    match parse_field(text) {
        Ok(value) => Ok(Some(value)),
        Err(FieldError::Missing) => Ok(None),
        Err(FieldError::Invalid(bad)) => Err(WnbError::invalid_number(field, &bad)),
    }
}

/// Parse a field leniently, treating anything unparseable as zero
pub fn parse_lenient(text: &str) -> f64 {
    parse_field(text).unwrap_or(0.0)
}

/// Lenient parse that keeps blank distinct: blank is `None`, unparseable
/// text is zero
pub fn parse_lenient_optional(text: &str) -> Option<f64> {
    match parse_field(text) {
        Ok(value) => Some(value),
        Err(FieldError::Missing) => None,
        Err(FieldError::Invalid(_)) => Some(0.0),
    }
}

/// Format a value for a text field the way the form displays it
pub fn format_field(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    pub description: String,
    /// Arm, inches aft of the reference datum
    pub location: Option<f64>,
    pub weight: Option<f64>,
}

impl StationEntry {
    pub fn new(description: &str, location: f64, weight: f64) -> Self {
        Self {
            description: description.to_string(),
            location: Some(location),
            weight: Some(weight),
        }
    }

    /// An unused slot (no description, no values)
    pub fn unused() -> Self {
        Self {
            description: String::new(),
            location: None,
            weight: None,
        }
    }

    /// Build an entry from form text; `index` is only used in error messages
    pub fn from_text(index: usize, description: &str, location: &str, weight: &str) -> Result<Self> {
        Ok(Self {
            description: description.to_string(),
            location: parse_optional(&format!("station {} location", index), location)?,
            weight: parse_optional(&format!("station {} weight", index), weight)?,
        })
    }

    pub fn is_used(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Weight and location, when both are present
    pub fn loading(&self) -> Option<(f64, f64)> {
        match (self.weight, self.location) {
            (Some(weight), Some(location)) => Some((weight, location)),
            _ => None,
        }
    }

    pub fn moment(&self) -> Option<f64> {
        self.loading().map(|(weight, location)| weight * location)
    }
}

/// Ordered stations, never longer than [`MAX_STATIONS`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StationEntry>", into = "Vec<StationEntry>")]
pub struct StationList {
    entries: Vec<StationEntry>,
}

impl StationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: StationEntry) -> Result<()> {
        if self.entries.len() >= MAX_STATIONS {
            return Err(WnbError::TooManyStations(MAX_STATIONS));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StationEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[StationEntry] {
        &self.entries
    }
}

impl TryFrom<Vec<StationEntry>> for StationList {
    type Error = WnbError;

    fn try_from(entries: Vec<StationEntry>) -> Result<Self> {
        if entries.len() > MAX_STATIONS {
            return Err(WnbError::TooManyStations(MAX_STATIONS));
        }
        Ok(Self { entries })
    }
}

impl From<StationList> for Vec<StationEntry> {
    fn from(list: StationList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a StationList {
    type Item = &'a StationEntry;
    type IntoIter = std::slice::Iter<'a, StationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
