// src/gps/link.rs
//! State of the kept-alive GPS link

use chrono::{DateTime, Utc};

/// What the keep-alive has observed on the GPS stream
#[derive(Debug, Clone, Default)]
pub struct GpsLink {
    pub source: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub sentences: u64,
    pub has_fix: bool,
}

impl GpsLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one line received from `source`
    pub fn record(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.last_seen = Some(Utc::now());
        self.sentences += 1;
    }

    /// Age of the last received line in seconds
    pub fn age_seconds(&self) -> Option<i64> {
        self.last_seen.map(|ts| Utc::now().signed_duration_since(ts).num_seconds())
    }

    /// Data arrived within the last 10 seconds
    pub fn is_recent(&self) -> bool {
        self.age_seconds().map_or(false, |age| age < 10)
    }

    pub fn describe(&self) -> String {
        match (&self.source, self.age_seconds()) {
            (Some(source), Some(age)) => format!(
                "{} ({}, {}s ago)",
                source,
                if self.has_fix { "fix" } else { "no fix" },
                age
            ),
            _ => "waiting for data".to_string(),
        }
    }
}
