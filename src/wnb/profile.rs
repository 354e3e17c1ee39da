// src/wnb/profile.rs
//! Aircraft weight and balance profiles

use crate::error::{Result, WnbError};
use super::{
    calculator::{compute, ComputationResult},
    envelope::{Envelope, EnvelopePoint},
    station::{StationEntry, StationList},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub make: String,
    pub model: String,
    pub reg: String,
    pub envelope: Envelope,
    /// Polygon of the approved CG envelope, for charting
    #[serde(default)]
    pub cg_envelope: Vec<EnvelopePoint>,
    pub stations: StationList,
    /// Last computed gross weight, recorded when the profile was extracted
    #[serde(default)]
    pub weight: f64,
    /// Last computed CG, recorded when the profile was extracted
    #[serde(default)]
    pub cg: f64,
}

impl AircraftProfile {
    pub fn new(make: &str, model: &str, reg: &str, envelope: Envelope) -> Self {
        Self {
            make: make.to_string(),
            model: model.to_string(),
            reg: reg.to_string(),
            envelope,
            ..Self::default()
        }
    }

    pub fn with_cg_envelope(mut self, points: Vec<EnvelopePoint>) -> Self {
        self.cg_envelope = points;
        self
    }

    pub fn add_station(&mut self, entry: StationEntry) -> Result<()> {
        self.stations.push(entry)
    }

    /// Name shown in profile lists: make, model and registration
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.make, self.model, self.reg)
    }

    pub fn compute(&self) -> ComputationResult {
        compute(&self.stations, &self.envelope)
    }

    /// Make, model and registration are all required to store a profile
    pub fn validate_identity(&self) -> Result<()> {
        let missing: Vec<&str> = [("make", &self.make), ("model", &self.model), ("reg", &self.reg)]
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WnbError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }

    /// Serialize for the CG chart view
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(WnbError::Json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.envelope.validate()?;
        Ok(profile)
    }

    /// Case-insensitive match on display name, model or registration
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.display_name().eq_ignore_ascii_case(name)
            || self.model.eq_ignore_ascii_case(name)
            || (!self.reg.is_empty() && self.reg.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AircraftProfile {
        let mut profile = AircraftProfile::new("Cessna", "172R", "N172R", Envelope::new(35.0, 47.3, 2450.0));
        profile.add_station(StationEntry::new("Empty", 39.5, 1642.0)).unwrap();
        profile.add_station(StationEntry::new("Front", 37.0, 340.0)).unwrap();
        profile
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample().display_name(), "Cessna 172R N172R");
    }

    #[test]
    fn test_validate_identity() {
        assert!(sample().validate_identity().is_ok());

        let mut profile = sample();
        profile.model = " ".to_string();
        profile.reg.clear();
        match profile.validate_identity() {
            Err(WnbError::Validation(msg)) => assert_eq!(msg, "missing model, reg"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_json_passthrough() {
        let profile = sample();
        let json = profile.to_json().unwrap();
        assert!(json.contains("\"make\": \"Cessna\""));
        assert_eq!(AircraftProfile::from_json(&json).unwrap(), profile);
    }

    #[test]
    fn test_from_json_rejects_inverted_envelope() {
        let mut profile = sample();
        profile.envelope = Envelope::new(47.3, 35.0, 2450.0);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(matches!(AircraftProfile::from_json(&json), Err(WnbError::Validation(_))));
    }

    #[test]
    fn test_matches() {
        let profile = sample();
        assert!(profile.matches("172r"));
        assert!(profile.matches("n172r"));
        assert!(profile.matches("Cessna 172R N172R"));
        assert!(!profile.matches("PA28"));
    }
}
