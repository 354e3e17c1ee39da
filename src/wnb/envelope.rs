// src/wnb/envelope.rs
//! Approved loading envelope

use crate::error::{Result, WnbError};
use super::station::format_field;
use serde::{Deserialize, Serialize};

/// CG and weight limits; a zero limit means "not configured yet"
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub cg_min: f64,
    pub cg_max: f64,
    pub gross_weight_max: f64,
    /// Informational only, never used in the computation
    pub empty_weight: f64,
}

impl Envelope {
    pub fn new(cg_min: f64, cg_max: f64, gross_weight_max: f64) -> Self {
        Self {
            cg_min,
            cg_max,
            gross_weight_max,
            empty_weight: 0.0,
        }
    }

    pub fn with_empty_weight(mut self, empty_weight: f64) -> Self {
        self.empty_weight = empty_weight;
        self
    }

    /// True when every limit needed for a verdict is non-zero
    pub fn is_configured(&self) -> bool {
        self.cg_min != 0.0 && self.cg_max != 0.0 && self.gross_weight_max != 0.0
    }

    pub fn cg_within(&self, cg: f64) -> bool {
        cg >= self.cg_min && cg <= self.cg_max
    }

    pub fn weight_within(&self, weight: f64) -> bool {
        weight <= self.gross_weight_max
    }

    /// Check cg_min <= cg_max when both are set
    pub fn validate(&self) -> Result<()> {
        if self.cg_min != 0.0 && self.cg_max != 0.0 && self.cg_min > self.cg_max {
            return Err(WnbError::Validation(format!(
                "CG min {} is aft of CG max {}",
                self.cg_min, self.cg_max
            )));
        }
        Ok(())
    }
}

/// One vertex of the CG envelope polygon used for charting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub arm: f64,
    pub weight: f64,
}

impl EnvelopePoint {
    pub fn new(arm: f64, weight: f64) -> Self {
        Self { arm, weight }
    }

    /// Format points as `arm,weight arm,weight ...`
    pub fn format_list(points: &[EnvelopePoint]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", format_field(p.arm), format_field(p.weight)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse `arm,weight` pairs separated by whitespace; malformed pairs are dropped
    pub fn parse_list(text: &str) -> Vec<EnvelopePoint> {
        text.split_whitespace()
            .filter_map(|pair| {
                let (arm, weight) = pair.split_once(',')?;
                let arm = arm.trim().parse::<f64>().ok()?;
                let weight = weight.trim().parse::<f64>().ok()?;
                Some(EnvelopePoint::new(arm, weight))
            })
            .collect()
    }
}
