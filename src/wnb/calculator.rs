// src/wnb/calculator.rs
//! Center of gravity and gross weight computation

use super::{envelope::Envelope, station::StationEntry};
use serde::{Deserialize, Serialize};

/// Verdict for one check; `Neutral` means there is not enough data yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Neutral,
    Ok,
    Fail,
}

impl Status {
    fn check(neutral: bool, within: bool) -> Self {
        if neutral {
            Status::Neutral
        } else if within {
            Status::Ok
        } else {
            Status::Fail
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Neutral => "",
            Status::Ok => "OK",
            Status::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub total_weight: f64,
    pub center_of_gravity: f64,
    pub weight_status: Status,
    pub cg_status: Status,
    pub overall_status: Status,
}

impl ComputationResult {
    pub fn weight_ok(&self) -> bool {
        self.weight_status.is_ok()
    }

    pub fn cg_ok(&self) -> bool {
        self.cg_status.is_ok()
    }

    pub fn overall_ok(&self) -> bool {
        self.overall_status.is_ok()
    }

    pub fn total_moment(&self) -> f64 {
        self.total_weight * self.center_of_gravity
    }
}

/// Compute total weight, CG and verdicts for a set of stations.
///
/// Stations missing a weight or a location are skipped. The overall
/// verdict stays `Neutral` until the envelope limits and both computed
/// values are non-zero.
pub fn compute<'a, I>(stations: I, envelope: &Envelope) -> ComputationResult
where
    I: IntoIterator<Item = &'a StationEntry>,
{
    let (total_weight, total_moment) = stations
        .into_iter()
        .filter_map(StationEntry::loading)
        .fold((0.0, 0.0), |(weight, moment), (w, l)| (weight + w, moment + w * l));

    let center_of_gravity = if total_weight > 0.0 {
        total_moment / total_weight
    } else {
        0.0
    };

    let cg_status = Status::check(center_of_gravity == 0.0, envelope.cg_within(center_of_gravity));
    let weight_status = Status::check(total_weight == 0.0, envelope.weight_within(total_weight));

    let incomplete = !envelope.is_configured() || center_of_gravity == 0.0 || total_weight == 0.0;
    let overall_status = Status::check(
        incomplete,
        cg_status != Status::Fail && weight_status != Status::Fail,
    );

    ComputationResult {
        total_weight,
        center_of_gravity,
        weight_status,
        cg_status,
        overall_status,
    }
}
