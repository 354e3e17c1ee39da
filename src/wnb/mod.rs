// src/wnb/mod.rs
//! Weight and balance data and computation

pub mod calculator;
pub mod catalog;
pub mod envelope;
pub mod profile;
pub mod station;

pub use calculator::{compute, ComputationResult, Status};
pub use envelope::{Envelope, EnvelopePoint};
pub use profile::AircraftProfile;
pub use station::{StationEntry, StationList, MAX_STATIONS};
