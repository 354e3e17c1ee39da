// src/lib.rs
//! Weight & Balance Library
//!
//! Computes aircraft gross weight and center of gravity from loading
//! stations and checks them against the approved envelope. Around the
//! pure calculator sit the screen adapter, a profile store and a GPS
//! keep-alive used while the screen is visible.

pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod screen;
pub mod store;
pub mod wnb;

// Re-export main types for convenience
pub use error::{Result, WnbError};
pub use screen::{WnbForm, WnbScreen};
pub use wnb::{compute, AircraftProfile, ComputationResult, Envelope, StationEntry, Status};
