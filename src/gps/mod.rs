// src/gps/mod.rs
//! GPS keep-alive for the calculator screen

pub mod gpsd;
pub mod keepalive;
pub mod link;
pub mod nmea;

pub use keepalive::{GpsKeepAlive, GpsSource, KeepAlive};
pub use link::GpsLink;
