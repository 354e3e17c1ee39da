// src/gps/nmea.rs
//! Minimal NMEA inspection for link status

use super::link::GpsLink;

/// Update fix state from a single NMEA sentence.
///
/// Only GGA fix quality and RMC status are looked at; positions are
/// never decoded.
pub fn inspect_nmea_sentence(link: &mut GpsLink, line: &str) {
    let parts: Vec<&str> = line.split(',').collect();
    let talker_sentence = parts.first().map(|p| p.trim_start_matches('$')).unwrap_or("");

    if talker_sentence.len() < 5 {
        return;
    }

    match talker_sentence.get(2..) {
        Some("GGA") => {
            // Fix quality (field 6)
            if let Some(quality) = parts.get(6).and_then(|q| q.parse::<u8>().ok()) {
                link.has_fix = quality > 0;
            }
        }
        Some("RMC") => {
            // Status (field 2): A = active, V = void
            if let Some(status) = parts.get(2) {
                link.has_fix = *status == "A";
            }
        }
        _ => {}
    }
}
