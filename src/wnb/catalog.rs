// src/wnb/catalog.rs
//! Built-in aircraft profiles

use super::{
    envelope::{Envelope, EnvelopePoint},
    profile::AircraftProfile,
    station::StationEntry,
};

/// Names of the built-in profiles, in catalog order
pub const BUILTIN_NAMES: [&str; 5] = ["Default", "C172R", "PA23-250", "PA28R-200B", "RV-10"];

fn profile(
    make: &str,
    model: &str,
    reg: &str,
    envelope: Envelope,
    polygon: &[(f64, f64)],
    stations: &[(&str, f64, f64)],
) -> AircraftProfile {
    let mut profile = AircraftProfile::new(make, model, reg, envelope).with_cg_envelope(
        polygon
            .iter()
            .map(|&(arm, weight)| EnvelopePoint::new(arm, weight))
            .collect(),
    );
    // Catalog entries stay well under MAX_STATIONS
    profile.stations = stations
        .iter()
        .map(|&(description, location, weight)| StationEntry::new(description, location, weight))
        .collect::<Vec<_>>()
        .try_into()
        .unwrap_or_default();
    profile
}

pub fn default_profile() -> AircraftProfile {
    profile(
        "Make",
        "Default",
        "Reg",
        Envelope::default(),
        &[],
        &[
            ("Empty Weight", 0.0, 0.0),
            ("Pilot", 0.0, 0.0),
            ("Passenger", 0.0, 0.0),
            ("Fuel", 0.0, 0.0),
            ("Baggage", 0.0, 0.0),
        ],
    )
}

pub fn cessna_172r() -> AircraftProfile {
    profile(
        "Cessna",
        "C172R",
        "N172R",
        Envelope::new(35.0, 47.3, 2450.0).with_empty_weight(1642.0),
        &[(35.0, 1500.0), (35.0, 1950.0), (38.5, 2450.0), (47.3, 2450.0), (47.3, 1500.0)],
        &[
            ("Empty Weight", 39.5, 1642.0),
            ("Pilot & Front", 37.0, 340.0),
            ("Rear Seats", 73.0, 0.0),
            ("Fuel (53 gal)", 48.0, 318.0),
            ("Baggage A", 95.0, 0.0),
            ("Baggage B", 123.0, 0.0),
        ],
    )
}

pub fn piper_pa23_250() -> AircraftProfile {
    profile(
        "Piper",
        "PA23-250",
        "N5250Y",
        Envelope::new(82.0, 93.0, 5200.0).with_empty_weight(3180.0),
        &[(82.0, 3400.0), (82.0, 4000.0), (88.0, 5200.0), (93.0, 5200.0), (93.0, 3400.0)],
        &[
            ("Empty Weight", 85.5, 3180.0),
            ("Pilot & Front", 85.5, 340.0),
            ("Middle Seats", 119.0, 0.0),
            ("Rear Seats", 155.0, 0.0),
            ("Fuel", 93.0, 600.0),
            ("Nose Baggage", 15.0, 0.0),
            ("Aft Baggage", 178.0, 0.0),
        ],
    )
}

pub fn piper_pa28r_200b() -> AircraftProfile {
    profile(
        "Piper",
        "PA28R-200B",
        "N2828R",
        Envelope::new(80.0, 91.5, 2650.0).with_empty_weight(1660.0),
        &[(80.0, 1600.0), (80.0, 1950.0), (85.0, 2650.0), (91.5, 2650.0), (91.5, 1600.0)],
        &[
            ("Empty Weight", 85.0, 1660.0),
            ("Pilot & Front", 80.5, 340.0),
            ("Rear Seats", 118.1, 0.0),
            ("Fuel (48 gal)", 95.0, 288.0),
            ("Baggage", 142.8, 0.0),
        ],
    )
}

pub fn vans_rv10() -> AircraftProfile {
    profile(
        "Vans",
        "RV-10",
        "N10RV",
        Envelope::new(107.84, 116.24, 2700.0).with_empty_weight(1600.0),
        &[(107.84, 1800.0), (107.84, 2700.0), (116.24, 2700.0), (116.24, 1800.0)],
        &[
            ("Empty Weight", 109.0, 1600.0),
            ("Pilot & Front", 114.5, 340.0),
            ("Rear Seats", 151.0, 0.0),
            ("Fuel (60 gal)", 108.5, 360.0),
            ("Baggage", 175.0, 40.0),
        ],
    )
}

/// All built-in profiles; the screen starts on the last one
pub fn builtin_profiles() -> Vec<AircraftProfile> {
    vec![
        default_profile(),
        cessna_172r(),
        piper_pa23_250(),
        piper_pa28r_200b(),
        vans_rv10(),
    ]
}

/// Look up a built-in profile by model, registration or display name
pub fn find(name: &str) -> Option<AircraftProfile> {
    builtin_profiles().into_iter().find(|p| p.matches(name))
}
