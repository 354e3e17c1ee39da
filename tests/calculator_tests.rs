// tests/calculator_tests.rs
//! Calculator behavior through the public API

use wnb_calc::{
    compute,
    gps::{GpsKeepAlive, GpsSource},
    screen::WnbForm,
    wnb::StationList,
    Envelope, StationEntry, Status, WnbError, WnbScreen,
};

fn envelope() -> Envelope {
    Envelope::new(35.0, 45.0, 200.0)
}

fn form_with(rows: &[(&str, &str, &str)]) -> WnbForm {
    let mut form = WnbForm {
        cg_min: "35".to_string(),
        cg_max: "45".to_string(),
        gross: "200".to_string(),
        ..WnbForm::default()
    };
    for (row, &(description, location, weight)) in form.stations.iter_mut().zip(rows) {
        row.description = description.to_string();
        row.location = location.to_string();
        row.weight = weight.to_string();
    }
    form
}

#[test]
fn nominal_loading_is_ok() {
    let result = compute(&[StationEntry::new("Pilot", 40.0, 100.0)], &envelope());
    assert_eq!(result.total_weight, 100.0);
    assert_eq!(result.center_of_gravity, 40.0);
    assert!(result.cg_ok() && result.weight_ok() && result.overall_ok());
}

#[test]
fn overweight_fails_overall() {
    let result = compute(&[StationEntry::new("Cargo", 40.0, 250.0)], &envelope());
    assert!(!result.weight_ok());
    assert!(!result.overall_ok());
}

#[test]
fn aft_cg_fails() {
    let result = compute(&[StationEntry::new("Baggage", 50.0, 100.0)], &envelope());
    assert_eq!(result.center_of_gravity, 50.0);
    assert!(!result.cg_ok());
}

#[test]
fn envelope_bounds_are_inclusive() {
    for arm in [35.0, 45.0] {
        let result = compute(&[StationEntry::new("Pilot", arm, 100.0)], &envelope());
        assert_eq!(result.cg_status, Status::Ok, "arm {}", arm);
    }

    let result = compute(&[StationEntry::new("Pilot", 40.0, 200.0)], &envelope());
    assert_eq!(result.weight_status, Status::Ok);
    assert_eq!(result.overall_status, Status::Ok);
}

#[test]
fn zero_weight_is_neutral() {
    let stations = [
        StationEntry::new("Pilot", 40.0, 0.0),
        StationEntry::unused(),
    ];
    let result = compute(&stations, &envelope());
    assert_eq!(result.center_of_gravity, 0.0);
    assert_eq!(result.overall_status, Status::Neutral);
    assert_eq!(result.cg_status, Status::Neutral);
    assert_eq!(result.weight_status, Status::Neutral);
}

#[test]
fn totals_match_weighted_sum() {
    let loads = [(37.0, 170.0), (73.0, 145.5), (48.0, 120.0), (95.0, 20.0)];
    let stations: Vec<StationEntry> = loads
        .iter()
        .map(|&(arm, weight)| StationEntry::new("s", arm, weight))
        .chain(std::iter::once(StationEntry {
            description: "partial".to_string(),
            location: Some(123.0),
            weight: None,
        }))
        .collect();

    let result = compute(&stations, &Envelope::new(35.0, 47.3, 2450.0));
    let weight: f64 = loads.iter().map(|(_, w)| w).sum();
    let moment: f64 = loads.iter().map(|(a, w)| a * w).sum();

    assert!((result.total_weight - weight).abs() < 1e-9);
    assert!((result.center_of_gravity - moment / weight).abs() < 1e-9);
}

#[test]
fn compute_is_idempotent() {
    let mut stations = StationList::new();
    stations.push(StationEntry::new("Front", 37.0, 340.0)).unwrap();
    stations.push(StationEntry::new("Fuel", 48.0, 318.0)).unwrap();

    let env = Envelope::new(35.0, 47.3, 2450.0);
    assert_eq!(compute(&stations, &env), compute(&stations, &env));
}

#[test]
fn blank_form_is_neutral() {
    let result = form_with(&[("Pilot", "", ""), ("Fuel", "", "")]).calculate().unwrap();
    assert_eq!(result.total_weight, 0.0);
    assert_eq!(result.center_of_gravity, 0.0);
    assert_eq!(result.overall_status, Status::Neutral);
}

#[test]
fn malformed_weight_is_reported() {
    let err = form_with(&[("Pilot", "40", "abc")]).calculate().unwrap_err();
    assert!(matches!(err, WnbError::InvalidNumber { ref text, .. } if text == "abc"));
}

#[test]
fn form_matches_numeric_compute() {
    let result = form_with(&[("Pilot", "40", "100"), ("Bags", "", "30")]).calculate().unwrap();
    assert_eq!(result, compute(&[StationEntry::new("Pilot", 40.0, 100.0)], &envelope()));
}

#[test]
fn screen_round_trips_through_graph_json() {
    let mut screen = WnbScreen::new(GpsKeepAlive::new(GpsSource::None));
    screen.load_named("PA28R-200B").unwrap();

    let profile = wnb_calc::AircraftProfile::from_json(&screen.graph_json().unwrap()).unwrap();
    assert_eq!(profile.model, "PA28R-200B");
    assert!(profile.weight > 0.0);
    assert_eq!(profile.compute().overall_status, Status::Ok);
}
