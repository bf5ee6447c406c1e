#![cfg(feature = "serde")]

use pendula::{DriverConfig, HistoryPoint, PendulumConfig, PendulumState};

#[test]
fn config_survives_json() {
    let config = PendulumConfig::default().damping_si(0.25).mass2_si(2.0);

    let json = serde_json::to_string(&config).unwrap();
    let back: PendulumConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
}

#[test]
fn driver_config_survives_json() {
    let config = DriverConfig::default().substeps(20).sample_rate_si(30.0);

    let json = serde_json::to_string(&config).unwrap();
    let back: DriverConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
}

#[test]
fn state_and_history_point_use_plain_fields() {
    let state = PendulumState::new(0.5, -0.25).with_velocities(1.0, 2.0);
    let value = serde_json::to_value(state).unwrap();
    assert_eq!(value["theta1"], 0.5);
    assert_eq!(value["omega2"], 2.0);

    let point: HistoryPoint =
        serde_json::from_str(r#"{"time":1.25,"theta1":30.0,"theta2":-12.5}"#).unwrap();
    assert_eq!(
        point,
        HistoryPoint {
            time: 1.25,
            theta1: 30.0,
            theta2: -12.5
        }
    );
}
