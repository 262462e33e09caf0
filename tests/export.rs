use std::fs::{self, File};

use flight_mech::aircraft::{AircraftConfiguration, DragPolar, Geometry, MassBreakdown};
use flight_mech::atmosphere::AtmosphereModel;
use flight_mech::export::sidecar::{self, Metadata};
use flight_mech::export::table;
use flight_mech::performance::{PerformanceSolver, TakeOffRoll};
use flight_mech::propulsion::ConstantThrust;
use flight_mech::summary::PerformanceSummary;
use tempfile::tempdir;

fn cessna() -> AircraftConfiguration {
    AircraftConfiguration::new(
        "cessna_172",
        MassBreakdown {
            empty_kg: 743.0,
            fuel_kg: 136.26,
            payload_kg: 183.0,
        },
        Geometry::new(16.2, 11.0),
        DragPolar::new(0.03, 0.05, 1.5),
    )
    .expect("valid aircraft")
}

#[test]
fn ground_roll_samples_export_as_csv() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let thrust = ConstantThrust::new(3_000.0, None).unwrap();
    let profile = solver
        .simulate_take_off(&TakeOffRoll::new(0.0, 0.03), &thrust)
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("runs/take_off.csv");
    let rows = table::write_csv_to_path(&path, &profile.samples).unwrap();
    assert_eq!(rows, profile.samples.len());

    let mut reader = csv::Reader::from_reader(File::open(&path).unwrap());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        [
            "time_s",
            "distance_m",
            "speed_m_s",
            "acceleration_m_s2",
            "thrust_n",
            "lift_n",
            "drag_n",
            "friction_n"
        ]
    );
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), rows);
    let last_distance: f64 = records.last().unwrap()[1].parse().unwrap();
    assert!((last_distance - profile.distance_m).abs() < 1e-9 * profile.distance_m);
}

#[test]
fn summary_sidecar_carries_metadata() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Linear;
    let summary = PerformanceSummary::evaluate(&aircraft, &atmosphere, 2_000.0, None).unwrap();

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("cessna.csv");
    let json_path = sidecar::sidecar_path(&csv_path, "summary");
    assert_eq!(json_path, dir.path().join("cessna_summary.json"));

    let meta = Metadata {
        aircraft: aircraft.name(),
        atmosphere: atmosphere.name(),
        altitude_m: 2_000.0,
    };
    sidecar::write_json(&json_path, &meta, &summary).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["aircraft"], "cessna_172");
    assert_eq!(value["atmosphere"], "linear");
    assert_eq!(value["altitude_m"], 2_000.0);
    assert_eq!(value["data"]["atmosphere"], "linear");
    assert_eq!(
        value["data"]["max_glide_ratio"].as_f64().unwrap(),
        summary.max_glide_ratio
    );
    assert!(value["data"]["ceiling_m"].is_null());
}
