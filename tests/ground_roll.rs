use approx::assert_relative_eq;
use flight_mech::aircraft::{AircraftConfiguration, DragPolar, Geometry, MassBreakdown};
use flight_mech::atmosphere::AtmosphereModel;
use flight_mech::performance::{
    DragParachute, LandingRoll, PerformanceError, PerformanceSolver, TakeOffRoll,
};
use flight_mech::propulsion::{ConstantThrust, DensityScaledThrust, TaperedThrust};

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

fn engine() -> DensityScaledThrust {
    DensityScaledThrust::new(6_000.0, 1.0, AtmosphereModel::Linear, None).expect("valid engine")
}

#[test]
fn take_off_distance_grows_with_friction() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Linear;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let thrust = engine();

    let expected = [91.558, 94.735, 97.701, 100.400, 102.784, 105.046];
    let mut previous = 0.0;
    for (i, reference) in expected.iter().enumerate() {
        let friction = 0.02 * i as f64;
        let distance = solver
            .compute_take_off_distance_with_friction(0.0, friction, &thrust)
            .unwrap();
        assert_relative_eq!(distance, *reference, max_relative = 1e-3);
        assert!(distance > previous, "mu = {friction}: {distance} m");
        previous = distance;
    }
}

#[test]
fn take_off_distance_grows_with_altitude() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Linear;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let thrust = engine();

    let distances: Vec<f64> = [0.0, 1_000.0, 2_000.0, 3_000.0]
        .into_iter()
        .map(|z| {
            solver
                .compute_take_off_distance_with_friction(z, 0.04, &thrust)
                .unwrap()
        })
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] < pair[1]));
    assert_relative_eq!(distances[0], 97.70, epsilon = 0.05);
    assert_relative_eq!(distances[3], 185.03, epsilon = 0.1);
}

#[test]
fn weak_engine_cannot_start_the_roll() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let weak = ConstantThrust::new(500.0, None).unwrap();
    match solver.compute_take_off_distance_with_friction(0.0, 0.1, &weak) {
        Err(PerformanceError::InsufficientThrust { speed_m_s }) => assert_eq!(speed_m_s, 0.0),
        other => panic!("expected insufficient thrust, got {other:?}"),
    }
    assert!(matches!(
        solver.compute_take_off_distance_with_friction(0.0, -0.1, &engine()),
        Err(PerformanceError::InvalidConfiguration(_))
    ));
}

#[test]
fn roll_that_stops_accelerating_before_lift_off_is_refused() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let steep =
        TaperedThrust::new(3_000.0, 120.0, 1.0, AtmosphereModel::Standard, None).unwrap();
    let lift_off = solver.compute_take_off_speed(0.0).unwrap();
    match solver.simulate_take_off(&TakeOffRoll::new(0.0, 0.03), &steep) {
        Err(PerformanceError::InsufficientThrust { speed_m_s }) => {
            assert!(speed_m_s > 0.0 && speed_m_s < lift_off, "stalled at {speed_m_s} m/s");
        }
        other => panic!("expected insufficient thrust, got {other:?}"),
    }
}

#[test]
fn high_friction_roll_keeps_weight_on_the_wheels() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let strong = ConstantThrust::new(8_000.0, None).unwrap();
    let profile = solver
        .simulate_take_off(&TakeOffRoll::new(0.0, 0.4), &strong)
        .unwrap();
    let weight = aircraft.weight().unwrap();
    for sample in &profile.samples {
        assert!(
            sample.lift_n <= weight * (1.0 + 1e-12),
            "airborne at {} m/s",
            sample.speed_m_s
        );
    }
    // Lift reaches weight exactly at lift-off.
    let last = profile.samples.last().unwrap();
    assert_relative_eq!(last.lift_n, weight, max_relative = 1e-9);
    assert!(last.friction_n < 1e-6 * weight);
}

#[test]
fn take_off_profile_ends_at_lift_off() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Linear;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let profile = solver
        .simulate_take_off(&TakeOffRoll::new(500.0, 0.04), &engine())
        .unwrap();

    assert_relative_eq!(
        profile.end_speed_m_s,
        solver.compute_take_off_speed(500.0).unwrap(),
        max_relative = 1e-12
    );
    assert_eq!(profile.braking_energy_j, 0.0);
    let first = profile.samples.first().unwrap();
    let last = profile.samples.last().unwrap();
    assert_eq!((first.time_s, first.distance_m, first.speed_m_s), (0.0, 0.0, 0.0));
    assert_relative_eq!(last.distance_m, profile.distance_m, max_relative = 1e-12);
    assert_relative_eq!(last.time_s, profile.duration_s, max_relative = 1e-12);
    assert_relative_eq!(last.speed_m_s, profile.end_speed_m_s, max_relative = 1e-12);
    for pair in profile.samples.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s);
        assert!(pair[1].distance_m > pair[0].distance_m);
        assert!(pair[1].speed_m_s > pair[0].speed_m_s);
        assert!(pair[1].acceleration_m_s2 > 0.0);
    }
    // v² ≈ 2 a s with the mean acceleration, within the spread of a along the run.
    let mean_acceleration = profile.end_speed_m_s / profile.duration_s;
    assert!(profile.distance_m > 0.4 * profile.end_speed_m_s * profile.duration_s);
    assert!(mean_acceleration > last.acceleration_m_s2);
}

#[test]
fn brakes_and_parachute_shorten_the_landing() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);

    let rolling = LandingRoll::new(0.0, 0.05, 0.4);
    let plain = solver.simulate_landing(&rolling).unwrap();
    assert_relative_eq!(
        plain.distance_m,
        solver.compute_landing_distance(0.0, 0.05, 0.4).unwrap(),
        max_relative = 1e-12
    );
    assert_eq!(plain.braking_energy_j, 0.0);

    let braked = solver
        .simulate_landing(&LandingRoll {
            braking_friction: 0.3,
            ..rolling
        })
        .unwrap();
    assert!(braked.distance_m < plain.distance_m);
    assert!(braked.duration_s < plain.duration_s);

    let chute = DragParachute {
        area_m2: 4.0,
        drag_coefficient: 1.3,
    };
    let with_chute = solver
        .simulate_landing(&LandingRoll {
            parachute: Some(chute),
            ..rolling
        })
        .unwrap();
    assert!(with_chute.distance_m < plain.distance_m);

    let touchdown = solver.compute_landing_speed(0.0).unwrap();
    let kinetic = 0.5 * (743.0 + 136.26 + 183.0) * touchdown * touchdown;
    assert!(braked.braking_energy_j > 0.0);
    assert!(braked.braking_energy_j < kinetic);
}

#[test]
fn landing_profile_runs_from_touchdown_to_rest() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let profile = solver
        .simulate_landing(&LandingRoll::new(1_000.0, 0.3, 0.2))
        .unwrap();

    let first = profile.samples.first().unwrap();
    let last = profile.samples.last().unwrap();
    assert_relative_eq!(
        first.speed_m_s,
        solver.compute_landing_speed(1_000.0).unwrap(),
        max_relative = 1e-12
    );
    assert_relative_eq!(first.distance_m, 0.0, epsilon = 1e-9);
    assert_eq!(last.speed_m_s, 0.0);
    assert_eq!(profile.end_speed_m_s, 0.0);
    assert_relative_eq!(last.distance_m, profile.distance_m, max_relative = 1e-12);
    for pair in profile.samples.windows(2) {
        assert!(pair[1].distance_m > pair[0].distance_m);
        assert!(pair[1].speed_m_s < pair[0].speed_m_s);
    }
    assert!(profile.samples.iter().all(|s| s.acceleration_m_s2 < 0.0));
}

#[test]
fn frictionless_landing_never_stops() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    match solver.compute_landing_distance(0.0, 0.0, 0.4) {
        Err(PerformanceError::NoDeceleration { speed_m_s }) => assert_eq!(speed_m_s, 0.0),
        other => panic!("expected no deceleration, got {other:?}"),
    }
}
