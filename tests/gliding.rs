use approx::assert_relative_eq;
use flight_mech::aircraft::{AircraftConfiguration, DragPolar, Geometry, MassBreakdown};
use flight_mech::atmosphere::{AtmosphereError, AtmosphereModel};
use flight_mech::performance::{PerformanceError, PerformanceSolver};

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
fn slope_and_range_follow_the_glide_ratio() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let f_max = 12.909_944_487_358_056;

    assert_relative_eq!(
        solver.compute_min_descent_gliding_slope().unwrap(),
        -1.0 / f_max,
        max_relative = 1e-14
    );
    assert_relative_eq!(
        solver.compute_max_gliding_range(1_000.0).unwrap(),
        1_000.0 * f_max,
        max_relative = 1e-14
    );
    assert_eq!(solver.compute_max_gliding_range(0.0).unwrap(), 0.0);
    assert!(matches!(
        solver.compute_max_gliding_range(-5.0),
        Err(PerformanceError::Domain(AtmosphereError::Domain { .. }))
    ));
}

#[test]
fn constant_and_linear_glide_times_use_closed_forms() {
    let aircraft = cessna();

    let constant = AtmosphereModel::Constant;
    let solver = PerformanceSolver::new(&aircraft, &constant);
    assert_relative_eq!(
        solver.compute_max_gliding_time(1_000.0).unwrap(),
        402.002_883_178_62,
        max_relative = 1e-10
    );

    let linear = AtmosphereModel::Linear;
    let solver = PerformanceSolver::new(&aircraft, &linear);
    assert_relative_eq!(
        solver.compute_max_gliding_time(3_000.0).unwrap(),
        1_119.612_356_203_85,
        max_relative = 1e-10
    );
}

#[test]
fn linear_closed_form_agrees_with_quadrature() {
    let aircraft = cessna();
    let linear = AtmosphereModel::Linear;
    let solver = PerformanceSolver::new(&aircraft, &linear);
    let constant = AtmosphereModel::Constant;
    let sea_level = PerformanceSolver::new(&aircraft, &constant);

    // t = ∫ √σ dh / w₀, and the constant model gives w₀ directly.
    let z = 6_000.0;
    let sea_level_sink = 1.0 / sea_level.compute_max_gliding_time(1.0).unwrap();
    let steps = 60_000;
    let dh = z / steps as f64;
    let integral: f64 = (0..steps)
        .map(|i| linear.density_ratio((i as f64 + 0.5) * dh).unwrap().sqrt() * dh)
        .sum();
    assert_relative_eq!(
        solver.compute_max_gliding_time(z).unwrap(),
        integral / sea_level_sink,
        max_relative = 1e-7
    );
}

#[test]
fn minimum_sink_maximises_time_aloft() {
    let aircraft = cessna();
    let atmosphere = AtmosphereModel::Standard;
    let solver = PerformanceSolver::new(&aircraft, &atmosphere);
    let cache = aircraft.derived().unwrap();
    let best_cl = cache.min_sink_lift_coefficient();

    let best = solver.compute_max_gliding_time(2_500.0).unwrap();
    for cl in [
        0.8 * best_cl,
        0.95 * best_cl,
        1.05 * best_cl,
        cache.lift_coefficient_at_max_glide_ratio,
    ] {
        assert!(solver.compute_gliding_time(2_500.0, cl).unwrap() < best);
    }
    // Thinner air aloft means a faster sink, so time grows less than linearly.
    let double = solver.compute_max_gliding_time(5_000.0).unwrap();
    assert!(double > best && double < 2.0 * best);
}
