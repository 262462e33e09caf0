use approx::assert_relative_eq;
use flight_mech::atmosphere::{AtmosphereError, AtmosphereModel};

#[test]
fn linear_model_matches_reference_values() {
    let linear = AtmosphereModel::Linear;
    assert_relative_eq!(
        linear.density_ratio(4_200.0).unwrap(),
        0.652_892_561_983_471_1,
        max_relative = 1e-14
    );
    assert_relative_eq!(
        linear.altitude_from_density_ratio(0.7891).unwrap(),
        2_357.609_971_494_047,
        max_relative = 1e-12
    );
}

#[test]
fn linear_inverse_is_exact() {
    let linear = AtmosphereModel::Linear;
    for step in 0..40 {
        let z = step as f64 * 450.0;
        let sigma = linear.density_ratio(z).unwrap();
        assert_relative_eq!(
            linear.altitude_from_density_ratio(sigma).unwrap(),
            z,
            epsilon = 1e-8
        );
    }
}

#[test]
fn standard_round_trip_recovers_altitude() {
    let standard = AtmosphereModel::Standard;
    for step in 0..=94 {
        let z = step as f64 * 500.0;
        let sigma = standard.density_ratio(z).unwrap();
        let back = standard.altitude_from_density_ratio(sigma).unwrap();
        assert!((back - z).abs() < 1e-3, "z = {z}: recovered {back}");
    }
}

#[test]
fn standard_sea_level_ratios_map_to_zero_altitude() {
    let standard = AtmosphereModel::Standard;
    let sea_level = standard.density_ratio(0.0).unwrap();
    assert!(sea_level < 1.0);
    assert_eq!(standard.altitude_from_density_ratio(1.0), Ok(0.0));
    assert_eq!(standard.altitude_from_density_ratio(0.99999), Ok(0.0));
    assert_eq!(standard.altitude_from_density_ratio(sea_level), Ok(0.0));
    assert!(matches!(
        standard.altitude_from_density_ratio(1.000_001),
        Err(AtmosphereError::Domain { .. })
    ));
}

#[test]
fn density_ratio_decreases_with_altitude() {
    for model in [AtmosphereModel::Linear, AtmosphereModel::Standard] {
        let top = model.max_altitude().min(47_000.0);
        let mut previous = model.density_ratio(0.0).unwrap();
        let mut z = 250.0;
        while z < top {
            let sigma = model.density_ratio(z).unwrap();
            assert!(sigma < previous, "{model} not decreasing at {z} m");
            assert!(sigma > 0.0);
            previous = sigma;
            z += 250.0;
        }
    }
}

#[test]
fn constant_model_is_sea_level_everywhere() {
    let constant = AtmosphereModel::Constant;
    for z in [0.0, 1_000.0, 11_000.0, 60_000.0] {
        assert_eq!(constant.density_ratio(z).unwrap(), 1.0);
        assert_eq!(constant.density(z).unwrap(), 1.225);
    }
    assert_eq!(constant.altitude_from_density_ratio(1.0).unwrap(), 0.0);
    assert!(matches!(
        constant.altitude_from_density_ratio(0.5),
        Err(AtmosphereError::Domain { .. })
    ));
}

#[test]
fn altitudes_outside_the_model_are_domain_errors() {
    assert!(matches!(
        AtmosphereModel::Linear.density_ratio(20_000.0),
        Err(AtmosphereError::Domain { .. })
    ));
    assert!(matches!(
        AtmosphereModel::Linear.density_ratio(-10.0),
        Err(AtmosphereError::Domain { .. })
    ));
    assert!(matches!(
        AtmosphereModel::Standard.density_ratio(47_001.0),
        Err(AtmosphereError::Domain { .. })
    ));
    assert!(matches!(
        AtmosphereModel::Standard.altitude_from_density_ratio(1.5),
        Err(AtmosphereError::Domain { .. })
    ));
}

#[test]
fn standard_state_matches_isa_tables() {
    let state = AtmosphereModel::Standard.state(3_000.0).unwrap();
    assert_relative_eq!(state.temperature_k, 268.65, epsilon = 1e-9);
    assert_relative_eq!(state.density_kg_m3, 0.9091, epsilon = 5e-4);
    assert_relative_eq!(state.pressure_pa, 70_108.0, epsilon = 20.0);
    assert_relative_eq!(state.sound_speed_m_s, 328.58, epsilon = 0.05);
    assert_relative_eq!(
        state.kinematic_viscosity_m2_s,
        state.dynamic_viscosity_pa_s / state.density_kg_m3,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        AtmosphereModel::Standard.density_ratio(4_200.0).unwrap(),
        0.6547,
        epsilon = 5e-4
    );
}

#[test]
fn models_parse_case_insensitively() {
    assert_eq!(
        "Standard".parse::<AtmosphereModel>().unwrap(),
        AtmosphereModel::Standard
    );
    assert_eq!(
        " LINEAR ".parse::<AtmosphereModel>().unwrap(),
        AtmosphereModel::Linear
    );
    assert!(matches!(
        "isothermal".parse::<AtmosphereModel>(),
        Err(AtmosphereError::UnknownModel(name)) if name == "isothermal"
    ));
}
