use satnet_assessment::common::DomainError;
use satnet_assessment::linkbudget::{
    CnrScenario, LinkParameters, SpectralEfficiencyEntry, SpectralEfficiencyTable, antenna_gain,
    cnr, earth_central_angle, eirp, evaluate_link, free_space_path_loss, geographic_metrics,
    noise_floor, received_power, resolve_spectral_efficiency, satellite_centric_angle,
    satellite_coverage_area, slant_distance, transmission_losses,
};

fn reference_link() -> LinkParameters {
    LinkParameters {
        altitude_km: 545.0,
        elevation_deg: 25.0,
        dl_frequency_hz: 10.7e9,
        speed_of_light_m_s: 3.0e8,
        antenna_diameter_m: 0.6,
        antenna_efficiency: 0.6,
        power_dbw: 30.0,
        receiver_gain_db: 30.0,
        earth_atmospheric_losses_db: 10.0,
        all_other_losses_db: 0.53,
    }
}

#[test]
fn slant_distance_matches_reference_geometry() {
    let d = slant_distance(545.0, 25.0).expect("slant distance");
    assert!((d - 1114.3367).abs() < 1e-3, "slant distance {}", d);
}

#[test]
fn slant_distance_at_zenith_is_altitude() {
    let d = slant_distance(545.0, 90.0).expect("zenith");
    assert!((d - 545.0).abs() < 1e-9, "zenith distance {}", d);
}

#[test]
fn slant_distance_rejects_elevation_outside_horizon() {
    assert!(matches!(
        slant_distance(545.0, -5.0),
        Err(DomainError::OutOfRange { quantity: "elevation_deg", .. })
    ));
    assert!(slant_distance(545.0, f64::NAN).is_err());
}

#[test]
fn coverage_angles_and_area() {
    let nadir = satellite_centric_angle(545.0, 25.0).unwrap();
    let central = earth_central_angle(545.0, 25.0).unwrap();
    let area = satellite_coverage_area(545.0, 25.0).unwrap();
    assert!((nadir - 56.6117).abs() < 1e-3, "nadir {}", nadir);
    assert!((central - 8.3883).abs() < 1e-3, "central {}", central);
    assert!((nadir + central + 25.0 - 90.0).abs() < 1e-9);
    assert!((area - 2_734_285.12).abs() < 1.0, "area {}", area);
}

#[test]
fn path_loss_grows_with_frequency_and_distance() {
    let base = free_space_path_loss(10.7e9, 1114.3367).unwrap();
    assert!((base - 173.968).abs() < 1e-3, "fspl {}", base);
    let doubled = free_space_path_loss(21.4e9, 1114.3367).unwrap();
    assert!((doubled - base - 20.0 * 2f64.log10()).abs() < 1e-9);
    assert!(free_space_path_loss(10.7e9, 2000.0).unwrap() > base);
    assert!(free_space_path_loss(0.0, 1000.0).is_err());
}

#[test]
fn antenna_gain_uses_dish_aperture() {
    let gain = antenna_gain(3.0e8, 0.6, 10.7e9, 0.6).unwrap();
    assert!((gain - 34.3328).abs() < 1e-3, "gain {}", gain);
    assert!(antenna_gain(3.0e8, 0.0, 10.7e9, 0.6).is_err());
}

#[test]
fn noise_floor_is_about_minus_ninety_db() {
    let noise = noise_floor();
    assert!((noise - (-89.9978)).abs() < 1e-3, "noise {}", noise);
}

#[test]
fn power_budget_terms_add_up() {
    assert!((eirp(30.0, 34.3328) - 64.3328).abs() < 1e-9);
    assert!((transmission_losses(10.0, 0.53) - 10.53).abs() < 1e-9);
    let rx = received_power(64.3328, 173.968, 30.0, 10.53);
    assert!((rx - (-90.1652)).abs() < 1e-9, "received {}", rx);
    assert!((cnr(rx, -89.9978) - (-0.1674)).abs() < 1e-9);
}

#[test]
fn spectral_efficiency_lookup_uses_half_open_intervals() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    assert_eq!(resolve_spectral_efficiency(5.0, &table), 1.647211);
    assert_eq!(resolve_spectral_efficiency(4.73, &table), 1.647211);
    assert_eq!(resolve_spectral_efficiency(4.7299, &table), 1.088581);
    assert_eq!(table.resolve(5.0).label, "8APSK 5/9-L");
}

#[test]
fn spectral_efficiency_lookup_saturates() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    assert_eq!(resolve_spectral_efficiency(-40.0, &table), 0.567805);
    assert_eq!(resolve_spectral_efficiency(60.0, &table), 5.900855);
    assert_eq!(resolve_spectral_efficiency(19.57, &table), 5.900855);
}

#[test]
fn spectral_efficiency_table_rejects_bad_rows() {
    let row = |label: &str, low: f64| SpectralEfficiencyEntry {
        label: label.to_string(),
        spectral_efficiency: 1.0,
        cnr_threshold_low_db: low,
        cnr_threshold_high_db: f64::INFINITY,
    };
    assert!(SpectralEfficiencyTable::new(Vec::new()).is_err());
    assert!(SpectralEfficiencyTable::new(vec![row("b", 5.0), row("a", 1.0)]).is_err());
    assert!(SpectralEfficiencyTable::new(vec![row("a", f64::NAN)]).is_err());
    let single = SpectralEfficiencyTable::new(vec![row("only", 3.0)]).unwrap();
    assert_eq!(single.resolve(-10.0).label, "only");
    assert_eq!(single.resolve(10.0).label, "only");
}

#[test]
fn evaluate_link_chains_every_stage() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    let result = evaluate_link(&reference_link(), &table).expect("link");
    assert_eq!(result.slant_distance_km, 1114.3367);
    assert_eq!(result.path_loss_db, 173.968);
    assert_eq!(result.antenna_gain_db, 34.3328);
    assert_eq!(result.eirp_db, 64.3328);
    assert_eq!(result.losses_db, 10.53);
    assert_eq!(result.noise_db, -89.9978);
    assert!((result.cnr_db - (-0.1674)).abs() < 1e-9, "cnr {}", result.cnr_db);
    assert_eq!(result.modulation, "QPSK 13/45");
    assert_eq!(result.cnr_scenario, CnrScenario::Low);
}

#[test]
fn evaluate_link_reports_domain_errors() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    let mut params = reference_link();
    params.antenna_efficiency = 0.0;
    assert!(evaluate_link(&params, &table).is_err());
    let mut params = reference_link();
    params.power_dbw = f64::INFINITY;
    assert!(matches!(
        evaluate_link(&params, &table),
        Err(DomainError::NonFinite { quantity: "eirp_db", .. })
    ));
}

#[test]
fn cnr_scenario_thresholds() {
    assert_eq!(CnrScenario::from_spectral_efficiency(0.567805), CnrScenario::Low);
    assert_eq!(CnrScenario::from_spectral_efficiency(0.889135), CnrScenario::Baseline);
    assert_eq!(CnrScenario::from_spectral_efficiency(1.647211), CnrScenario::High);
}

#[test]
fn geographic_metrics_split_area_evenly() {
    let metrics = geographic_metrics(4425, 510_000_000.0, 545.0).unwrap();
    assert!((metrics.ideal_coverage_area_km2 - 115_254.237_288).abs() < 1e-3);
    assert!(metrics.mean_distance_km > 545.0);
    assert!(matches!(
        geographic_metrics(0, 510_000_000.0, 545.0),
        Err(DomainError::DivisionByZero { .. })
    ));
}

#[test]
fn slant_distance_and_path_loss_fall_as_elevation_rises() {
    let mut previous: Option<(f64, f64)> = None;
    for step in 0..=900 {
        let elevation = f64::from(step) / 10.0;
        let distance = slant_distance(545.0, elevation).expect("slant distance");
        let loss = free_space_path_loss(13.5e9, distance).expect("path loss");
        if let Some((prev_distance, prev_loss)) = previous {
            assert!(distance < prev_distance, "distance did not fall at {} deg", elevation);
            assert!(loss <= prev_loss, "path loss rose at {} deg", elevation);
        }
        previous = Some((distance, loss));
    }
}

#[test]
fn every_adjacent_pair_selects_the_lower_row() {
    let epsilon = 1e-9;
    for table in [
        SpectralEfficiencyTable::dvb_s2x(),
        SpectralEfficiencyTable::dvb_s2x_high_order(),
    ] {
        for pair in table.entries().windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if lower.cnr_threshold_low_db >= upper.cnr_threshold_low_db {
                continue;
            }
            assert_eq!(table.resolve(lower.cnr_threshold_low_db), lower);
            assert_eq!(table.resolve(upper.cnr_threshold_low_db - epsilon), lower);
        }
    }
}

#[test]
fn both_builtin_tables_clamp_at_their_bounds() {
    for table in [
        SpectralEfficiencyTable::dvb_s2x(),
        SpectralEfficiencyTable::dvb_s2x_high_order(),
    ] {
        let entries = table.entries();
        let first = &entries[0];
        let last = &entries[entries.len() - 1];
        assert_eq!(
            resolve_spectral_efficiency(first.cnr_threshold_low_db - 100.0, &table),
            first.spectral_efficiency
        );
        assert_eq!(
            resolve_spectral_efficiency(last.cnr_threshold_low_db + 100.0, &table),
            last.spectral_efficiency
        );
    }
}

#[test]
fn high_order_table_lifts_weak_links_to_eight_apsk() {
    let table = SpectralEfficiencyTable::dvb_s2x_high_order();
    assert_eq!(resolve_spectral_efficiency(-0.1674, &table), 1.647211);
    assert_eq!(resolve_spectral_efficiency(5.96, &table), 1.972253);
    assert_eq!(table.resolve(7.45).label, "16APSK 3/5-L");
    assert_eq!(resolve_spectral_efficiency(25.0, &table), 5.768987);
    let result = evaluate_link(&reference_link(), &table).expect("link");
    assert_eq!(result.modulation, "8APSK 5/9-L");
    assert_eq!(result.cnr_scenario, CnrScenario::High);
}

#[test]
fn lookup_follows_threshold_order_when_efficiency_dips() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    let before = table.resolve(7.45);
    let after = table.resolve(7.55);
    assert_eq!(before.label, "16APSK 3/5-L");
    assert_eq!(after.label, "16APSK 26/45");
    assert!(after.spectral_efficiency < before.spectral_efficiency);
}
