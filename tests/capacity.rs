use satnet_assessment::capacity::{
    CapacityInputs, SubscriberCounts, SubscriberScenario, active_users_per_area, aggregate,
    capacity_per_area, capacity_per_subscriber, capacity_per_subscriber_all, channel_capacity,
    constellation_capacity, monthly_traffic_gb, single_satellite_capacity, subscriber_metrics,
};
use satnet_assessment::common::DomainError;
use satnet_assessment::linkbudget::{LinkParameters, SpectralEfficiencyTable, evaluate_link};

fn starlink_link() -> LinkParameters {
    LinkParameters {
        altitude_km: 545.0,
        elevation_deg: 25.0,
        dl_frequency_hz: 13.5e9,
        speed_of_light_m_s: 3.0e8,
        antenna_diameter_m: 0.6,
        antenna_efficiency: 0.6,
        power_dbw: 30.0,
        receiver_gain_db: 30.0,
        earth_atmospheric_losses_db: 10.0,
        all_other_losses_db: 0.53,
    }
}

fn starlink_inputs() -> CapacityInputs {
    CapacityInputs {
        dl_bandwidth_hz: 0.5e9,
        number_of_channels: 8,
        polarization: 2,
        number_of_beams: 1,
        number_of_satellites: 4425,
        usable_fraction: 0.5,
        ideal_coverage_area_km2: 115_254.2373,
    }
}

#[test]
fn channel_and_satellite_capacity() {
    let channel = channel_capacity(1.647211, 250e6);
    assert!((channel - 411.80275).abs() < 1e-6, "channel {}", channel);
    let single = single_satellite_capacity(250e6, 1.647211, 6, 1, 8);
    assert!((single - 19_766.532).abs() < 1e-6, "single {}", single);
}

#[test]
fn constellation_capacity_scales_every_factor() {
    let total = constellation_capacity(411.8028, 6, 1, 8, 4425, 0.5);
    assert!((total - 43_733_457.36).abs() < 1e-3, "constellation {}", total);
    let doubled_beams = constellation_capacity(411.8028, 6, 1, 16, 4425, 0.5);
    assert!((doubled_beams - 2.0 * total).abs() < 1e-3);
}

#[test]
fn capacity_per_area_rejects_zero_area() {
    assert!((capacity_per_area(1000.0, 250.0).unwrap() - 4.0).abs() < 1e-12);
    assert!(matches!(
        capacity_per_area(1000.0, 0.0),
        Err(DomainError::DivisionByZero { .. })
    ));
}

#[test]
fn aggregate_rolls_up_a_resolved_link() {
    let table = SpectralEfficiencyTable::dvb_s2x();
    let link = evaluate_link(&starlink_link(), &table).expect("link");
    let result = aggregate(&link, &starlink_inputs()).expect("capacity");
    assert_eq!(result.channel_capacity_mbps, 283.9025);
    assert_eq!(result.single_satellite_capacity_mbps, 4542.44);
    assert_eq!(result.constellation_capacity_mbps, 10_050_148.5);
    assert!(
        (result.capacity_per_area_mbps_km2 - 87.1998).abs() < 1e-3,
        "density {}",
        result.capacity_per_area_mbps_km2
    );
}

#[test]
fn subscriber_ratios() {
    let per_user = capacity_per_subscriber(10_050_148.5, 2_500_000, 1.0).unwrap();
    assert!((per_user - 4.0200594).abs() < 1e-9);
    let half_active = capacity_per_subscriber(10_050_148.5, 2_500_000, 0.5).unwrap();
    assert!((half_active - 2.0 * per_user).abs() < 1e-9);
    let monthly = monthly_traffic_gb(17.49338294, 0.2).unwrap();
    assert!((monthly - 1180.80335).abs() < 1e-4, "monthly {}", monthly);
    let density = active_users_per_area(2_500_000, 1.0, 0.2, 115_254.2373).unwrap();
    assert!((density - 4.338235).abs() < 1e-5, "density {}", density);
}

#[test]
fn subscriber_ratios_reject_zero_denominators() {
    assert!(capacity_per_subscriber(100.0, 0, 1.0).is_err());
    assert!(monthly_traffic_gb(10.0, 0.0).is_err());
    assert!(active_users_per_area(10, 1.0, 0.2, 0.0).is_err());
}

#[test]
fn subscriber_metrics_cover_every_scenario_in_order() {
    let counts = SubscriberCounts {
        low: 2_500_000,
        baseline: 3_500_000,
        high: 4_500_000,
    };
    let metrics = subscriber_metrics(10_050_148.5, &counts, 1.0, 0.2, 115_254.2373).expect("metrics");
    let scenarios: Vec<_> = metrics.iter().map(|m| m.scenario).collect();
    assert_eq!(scenarios, SubscriberScenario::ALL.to_vec());
    assert_eq!(metrics[1].subscribers, 3_500_000);
    assert!((metrics[1].capacity_per_subscriber_mbps - 2.871471).abs() < 1e-9);
    assert!((metrics[2].monthly_traffic_gb - 150.752227).abs() < 1e-5);
    assert!(metrics[0].capacity_per_subscriber_mbps > metrics[2].capacity_per_subscriber_mbps);
    assert_eq!(SubscriberScenario::High.as_str(), "subscribers_high");
}

#[test]
fn channel_capacity_is_efficiency_times_bandwidth_in_mhz() {
    let cases = [
        (0.567805, 250e6, 141.95125),
        (1.647211, 500e6, 823.6055),
        (2.0, 36e6, 72.0),
        (3.5, 125e6, 437.5),
        (5.900855, 1e9, 5900.855),
    ];
    for (se, bw, expected) in cases {
        let capacity = channel_capacity(se, bw);
        assert!(
            (capacity - expected).abs() < 1e-9,
            "channel_capacity({}, {}) = {}",
            se,
            bw,
            capacity
        );
    }
}

#[test]
fn capacity_per_subscriber_defaults_to_all_active() {
    let all = capacity_per_subscriber_all(10_050_148.5, 2_500_000).unwrap();
    assert_eq!(all, capacity_per_subscriber(10_050_148.5, 2_500_000, 1.0).unwrap());
    assert!((all - 4.0200594).abs() < 1e-9);
    assert!(matches!(
        capacity_per_subscriber_all(10_050_148.5, 0),
        Err(DomainError::DivisionByZero { .. })
    ));
}
