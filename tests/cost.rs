use satnet_assessment::common::DomainError;
use satnet_assessment::cost::{
    CapitalCosts, CostError, CostInputs, OperatingCosts, cost_per_mbps, discounted_opex,
    per_user_cost, total_cost_of_ownership, user_monthly_cost,
};

fn reference_costs() -> CostInputs {
    CostInputs {
        capex: CapitalCosts {
            satellite_manufacturing: 150_000.0,
            satellite_launch: 186_328_000.0,
            ground_station: 39_088_000.0,
            spectrum: 120_000_000.0,
            regulation_fees: 720_000.0,
            fiber_infrastructure: 3_550_000.0,
        },
        opex: OperatingCosts {
            ground_station_energy: 2_750_000.0,
            subscriber_acquisition: 50_000_000.0,
            staff: 20_000_000.0,
            research_development: 60_000_000.0,
            maintenance: 23_000_000.0,
        },
        discount_rate_percent: 5.0,
        assessment_period_years: 5,
    }
}

#[test]
fn line_items_add_up() {
    let costs = reference_costs();
    assert_eq!(costs.capex.total(), 349_836_000.0);
    assert_eq!(costs.opex.total(), 155_750_000.0);
}

#[test]
fn total_cost_of_ownership_discounts_later_years() {
    let result = total_cost_of_ownership(&reference_costs()).expect("tco");
    assert_eq!(result.capex_costs, 349_836_000.0);
    assert_eq!(result.opex_costs, 155_750_000.0);
    assert!(
        (result.total_cost_ownership - 1_057_867_791.02).abs() < 0.01,
        "tco {}",
        result.total_cost_ownership
    );
    assert!(result.discounted_opex < 5.0 * result.opex_costs);
    assert!(result.discounted_opex > result.opex_costs);
}

#[test]
fn zero_discount_rate_sums_years() {
    let pv = discounted_opex(100.0, 0.0, 4).unwrap();
    assert!((pv - 400.0).abs() < 1e-9);
}

#[test]
fn higher_discount_rate_lowers_present_value() {
    let low = discounted_opex(1_000.0, 3.0, 10).unwrap();
    let high = discounted_opex(1_000.0, 8.0, 10).unwrap();
    assert!(high < low);
}

#[test]
fn invalid_discount_rate_is_reported() {
    let mut costs = reference_costs();
    costs.discount_rate_percent = -150.0;
    assert!(matches!(
        total_cost_of_ownership(&costs),
        Err(CostError::InvalidDiscountRate(_))
    ));
}

#[test]
fn per_user_figures() {
    let result = total_cost_of_ownership(&reference_costs()).unwrap();
    let per_user = per_user_cost(&result, 1_000_000, 5).expect("per user");
    assert!((per_user.capex_per_user - 349.836).abs() < 1e-9);
    assert!((per_user.opex_per_user - 155.75).abs() < 1e-9);
    assert!((per_user.tco_per_user - 1_057.86779102).abs() < 1e-6);
    assert!((per_user.user_monthly_cost - per_user.tco_per_user / 60.0).abs() < 1e-9);
}

#[test]
fn per_user_figures_reject_zero_subscribers() {
    let result = total_cost_of_ownership(&reference_costs()).unwrap();
    assert!(matches!(
        per_user_cost(&result, 0, 5),
        Err(DomainError::DivisionByZero { .. })
    ));
    assert!(user_monthly_cost(100.0, 0).is_err());
}

#[test]
fn cost_per_mbps_divides_by_capacity() {
    assert!((cost_per_mbps(1_000.0, 250.0).unwrap() - 4.0).abs() < 1e-12);
    assert!(cost_per_mbps(1_000.0, 0.0).is_err());
}
