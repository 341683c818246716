//! Total cost of ownership for a constellation operator.
//!
//! Capital costs are paid once up front. Operating costs recur every year of the
//! assessment period: the first year undiscounted, later years discounted at
//! `discount_rate_percent`. All amounts are in US dollars.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use satnet_core::constants::MONTHS_PER_YEAR;
use satnet_core::{DomainError, checked_div, ensure_finite};

/// One-off capital expenditure line items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapitalCosts {
    pub satellite_manufacturing: f64,
    pub satellite_launch: f64,
    pub ground_station: f64,
    #[serde(default)]
    pub spectrum: f64,
    pub regulation_fees: f64,
    pub fiber_infrastructure: f64,
}

impl CapitalCosts {
    pub fn total(&self) -> f64 {
        self.satellite_manufacturing
            + self.satellite_launch
            + self.ground_station
            + self.spectrum
            + self.regulation_fees
            + self.fiber_infrastructure
    }
}

/// Annual operating expenditure line items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatingCosts {
    pub ground_station_energy: f64,
    pub subscriber_acquisition: f64,
    pub staff: f64,
    pub research_development: f64,
    pub maintenance: f64,
}

impl OperatingCosts {
    pub fn total(&self) -> f64 {
        self.ground_station_energy
            + self.subscriber_acquisition
            + self.staff
            + self.research_development
            + self.maintenance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub capex: CapitalCosts,
    pub opex: OperatingCosts,
    pub discount_rate_percent: f64,
    pub assessment_period_years: u32,
}

#[derive(Debug, Error, PartialEq)]
pub enum CostError {
    #[error("discount rate {0}% would make the discount factor non-positive")]
    InvalidDiscountRate(f64),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostResult {
    pub capex_costs: f64,
    pub opex_costs: f64,
    /// Operating costs over the assessment period in present value.
    pub discounted_opex: f64,
    pub total_cost_ownership: f64,
}

/// Present value of `annual_opex` paid at the start of each year of `period_years`.
///
/// Year 0 is undiscounted; years `1..period_years` are divided by `(1 + r/100)^t`.
pub fn discounted_opex(
    annual_opex: f64,
    discount_rate_percent: f64,
    period_years: u32,
) -> Result<f64, CostError> {
    let factor = 1.0 + discount_rate_percent / 100.0;
    if !(factor > 0.0) {
        return Err(CostError::InvalidDiscountRate(discount_rate_percent));
    }
    let later_years: f64 = (1..period_years)
        .map(|year| annual_opex / factor.powi(year as i32))
        .sum();
    Ok(annual_opex + later_years)
}

/// Capital costs plus discounted operating costs.
pub fn total_cost_of_ownership(inputs: &CostInputs) -> Result<CostResult, CostError> {
    let capex_costs = inputs.capex.total();
    let opex_costs = inputs.opex.total();
    let discounted = discounted_opex(
        opex_costs,
        inputs.discount_rate_percent,
        inputs.assessment_period_years,
    )?;
    let total_cost_ownership = ensure_finite("total_cost_ownership", capex_costs + discounted)?;
    Ok(CostResult {
        capex_costs,
        opex_costs,
        discounted_opex: discounted,
        total_cost_ownership,
    })
}

/// Monthly cost per user when `tco_per_user` is spread over `lifespan_years`.
pub fn user_monthly_cost(tco_per_user: f64, lifespan_years: u32) -> Result<f64, DomainError> {
    checked_div(
        "user_monthly_cost",
        tco_per_user,
        f64::from(lifespan_years) * MONTHS_PER_YEAR,
    )
}

/// Total cost of ownership per Mbps of usable capacity.
pub fn cost_per_mbps(total_cost_ownership: f64, capacity_mbps: f64) -> Result<f64, DomainError> {
    checked_div("cost_per_mbps", total_cost_ownership, capacity_mbps)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerUserCost {
    pub capex_per_user: f64,
    pub opex_per_user: f64,
    pub tco_per_user: f64,
    pub user_monthly_cost: f64,
}

/// Split a cost result across `subscribers`, amortising over `lifespan_years`.
pub fn per_user_cost(
    cost: &CostResult,
    subscribers: u64,
    lifespan_years: u32,
) -> Result<PerUserCost, DomainError> {
    let users = subscribers as f64;
    let tco_per_user = checked_div("tco_per_user", cost.total_cost_ownership, users)?;
    Ok(PerUserCost {
        capex_per_user: checked_div("capex_per_user", cost.capex_costs, users)?,
        opex_per_user: checked_div("opex_per_user", cost.opex_costs, users)?,
        tco_per_user,
        user_monthly_cost: user_monthly_cost(tco_per_user, lifespan_years)?,
    })
}
