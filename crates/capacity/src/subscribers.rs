//! Demand-side ratios: capacity per subscriber, monthly traffic, and user density.

use serde::Serialize;

use satnet_core::constants::{DAYS_PER_MONTH, MEGABITS_PER_GIGABYTE, SECONDS_PER_HOUR};
use satnet_core::{DomainError, checked_div};

/// Subscriber uptake scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberScenario {
    Low,
    Baseline,
    High,
}

impl SubscriberScenario {
    pub const ALL: [SubscriberScenario; 3] = [
        SubscriberScenario::Low,
        SubscriberScenario::Baseline,
        SubscriberScenario::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriberScenario::Low => "subscribers_low",
            SubscriberScenario::Baseline => "subscribers_baseline",
            SubscriberScenario::High => "subscribers_high",
        }
    }
}

/// Subscriber totals for each uptake scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberCounts {
    pub low: u64,
    pub baseline: u64,
    pub high: u64,
}

impl SubscriberCounts {
    pub fn get(&self, scenario: SubscriberScenario) -> u64 {
        match scenario {
            SubscriberScenario::Low => self.low,
            SubscriberScenario::Baseline => self.baseline,
            SubscriberScenario::High => self.high,
        }
    }
}

/// Capacity available to each subscriber active in the busy hour (Mbps).
///
/// `traffic_fraction` is the share of subscribers generating traffic; pass 1.0 to
/// divide evenly across all of them.
pub fn capacity_per_subscriber(
    constellation_capacity_mbps: f64,
    subscribers: u64,
    traffic_fraction: f64,
) -> Result<f64, DomainError> {
    checked_div(
        "capacity_per_subscriber",
        constellation_capacity_mbps,
        subscribers as f64 * traffic_fraction,
    )
}

/// [`capacity_per_subscriber`] with every subscriber counted as active.
pub fn capacity_per_subscriber_all(
    constellation_capacity_mbps: f64,
    subscribers: u64,
) -> Result<f64, DomainError> {
    capacity_per_subscriber(constellation_capacity_mbps, subscribers, 1.0)
}

/// Monthly traffic (GB) a subscriber can move when `busy_hour_fraction` of daily
/// traffic falls in the busiest hour.
pub fn monthly_traffic_gb(
    capacity_per_subscriber_mbps: f64,
    busy_hour_fraction: f64,
) -> Result<f64, DomainError> {
    checked_div(
        "monthly_traffic_gb",
        capacity_per_subscriber_mbps,
        MEGABITS_PER_GIGABYTE * (1.0 / DAYS_PER_MONTH) * (1.0 / SECONDS_PER_HOUR) * busy_hour_fraction,
    )
}

/// Busy-hour active users per km².
pub fn active_users_per_area(
    subscribers: u64,
    traffic_fraction: f64,
    busy_hour_fraction: f64,
    area_km2: f64,
) -> Result<f64, DomainError> {
    checked_div(
        "active_users_per_area",
        subscribers as f64 * traffic_fraction * busy_hour_fraction,
        area_km2,
    )
}

/// Demand metrics for one subscriber scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriberMetrics {
    pub scenario: SubscriberScenario,
    pub subscribers: u64,
    pub capacity_per_subscriber_mbps: f64,
    pub monthly_traffic_gb: f64,
    pub active_users_per_km2: f64,
}

/// Demand metrics for every scenario in `counts`, in low/baseline/high order.
pub fn subscriber_metrics(
    constellation_capacity_mbps: f64,
    counts: &SubscriberCounts,
    traffic_fraction: f64,
    busy_hour_fraction: f64,
    area_km2: f64,
) -> Result<Vec<SubscriberMetrics>, DomainError> {
    SubscriberScenario::ALL
        .iter()
        .map(|&scenario| {
            let subscribers = counts.get(scenario);
            let per_subscriber =
                capacity_per_subscriber(constellation_capacity_mbps, subscribers, traffic_fraction)?;
            Ok(SubscriberMetrics {
                scenario,
                subscribers,
                capacity_per_subscriber_mbps: per_subscriber,
                monthly_traffic_gb: monthly_traffic_gb(per_subscriber, busy_hour_fraction)?,
                active_users_per_km2: active_users_per_area(
                    subscribers,
                    traffic_fraction,
                    busy_hour_fraction,
                    area_km2,
                )?,
            })
        })
        .collect()
}
