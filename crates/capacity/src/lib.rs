//! Capacity aggregation from a resolved link up to the whole constellation, and the
//! demand-side ratios derived from it.
//!
//! Capacities are in Mbps and bandwidths in Hz. Counts (channels, polarizations, beams,
//! satellites) multiply linearly; `usable_fraction` is the share of raw capacity
//! reachable by users, which is always an explicit input.

pub mod subscribers;

use serde::Serialize;

use satnet_core::constants::RESULT_DECIMALS;
use satnet_core::units::hz_to_mhz;
use satnet_core::{DomainError, checked_div, ensure_finite, round_to};
use satnet_linkbudget::LinkBudgetResult;

pub use subscribers::{
    SubscriberCounts, SubscriberMetrics, SubscriberScenario, active_users_per_area,
    capacity_per_subscriber, capacity_per_subscriber_all, monthly_traffic_gb, subscriber_metrics,
};

/// Capacity of a single channel (Mbps).
pub fn channel_capacity(spectral_efficiency: f64, bandwidth_hz: f64) -> f64 {
    hz_to_mhz(bandwidth_hz) * spectral_efficiency
}

/// Capacity of one satellite across all channels, polarizations and beams (Mbps).
pub fn single_satellite_capacity(
    bandwidth_hz: f64,
    spectral_efficiency: f64,
    number_of_channels: u32,
    polarization: u32,
    number_of_beams: u32,
) -> f64 {
    channel_capacity(spectral_efficiency, bandwidth_hz)
        * f64::from(number_of_channels)
        * f64::from(polarization)
        * f64::from(number_of_beams)
}

/// Usable capacity of the whole constellation (Mbps).
pub fn constellation_capacity(
    channel_capacity_mbps: f64,
    number_of_channels: u32,
    polarization: u32,
    number_of_beams: u32,
    number_of_satellites: u32,
    usable_fraction: f64,
) -> f64 {
    channel_capacity_mbps
        * f64::from(number_of_channels)
        * f64::from(polarization)
        * f64::from(number_of_beams)
        * f64::from(number_of_satellites)
        * usable_fraction
}

/// Capacity density over `area_km2` (Mbps/km²).
pub fn capacity_per_area(constellation_capacity_mbps: f64, area_km2: f64) -> Result<f64, DomainError> {
    checked_div("capacity_per_area", constellation_capacity_mbps, area_km2)
}

/// Constellation-level inputs needed on top of a link evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityInputs {
    pub dl_bandwidth_hz: f64,
    pub number_of_channels: u32,
    pub polarization: u32,
    pub number_of_beams: u32,
    pub number_of_satellites: u32,
    pub usable_fraction: f64,
    /// Area each satellite is expected to serve (km²).
    pub ideal_coverage_area_km2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityResult {
    pub channel_capacity_mbps: f64,
    pub single_satellite_capacity_mbps: f64,
    pub constellation_capacity_mbps: f64,
    pub capacity_per_area_mbps_km2: f64,
}

/// Roll a resolved link up to channel, satellite and constellation capacity.
pub fn aggregate(link: &LinkBudgetResult, inputs: &CapacityInputs) -> Result<CapacityResult, DomainError> {
    let channel = round_to(
        ensure_finite(
            "channel_capacity_mbps",
            channel_capacity(link.spectral_efficiency, inputs.dl_bandwidth_hz),
        )?,
        RESULT_DECIMALS,
    );
    let single = round_to(
        ensure_finite(
            "single_satellite_capacity_mbps",
            single_satellite_capacity(
                inputs.dl_bandwidth_hz,
                link.spectral_efficiency,
                inputs.number_of_channels,
                inputs.polarization,
                inputs.number_of_beams,
            ),
        )?,
        RESULT_DECIMALS,
    );
    let constellation = round_to(
        ensure_finite(
            "constellation_capacity_mbps",
            constellation_capacity(
                channel,
                inputs.number_of_channels,
                inputs.polarization,
                inputs.number_of_beams,
                inputs.number_of_satellites,
                inputs.usable_fraction,
            ),
        )?,
        RESULT_DECIMALS,
    );
    Ok(CapacityResult {
        channel_capacity_mbps: channel,
        single_satellite_capacity_mbps: single,
        constellation_capacity_mbps: constellation,
        capacity_per_area_mbps_km2: capacity_per_area(constellation, inputs.ideal_coverage_area_km2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constellation_capacity_is_linear_in_satellites_and_fraction() {
        let base = constellation_capacity(400.0, 8, 2, 1, 100, 0.5);
        assert!((constellation_capacity(400.0, 8, 2, 1, 200, 0.5) - 2.0 * base).abs() < 1e-6);
        assert!((constellation_capacity(400.0, 8, 2, 1, 100, 1.0) - 2.0 * base).abs() < 1e-6);
        assert_eq!(constellation_capacity(400.0, 8, 2, 1, 100, 0.0), 0.0);
    }
}
