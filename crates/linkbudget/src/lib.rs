//! Downlink budget engine for a single satellite-to-terminal link.
//!
//! The free functions in [`geometry`] and [`radio`] are the individual model terms.
//! [`evaluate_link`] chains them for one parameter set, rounding each power term to
//! [`RESULT_DECIMALS`] places before it feeds the next stage, and resolves
//! the achievable spectral efficiency from an explicit [`SpectralEfficiencyTable`].

pub mod geometry;
pub mod radio;
pub mod spectral;

use serde::Serialize;

use satnet_core::constants::RESULT_DECIMALS;
use satnet_core::{DomainError, ensure_finite, round_to};

pub use geometry::{
    GeographicMetrics, earth_central_angle, geographic_metrics, satellite_centric_angle,
    satellite_coverage_area, slant_distance,
};
pub use radio::{
    antenna_gain, cnr, eirp, free_space_path_loss, noise_floor, received_power, thermal_noise,
    transmission_losses,
};
pub use spectral::{
    LookupTableError, SpectralEfficiencyEntry, SpectralEfficiencyTable,
    resolve_spectral_efficiency,
};

/// Spectral efficiency at or below which a link counts as [`CnrScenario::Low`] (QPSK 13/45).
pub const LOW_CNR_SPECTRAL_EFFICIENCY: f64 = 0.567805;
/// Spectral efficiency at or above which a link counts as [`CnrScenario::High`] (8APSK 5/9-L).
pub const HIGH_CNR_SPECTRAL_EFFICIENCY: f64 = 1.647211;

/// Coarse link quality class derived from the resolved spectral efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CnrScenario {
    Low,
    Baseline,
    High,
}

impl CnrScenario {
    pub fn from_spectral_efficiency(spectral_efficiency: f64) -> Self {
        if spectral_efficiency <= LOW_CNR_SPECTRAL_EFFICIENCY {
            CnrScenario::Low
        } else if spectral_efficiency >= HIGH_CNR_SPECTRAL_EFFICIENCY {
            CnrScenario::High
        } else {
            CnrScenario::Baseline
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CnrScenario::Low => "low",
            CnrScenario::Baseline => "baseline",
            CnrScenario::High => "high",
        }
    }
}

/// Physical inputs for one downlink. The speed of light is an input so the antenna
/// model can be reproduced with the rounded value used by catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkParameters {
    pub altitude_km: f64,
    pub elevation_deg: f64,
    pub dl_frequency_hz: f64,
    pub speed_of_light_m_s: f64,
    pub antenna_diameter_m: f64,
    pub antenna_efficiency: f64,
    pub power_dbw: f64,
    pub receiver_gain_db: f64,
    pub earth_atmospheric_losses_db: f64,
    pub all_other_losses_db: f64,
}

/// Every intermediate and final quantity of one link evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkBudgetResult {
    pub slant_distance_km: f64,
    pub satellite_centric_angle_deg: f64,
    pub earth_central_angle_deg: f64,
    pub coverage_area_km2: f64,
    pub path_loss_db: f64,
    pub antenna_gain_db: f64,
    pub eirp_db: f64,
    pub losses_db: f64,
    pub noise_db: f64,
    pub received_power_db: f64,
    pub cnr_db: f64,
    pub modulation: String,
    pub spectral_efficiency: f64,
    pub cnr_scenario: CnrScenario,
}

fn rounded(value: f64) -> f64 {
    round_to(value, RESULT_DECIMALS)
}

/// Evaluate the full downlink chain for `params`.
pub fn evaluate_link(
    params: &LinkParameters,
    table: &SpectralEfficiencyTable,
) -> Result<LinkBudgetResult, DomainError> {
    let slant = slant_distance(params.altitude_km, params.elevation_deg)?;
    let satellite_centric_angle_deg =
        rounded(satellite_centric_angle(params.altitude_km, params.elevation_deg)?);
    let earth_central_angle_deg =
        rounded(earth_central_angle(params.altitude_km, params.elevation_deg)?);
    let coverage_area_km2 =
        rounded(satellite_coverage_area(params.altitude_km, params.elevation_deg)?);

    let path_loss_db = rounded(free_space_path_loss(
        params.dl_frequency_hz,
        slant,
    )?);
    let antenna_gain_db = rounded(antenna_gain(
        params.speed_of_light_m_s,
        params.antenna_diameter_m,
        params.dl_frequency_hz,
        params.antenna_efficiency,
    )?);
    let eirp_db = rounded(ensure_finite(
        "eirp_db",
        eirp(params.power_dbw, antenna_gain_db),
    )?);
    let losses_db = rounded(ensure_finite(
        "losses_db",
        transmission_losses(
            params.earth_atmospheric_losses_db,
            params.all_other_losses_db,
        ),
    )?);
    let noise_db = rounded(noise_floor());
    let received_power_db = rounded(ensure_finite(
        "received_power_db",
        received_power(eirp_db, path_loss_db, params.receiver_gain_db, losses_db),
    )?);
    let cnr_db = rounded(ensure_finite("cnr_db", cnr(received_power_db, noise_db))?);

    let entry = table.resolve(cnr_db);
    Ok(LinkBudgetResult {
        slant_distance_km: rounded(slant),
        satellite_centric_angle_deg,
        earth_central_angle_deg,
        coverage_area_km2,
        path_loss_db,
        antenna_gain_db,
        eirp_db,
        losses_db,
        noise_db,
        received_power_db,
        cnr_db,
        modulation: entry.label.clone(),
        spectral_efficiency: entry.spectral_efficiency,
        cnr_scenario: CnrScenario::from_spectral_efficiency(entry.spectral_efficiency),
    })
}
