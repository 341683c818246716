//! Downlink power budget terms, all in decibels.

use std::f64::consts::PI;

use satnet_core::constants::{
    BOLTZMANN_J_PER_K, DETECTION_BANDWIDTH_GHZ, FSPL_CONSTANT_DB, SYSTEM_TEMPERATURE_K,
};
use satnet_core::units::{ghz_to_hz, hz_to_ghz};
use satnet_core::{DomainError, ensure_finite};

fn log10_positive(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value > 0.0 {
        ensure_finite(quantity, value.log10())
    } else {
        Err(DomainError::NonFinite { quantity, value })
    }
}

/// Free-space path loss (dB) for a frequency in Hz over a distance in km.
pub fn free_space_path_loss(frequency_hz: f64, distance_km: f64) -> Result<f64, DomainError> {
    let frequency = log10_positive("frequency_ghz", hz_to_ghz(frequency_hz))?;
    let distance = log10_positive("distance_km", distance_km)?;
    Ok(20.0 * frequency + 20.0 * distance + FSPL_CONSTANT_DB)
}

/// Gain (dB) of a parabolic dish: `10 log10(η (π D / λ)²)` with `λ = c / f`.
pub fn antenna_gain(
    speed_of_light_m_s: f64,
    antenna_diameter_m: f64,
    frequency_hz: f64,
    antenna_efficiency: f64,
) -> Result<f64, DomainError> {
    if frequency_hz <= 0.0 {
        return Err(DomainError::DivisionByZero {
            quantity: "wavelength_m",
        });
    }
    let wavelength = speed_of_light_m_s / frequency_hz;
    let aperture = PI * antenna_diameter_m / wavelength;
    let gain = antenna_efficiency * aperture.powi(2);
    Ok(10.0 * log10_positive("antenna_gain", gain)?)
}

/// Effective isotropic radiated power (dBW).
pub fn eirp(power_dbw: f64, antenna_gain_db: f64) -> f64 {
    power_dbw + antenna_gain_db
}

/// Combined atmospheric and miscellaneous losses (dB).
pub fn transmission_losses(earth_atmospheric_losses_db: f64, all_other_losses_db: f64) -> f64 {
    earth_atmospheric_losses_db + all_other_losses_db
}

/// Power arriving at the terminal (dB).
pub fn received_power(
    eirp_db: f64,
    path_loss_db: f64,
    receiver_gain_db: f64,
    losses_db: f64,
) -> f64 {
    eirp_db + receiver_gain_db - path_loss_db - losses_db
}

/// Thermal noise power (dB, milliwatt-referenced `kT`) over `bandwidth_hz`.
pub fn thermal_noise(bandwidth_hz: f64) -> Result<f64, DomainError> {
    let density = log10_positive(
        "noise_density",
        BOLTZMANN_J_PER_K * SYSTEM_TEMPERATURE_K * 1_000.0,
    )?;
    let bandwidth = log10_positive("noise_bandwidth_hz", bandwidth_hz)?;
    Ok(10.0 * density + 10.0 * bandwidth)
}

/// Receiver noise floor (dB) over the fixed detection bandwidth.
pub fn noise_floor() -> f64 {
    let density = (BOLTZMANN_J_PER_K * SYSTEM_TEMPERATURE_K * 1_000.0).log10();
    let bandwidth = ghz_to_hz(DETECTION_BANDWIDTH_GHZ).log10();
    10.0 * density + 10.0 * bandwidth
}

/// Carrier-to-noise ratio (dB).
pub fn cnr(received_power_db: f64, noise_db: f64) -> f64 {
    received_power_db - noise_db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_floor_matches_thermal_noise_at_detection_bandwidth() {
        let expected = thermal_noise(0.25e9).unwrap();
        assert!((noise_floor() - expected).abs() < 1e-12);
    }

    #[test]
    fn path_loss_rejects_zero_distance() {
        assert!(free_space_path_loss(10.7e9, 0.0).is_err());
    }
}
