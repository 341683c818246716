//! Core constants, units, and shared primitives for the satellite network assessment workspace.

use thiserror::Error;

/// Physical and modelling constants. Values match those used by the assessment models.
pub mod constants {
    /// Earth radius used by the coverage geometry (km).
    pub const EARTH_RADIUS_KM: f64 = 6_378.0;
    /// Total surface area of the Earth (km²).
    pub const EARTH_SURFACE_AREA_KM2: f64 = 510_000_000.0;
    /// Speed of light (m/s), rounded as in the antenna gain model.
    pub const SPEED_OF_LIGHT_M_S: f64 = 3.0e8;
    /// Boltzmann constant (J/K).
    pub const BOLTZMANN_J_PER_K: f64 = 1.38e-23;
    /// Receiver system temperature (K).
    pub const SYSTEM_TEMPERATURE_K: f64 = 290.0;
    /// Noise detection bandwidth (GHz).
    pub const DETECTION_BANDWIDTH_GHZ: f64 = 0.25;
    /// Free-space path loss constant for GHz and km inputs (dB).
    pub const FSPL_CONSTANT_DB: f64 = 92.44;
    pub const DAYS_PER_MONTH: f64 = 30.0;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Megabits in one gigabyte.
    pub const MEGABITS_PER_GIGABYTE: f64 = 8_000.0;
    pub const MONTHS_PER_YEAR: f64 = 12.0;
    /// Decimal places kept on intermediate link budget quantities.
    pub const RESULT_DECIMALS: i32 = 4;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert hertz to gigahertz.
    #[inline]
    pub fn hz_to_ghz(v: f64) -> f64 {
        v / 1.0e9
    }

    /// Convert gigahertz to hertz.
    #[inline]
    pub fn ghz_to_hz(v: f64) -> f64 {
        v * 1.0e9
    }

    /// Convert hertz to megahertz.
    #[inline]
    pub fn hz_to_mhz(v: f64) -> f64 {
        v / 1.0e6
    }

    /// Convert kilograms to metric tonnes.
    #[inline]
    pub fn kg_to_tonnes(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Round `value` to `decimals` places, halves away from zero.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Raised when a physical computation leaves its mathematical domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{quantity} is not finite ({value})")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("{quantity} = {value} outside [{min}, {max}]")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{quantity} is negative ({value})")]
    NegativeResult { quantity: &'static str, value: f64 },
    #[error("division by zero computing {quantity}")]
    DivisionByZero { quantity: &'static str },
}

/// Reject NaN and infinite intermediates.
#[inline]
pub fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { quantity, value })
    }
}

/// Divide, failing on a zero denominator or a non-finite quotient.
#[inline]
pub fn checked_div(
    quantity: &'static str,
    numerator: f64,
    denominator: f64,
) -> Result<f64, DomainError> {
    if denominator == 0.0 {
        return Err(DomainError::DivisionByZero { quantity });
    }
    ensure_finite(quantity, numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn checked_div_rejects_zero() {
        assert_eq!(
            checked_div("ratio", 1.0, 0.0),
            Err(DomainError::DivisionByZero { quantity: "ratio" })
        );
        assert_eq!(checked_div("ratio", 6.0, 3.0), Ok(2.0));
    }
}
