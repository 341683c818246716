//! Coverage geometry for a satellite seen from the ground at a minimum elevation angle.
//!
//! Angles are taken and returned in degrees; distances in km. Earth is a sphere of
//! radius [`EARTH_RADIUS_KM`].

use std::f64::consts::PI;

use satnet_core::constants::EARTH_RADIUS_KM;
use satnet_core::{DomainError, checked_div, ensure_finite};

fn check_inputs(altitude_km: f64, elevation_deg: f64) -> Result<(), DomainError> {
    if !(0.0..=90.0).contains(&elevation_deg) {
        return Err(DomainError::OutOfRange {
            quantity: "elevation_deg",
            value: elevation_deg,
            min: 0.0,
            max: 90.0,
        });
    }
    if !(altitude_km >= 0.0) || !altitude_km.is_finite() {
        return Err(DomainError::OutOfRange {
            quantity: "altitude_km",
            value: altitude_km,
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(())
}

/// Line-of-sight distance (km) from a ground terminal to the satellite.
///
/// `d = sqrt((R + h)² − (R cos ε)²) − R sin ε`. At 90° this is the altitude itself.
pub fn slant_distance(altitude_km: f64, elevation_deg: f64) -> Result<f64, DomainError> {
    check_inputs(altitude_km, elevation_deg)?;
    let elevation = elevation_deg.to_radians();
    let orbit_radius = EARTH_RADIUS_KM + altitude_km;
    let horizontal = EARTH_RADIUS_KM * elevation.cos();
    let distance =
        (orbit_radius.powi(2) - horizontal.powi(2)).sqrt() - EARTH_RADIUS_KM * elevation.sin();
    let distance = ensure_finite("slant_distance_km", distance)?;
    if distance < 0.0 {
        return Err(DomainError::NegativeResult {
            quantity: "slant_distance_km",
            value: distance,
        });
    }
    Ok(distance)
}

/// Nadir angle at the satellite between sub-satellite point and the edge of coverage (deg).
pub fn satellite_centric_angle(altitude_km: f64, elevation_deg: f64) -> Result<f64, DomainError> {
    check_inputs(altitude_km, elevation_deg)?;
    let ratio = EARTH_RADIUS_KM / (EARTH_RADIUS_KM + altitude_km);
    let argument = ratio * elevation_deg.to_radians().cos();
    if !(-1.0..=1.0).contains(&argument) {
        return Err(DomainError::OutOfRange {
            quantity: "satellite_centric_angle_sine",
            value: argument,
            min: -1.0,
            max: 1.0,
        });
    }
    ensure_finite("satellite_centric_angle", argument.asin().to_degrees())
}

/// Angle at the Earth's centre subtended by the coverage radius (deg).
pub fn earth_central_angle(altitude_km: f64, elevation_deg: f64) -> Result<f64, DomainError> {
    let nadir = satellite_centric_angle(altitude_km, elevation_deg)?;
    Ok(90.0 - (elevation_deg + nadir))
}

/// Area of the spherical cap covered by one satellite (km²).
pub fn satellite_coverage_area(altitude_km: f64, elevation_deg: f64) -> Result<f64, DomainError> {
    let central = earth_central_angle(altitude_km, elevation_deg)?.to_radians();
    let area = 2.0 * PI * EARTH_RADIUS_KM.powi(2) * (1.0 - central.cos());
    ensure_finite("coverage_area_km2", area)
}

/// Spacing and coverage figures for satellites spread evenly over `total_area_km2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicMetrics {
    /// Mean terminal-to-satellite distance assuming uniform spacing (km).
    pub mean_distance_km: f64,
    /// Share of the total area served by each satellite (km²).
    pub ideal_coverage_area_km2: f64,
}

/// Uniform-spacing approximation of distance and per-satellite coverage.
pub fn geographic_metrics(
    number_of_satellites: u32,
    total_area_km2: f64,
    altitude_km: f64,
) -> Result<GeographicMetrics, DomainError> {
    let satellites = f64::from(number_of_satellites);
    let density = checked_div("network_density", satellites, total_area_km2)?;
    let spacing = checked_div("asset_spacing", 1.0, density)?.sqrt() / 2.0;
    let mean_distance_km = ensure_finite(
        "mean_distance_km",
        (spacing.powi(2) + altitude_km.powi(2)).sqrt(),
    )?;
    let ideal_coverage_area_km2 = checked_div("ideal_coverage_area_km2", total_area_km2, satellites)?;
    Ok(GeographicMetrics {
        mean_distance_km,
        ideal_coverage_area_km2,
    })
}
