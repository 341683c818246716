//! Configuration models and loaders for constellation catalogs and model assumptions.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use satnet_core::constants::{EARTH_SURFACE_AREA_KM2, SPEED_OF_LIGHT_M_S};

/// One constellation as described in a catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct ConstellationConfig {
    pub name: String,
    pub number_of_satellites: u32,
    #[serde(default = "default_total_area")]
    pub total_area_earth_km_sq: f64,
    pub altitude_km: f64,
    /// Minimum elevation angle of user terminals (deg).
    pub elevation_angle: f64,
    /// Downlink centre frequencies (Hz); each one becomes its own scenario.
    pub dl_frequency_hz: Vec<f64>,
    pub dl_bandwidth_hz: f64,
    #[serde(default = "default_speed_of_light")]
    pub speed_of_light: f64,
    pub antenna_diameter_m: f64,
    pub antenna_efficiency: f64,
    pub power_dbw: f64,
    pub receiver_gain_db: f64,
    pub earth_atmospheric_losses_db: f64,
    pub all_other_losses_db: f64,
    pub number_of_channels: u32,
    pub polarization: u32,
    pub number_of_beams: u32,
    /// Share of raw constellation capacity reachable by users, in `[0, 1]`.
    pub usable_fraction: f64,
    pub subscribers: SubscriberConfig,
    #[serde(default = "default_traffic_percent")]
    pub subscriber_traffic_percent: f64,
    pub lifespan_years: u32,
    pub costs: CostConfig,
    pub launches: LaunchConfig,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SubscriberConfig {
    pub low: u64,
    pub baseline: u64,
    pub high: u64,
}

/// Cost line items in US dollars.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CostConfig {
    pub satellite_manufacturing: f64,
    pub satellite_launch_cost: f64,
    pub ground_station_cost: f64,
    #[serde(default)]
    pub spectrum_cost: f64,
    pub regulation_fees: f64,
    pub fiber_infrastructure_cost: f64,
    pub ground_station_energy: f64,
    pub subscriber_acquisition: f64,
    pub staff_costs: f64,
    pub research_development: f64,
    pub maintenance: f64,
    pub discount_rate: f64,
    pub assessment_period_year: u32,
}

/// Launch campaign in catalog form.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "vehicle")]
pub enum LaunchConfig {
    #[serde(rename = "falcon9")]
    Falcon9 { number_of_launches: u32 },
    #[serde(rename = "soyuz_fg")]
    SoyuzFg { number_of_launches: u32 },
    #[serde(rename = "ariane5")]
    Ariane5 { number_of_launches: u32 },
    #[serde(other)]
    Unsupported,
}

/// Row of a user-supplied spectral efficiency table.
#[derive(Debug, Deserialize, Clone)]
pub struct SpectralEfficiencyRow {
    pub label: String,
    pub spectral_efficiency_bps_hz: f64,
    pub cnr_threshold_low_db: f64,
    #[serde(default = "default_open_threshold")]
    pub cnr_threshold_high_db: f64,
}

/// Assumptions shared by every scenario of a run.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ModelAssumptions {
    /// Share of daily traffic carried in the busiest hour.
    #[serde(default = "default_busy_hour_fraction")]
    pub busy_hour_fraction: f64,
    #[serde(default = "default_social_cost_of_carbon")]
    pub social_cost_of_carbon_usd_per_tonne: f64,
}

impl Default for ModelAssumptions {
    fn default() -> Self {
        Self {
            busy_hour_fraction: default_busy_hour_fraction(),
            social_cost_of_carbon_usd_per_tonne: default_social_cost_of_carbon(),
        }
    }
}

fn default_total_area() -> f64 {
    EARTH_SURFACE_AREA_KM2
}

fn default_speed_of_light() -> f64 {
    SPEED_OF_LIGHT_M_S
}

fn default_traffic_percent() -> f64 {
    100.0
}

fn default_open_threshold() -> f64 {
    f64::INFINITY
}

fn default_busy_hour_fraction() -> f64 {
    0.2
}

fn default_social_cost_of_carbon() -> f64 {
    185.0
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("constellation `{name}`: invalid {field}: {reason}")]
    Invalid {
        name: String,
        field: &'static str,
        reason: String,
    },
    #[error("constellation `{0}` defined more than once")]
    Duplicate(String),
}

impl ConstellationConfig {
    /// Check every parameter that would otherwise surface as a nonsensical result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| ConfigError::Invalid {
            name: self.name.clone(),
            field,
            reason,
        };

        if self.number_of_satellites == 0 {
            return Err(invalid("number_of_satellites", "must be positive".into()));
        }
        if !(self.total_area_earth_km_sq > 0.0 && self.total_area_earth_km_sq.is_finite()) {
            return Err(invalid(
                "total_area_earth_km_sq",
                format!("{} is not a positive area", self.total_area_earth_km_sq),
            ));
        }
        if !(self.altitude_km > 0.0 && self.altitude_km.is_finite()) {
            return Err(invalid("altitude_km", format!("{} is not a positive altitude", self.altitude_km)));
        }
        if !(0.0..=90.0).contains(&self.elevation_angle) {
            return Err(invalid("elevation_angle", format!("{} outside [0, 90]", self.elevation_angle)));
        }
        if self.dl_frequency_hz.is_empty() {
            return Err(invalid("dl_frequency_hz", "no downlink frequency given".into()));
        }
        if let Some(bad) = self.dl_frequency_hz.iter().find(|f| !(**f > 0.0)) {
            return Err(invalid("dl_frequency_hz", format!("{bad} is not positive")));
        }
        if !(self.dl_bandwidth_hz > 0.0) {
            return Err(invalid("dl_bandwidth_hz", format!("{} is not positive", self.dl_bandwidth_hz)));
        }
        if !(0.0..=1.0).contains(&self.usable_fraction) {
            return Err(invalid("usable_fraction", format!("{} outside [0, 1]", self.usable_fraction)));
        }
        for (field, value) in [
            ("number_of_channels", self.number_of_channels),
            ("polarization", self.polarization),
            ("number_of_beams", self.number_of_beams),
            ("lifespan_years", self.lifespan_years),
            ("assessment_period_year", self.costs.assessment_period_year),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be positive".into()));
            }
        }
        if !(self.subscriber_traffic_percent > 0.0 && self.subscriber_traffic_percent <= 100.0) {
            return Err(invalid(
                "subscriber_traffic_percent",
                format!("{} outside (0, 100]", self.subscriber_traffic_percent),
            ));
        }
        debug!(constellation = %self.name, "validated constellation parameters");
        Ok(())
    }
}

/// Load and validate constellation catalogs.
///
/// Accepts a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_constellations<P: AsRef<Path>>(path: P) -> Result<Vec<ConstellationConfig>, ConfigError> {
    let path = path.as_ref();
    let constellations: Vec<ConstellationConfig> = load_records(path)?;
    let mut seen = BTreeSet::new();
    for constellation in &constellations {
        constellation.validate()?;
        if !seen.insert(constellation.name.to_ascii_lowercase()) {
            return Err(ConfigError::Duplicate(constellation.name.clone()));
        }
    }
    info!(count = constellations.len(), path = %path.display(), "loaded constellation catalog");
    Ok(constellations)
}

/// Load spectral efficiency rows. Ordering is checked when the rows become a table.
pub fn load_spectral_efficiency_rows<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SpectralEfficiencyRow>, ConfigError> {
    let path = path.as_ref();
    let rows: Vec<SpectralEfficiencyRow> = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        #[derive(Deserialize)]
        struct TableFile {
            rows: Vec<SpectralEfficiencyRow>,
        }
        let contents = std::fs::read_to_string(path)?;
        let file: TableFile = toml::from_str(&contents)?;
        file.rows
    } else {
        load_records(path)?
    };
    info!(rows = rows.len(), path = %path.display(), "loaded spectral efficiency rows");
    Ok(rows)
}

/// Load run-wide assumptions from a TOML or YAML mapping.
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<ModelAssumptions, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
