//! Export helpers for CSV result tables and JSON run summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod results {
    use std::io::Write;

    use serde::Serialize;

    /// One row of the results table: a scenario evaluated under one subscriber scenario.
    ///
    /// Column names follow the catalog's field names so tables can be joined back to
    /// their inputs.
    #[derive(Debug, Clone, Serialize)]
    pub struct ResultRecord<'a> {
        pub constellation: &'a str,
        pub number_of_satellites: u32,
        pub total_area_earth_km_sq: f64,
        pub ideal_coverage_area_per_sat_sqkm: f64,
        pub altitude_km: f64,
        pub elevation_angle: f64,
        pub dl_frequency_hz: f64,
        pub dl_bandwidth_hz: f64,
        pub power_dbw: f64,
        pub receiver_gain_db: f64,
        pub earth_atmospheric_losses_db: f64,
        pub all_other_losses_db: f64,
        pub signal_path_km: f64,
        pub satellite_centric_angle: f64,
        pub earth_central_angle: f64,
        pub coverage_area_per_sat_sqkm: f64,
        pub path_loss_db: f64,
        pub losses_db: f64,
        pub antenna_gain_db: f64,
        pub eirp_db: f64,
        pub noise_db: f64,
        pub received_power_db: f64,
        pub cnr_db: f64,
        pub cnr_scenario: &'a str,
        pub modulation: &'a str,
        pub spectral_efficiency_bphz: f64,
        pub channel_capacity_mbps: f64,
        pub capacity_per_single_satellite_mbps: f64,
        pub constellation_capacity_mbps: f64,
        #[serde(rename = "capacity_per_area_mbps/sqkm")]
        pub capacity_per_area_mbps_sqkm: f64,
        pub subscriber_scenario: &'a str,
        pub subscribers: u64,
        pub capacity_per_user: f64,
        pub monthly_gb: f64,
        pub user_per_area: f64,
        pub capex_costs: f64,
        pub opex_costs: f64,
        pub total_cost_ownership: f64,
        pub assessment_period_year: u32,
        pub capex_per_user: f64,
        pub opex_per_user: f64,
        pub tco_per_user: f64,
        pub user_monthly_cost: f64,
        pub cost_per_mbps: f64,
        pub rocket: &'a str,
        pub no_of_launches: u32,
        pub climate_change_baseline_kg: f64,
        pub climate_change_worst_case_kg: f64,
        pub ozone_depletion_baseline_kg: f64,
        pub ozone_depletion_worst_case_kg: f64,
        pub resource_depletion_kg: f64,
        pub freshwater_toxicity_m3: f64,
        pub human_toxicity: f64,
        pub per_subscriber_emission_kg: f64,
        pub annual_emission_kg: f64,
        pub social_carbon_cost_usd: f64,
    }

    /// Write `records` as CSV with a header row. An empty slice still yields the header.
    pub fn write_records<W: Write>(writer: W, records: &[ResultRecord<'_>]) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if records.is_empty() {
            csv_writer.write_record(HEADER)?;
        }
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Column names in table order.
    pub const HEADER: &[&str] = &[
        "constellation",
        "number_of_satellites",
        "total_area_earth_km_sq",
        "ideal_coverage_area_per_sat_sqkm",
        "altitude_km",
        "elevation_angle",
        "dl_frequency_hz",
        "dl_bandwidth_hz",
        "power_dbw",
        "receiver_gain_db",
        "earth_atmospheric_losses_db",
        "all_other_losses_db",
        "signal_path_km",
        "satellite_centric_angle",
        "earth_central_angle",
        "coverage_area_per_sat_sqkm",
        "path_loss_db",
        "losses_db",
        "antenna_gain_db",
        "eirp_db",
        "noise_db",
        "received_power_db",
        "cnr_db",
        "cnr_scenario",
        "modulation",
        "spectral_efficiency_bphz",
        "channel_capacity_mbps",
        "capacity_per_single_satellite_mbps",
        "constellation_capacity_mbps",
        "capacity_per_area_mbps/sqkm",
        "subscriber_scenario",
        "subscribers",
        "capacity_per_user",
        "monthly_gb",
        "user_per_area",
        "capex_costs",
        "opex_costs",
        "total_cost_ownership",
        "assessment_period_year",
        "capex_per_user",
        "opex_per_user",
        "tco_per_user",
        "user_monthly_cost",
        "cost_per_mbps",
        "rocket",
        "no_of_launches",
        "climate_change_baseline_kg",
        "climate_change_worst_case_kg",
        "ozone_depletion_baseline_kg",
        "ozone_depletion_worst_case_kg",
        "resource_depletion_kg",
        "freshwater_toxicity_m3",
        "human_toxicity",
        "per_subscriber_emission_kg",
        "annual_emission_kg",
        "social_carbon_cost_usd",
    ];
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Scenario dropped from the results table, with the reason it failed.
    #[derive(Debug, Clone, Serialize)]
    pub struct FailedScenario {
        pub index: usize,
        pub constellation: String,
        pub reason: String,
    }

    /// Outcome counts of a batch run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        /// Library version that produced the run.
        pub version: String,
        pub scenarios: usize,
        pub evaluated: usize,
        pub rows: usize,
        pub failed: Vec<FailedScenario>,
    }

    /// Write `summary` as pretty-printed JSON, creating parent directories.
    pub fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, summary)?;
        Ok(())
    }
}
