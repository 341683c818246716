//! Catalog-driven scenario evaluation.
//!
//! A [`Scenario`] is one constellation at one downlink frequency together with its
//! cost and launch plan. [`evaluate`] runs it through link budget, capacity, cost and
//! emissions; [`evaluate_batch`] does so for many scenarios, logging and recording
//! failures instead of aborting the run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use satnet_capacity::{
    CapacityInputs, CapacityResult, SubscriberCounts, SubscriberMetrics, aggregate,
    subscriber_metrics,
};
use satnet_config::{
    ConfigError, ConstellationConfig, CostConfig, LaunchConfig, ModelAssumptions,
    SpectralEfficiencyRow, load_constellations, load_spectral_efficiency_rows,
};
use satnet_core::constants::RESULT_DECIMALS;
use satnet_core::{DomainError, round_to};
use satnet_cost::{
    CapitalCosts, CostError, CostInputs, CostResult, OperatingCosts, PerUserCost, cost_per_mbps,
    per_user_cost, total_cost_of_ownership,
};
use satnet_emissions::{
    MissionEmissions, RocketKind, annualised_kg, mission_emissions, per_subscriber_kg,
    social_cost_of_carbon_usd,
};
use satnet_export::results::{ResultRecord, write_records};
use satnet_export::summary::{FailedScenario, RunSummary};
use satnet_export::writer_for_path;
use satnet_linkbudget::{
    LinkBudgetResult, LinkParameters, LookupTableError, SpectralEfficiencyEntry,
    SpectralEfficiencyTable, evaluate_link, geographic_metrics,
};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid spectral efficiency table: {0}")]
    Table(#[from] LookupTableError),
    #[error("launch vehicle unsupported")]
    UnsupportedLaunchVehicle,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("failed to write results: {0}")]
    Export(#[from] csv::Error),
    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

impl ScenarioError {
    /// Whether the error stems from bad inputs rather than a failed computation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScenarioError::Config(_)
                | ScenarioError::Table(_)
                | ScenarioError::UnsupportedLaunchVehicle
        )
    }
}

/// Flat physical and demand parameters of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub constellation: String,
    pub number_of_satellites: u32,
    pub total_area_earth_km_sq: f64,
    pub altitude_km: f64,
    pub elevation_angle: f64,
    pub dl_frequency_hz: f64,
    pub dl_bandwidth_hz: f64,
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
    pub usable_fraction: f64,
    pub subscribers_low: u64,
    pub subscribers_baseline: u64,
    pub subscribers_high: u64,
    pub subscriber_traffic_percent: f64,
}

impl ScenarioInput {
    pub fn link_parameters(&self) -> LinkParameters {
        LinkParameters {
            altitude_km: self.altitude_km,
            elevation_deg: self.elevation_angle,
            dl_frequency_hz: self.dl_frequency_hz,
            speed_of_light_m_s: self.speed_of_light,
            antenna_diameter_m: self.antenna_diameter_m,
            antenna_efficiency: self.antenna_efficiency,
            power_dbw: self.power_dbw,
            receiver_gain_db: self.receiver_gain_db,
            earth_atmospheric_losses_db: self.earth_atmospheric_losses_db,
            all_other_losses_db: self.all_other_losses_db,
        }
    }

    pub fn capacity_inputs(&self, ideal_coverage_area_km2: f64) -> CapacityInputs {
        CapacityInputs {
            dl_bandwidth_hz: self.dl_bandwidth_hz,
            number_of_channels: self.number_of_channels,
            polarization: self.polarization,
            number_of_beams: self.number_of_beams,
            number_of_satellites: self.number_of_satellites,
            usable_fraction: self.usable_fraction,
            ideal_coverage_area_km2,
        }
    }

    pub fn subscriber_counts(&self) -> SubscriberCounts {
        SubscriberCounts {
            low: self.subscribers_low,
            baseline: self.subscribers_baseline,
            high: self.subscribers_high,
        }
    }

    fn traffic_fraction(&self) -> f64 {
        self.subscriber_traffic_percent / 100.0
    }
}

/// Launch vehicle and number of launches needed to deploy a constellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchPlan {
    pub rocket: RocketKind,
    pub number_of_launches: u32,
}

impl TryFrom<LaunchConfig> for LaunchPlan {
    type Error = ScenarioError;

    fn try_from(value: LaunchConfig) -> Result<Self, Self::Error> {
        let (rocket, number_of_launches) = match value {
            LaunchConfig::Falcon9 { number_of_launches } => (RocketKind::Falcon9, number_of_launches),
            LaunchConfig::SoyuzFg { number_of_launches } => (RocketKind::SoyuzFg, number_of_launches),
            LaunchConfig::Ariane5 { number_of_launches } => (RocketKind::Ariane5, number_of_launches),
            LaunchConfig::Unsupported => return Err(ScenarioError::UnsupportedLaunchVehicle),
        };
        Ok(LaunchPlan {
            rocket,
            number_of_launches,
        })
    }
}

fn cost_inputs(config: &CostConfig) -> CostInputs {
    CostInputs {
        capex: CapitalCosts {
            satellite_manufacturing: config.satellite_manufacturing,
            satellite_launch: config.satellite_launch_cost,
            ground_station: config.ground_station_cost,
            spectrum: config.spectrum_cost,
            regulation_fees: config.regulation_fees,
            fiber_infrastructure: config.fiber_infrastructure_cost,
        },
        opex: OperatingCosts {
            ground_station_energy: config.ground_station_energy,
            subscriber_acquisition: config.subscriber_acquisition,
            staff: config.staff_costs,
            research_development: config.research_development,
            maintenance: config.maintenance,
        },
        discount_rate_percent: config.discount_rate,
        assessment_period_years: config.assessment_period_year,
    }
}

/// Everything needed to evaluate one constellation at one downlink frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub input: ScenarioInput,
    pub costs: CostInputs,
    pub launches: LaunchPlan,
    /// Operating life used to annualise launch emissions.
    pub lifespan_years: u32,
}

/// One scenario per downlink frequency listed for the constellation.
pub fn scenarios_from_config(config: &ConstellationConfig) -> Result<Vec<Scenario>, ScenarioError> {
    let launches = LaunchPlan::try_from(config.launches.clone())?;
    let costs = cost_inputs(&config.costs);
    Ok(config
        .dl_frequency_hz
        .iter()
        .map(|&dl_frequency_hz| Scenario {
            input: ScenarioInput {
                constellation: config.name.clone(),
                number_of_satellites: config.number_of_satellites,
                total_area_earth_km_sq: config.total_area_earth_km_sq,
                altitude_km: config.altitude_km,
                elevation_angle: config.elevation_angle,
                dl_frequency_hz,
                dl_bandwidth_hz: config.dl_bandwidth_hz,
                speed_of_light: config.speed_of_light,
                antenna_diameter_m: config.antenna_diameter_m,
                antenna_efficiency: config.antenna_efficiency,
                power_dbw: config.power_dbw,
                receiver_gain_db: config.receiver_gain_db,
                earth_atmospheric_losses_db: config.earth_atmospheric_losses_db,
                all_other_losses_db: config.all_other_losses_db,
                number_of_channels: config.number_of_channels,
                polarization: config.polarization,
                number_of_beams: config.number_of_beams,
                usable_fraction: config.usable_fraction,
                subscribers_low: config.subscribers.low,
                subscribers_baseline: config.subscribers.baseline,
                subscribers_high: config.subscribers.high,
                subscriber_traffic_percent: config.subscriber_traffic_percent,
            },
            costs,
            launches,
            lifespan_years: config.lifespan_years,
        })
        .collect())
}

/// Load a constellation catalog and expand it into scenarios.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioError> {
    let mut scenarios = Vec::new();
    for config in load_constellations(path)? {
        scenarios.extend(scenarios_from_config(&config)?);
    }
    Ok(scenarios)
}

/// Build a validated lookup table from catalog rows.
pub fn spectral_table_from_rows(
    rows: Vec<SpectralEfficiencyRow>,
) -> Result<SpectralEfficiencyTable, ScenarioError> {
    let entries = rows
        .into_iter()
        .map(|row| SpectralEfficiencyEntry {
            label: row.label,
            spectral_efficiency: row.spectral_efficiency_bps_hz,
            cnr_threshold_low_db: row.cnr_threshold_low_db,
            cnr_threshold_high_db: row.cnr_threshold_high_db,
        })
        .collect();
    Ok(SpectralEfficiencyTable::new(entries)?)
}

pub fn load_spectral_table<P: AsRef<Path>>(path: P) -> Result<SpectralEfficiencyTable, ScenarioError> {
    spectral_table_from_rows(load_spectral_efficiency_rows(path)?)
}

/// Immutable inputs shared by every scenario of a run.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioContext<'a> {
    pub table: &'a SpectralEfficiencyTable,
    pub assumptions: ModelAssumptions,
}

/// Demand, cost and emission figures for one subscriber scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriberOutcome {
    pub metrics: SubscriberMetrics,
    pub cost: PerUserCost,
    pub per_subscriber_emission_kg: f64,
}

/// Full evaluation of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub input: ScenarioInput,
    pub ideal_coverage_area_km2: f64,
    pub link: LinkBudgetResult,
    pub capacity: CapacityResult,
    pub cost: CostResult,
    pub assessment_period_year: u32,
    pub cost_per_mbps: f64,
    pub emissions: MissionEmissions,
    pub annual_emission_kg: f64,
    pub social_carbon_cost_usd: f64,
    pub subscribers: Vec<SubscriberOutcome>,
}

impl ScenarioResult {
    /// Flatten into one table row per subscriber scenario.
    pub fn records(&self) -> Vec<ResultRecord<'_>> {
        let input = &self.input;
        let emissions = &self.emissions.total;
        self.subscribers
            .iter()
            .map(|outcome| ResultRecord {
                constellation: &input.constellation,
                number_of_satellites: input.number_of_satellites,
                total_area_earth_km_sq: input.total_area_earth_km_sq,
                ideal_coverage_area_per_sat_sqkm: self.ideal_coverage_area_km2,
                altitude_km: input.altitude_km,
                elevation_angle: input.elevation_angle,
                dl_frequency_hz: input.dl_frequency_hz,
                dl_bandwidth_hz: input.dl_bandwidth_hz,
                power_dbw: input.power_dbw,
                receiver_gain_db: input.receiver_gain_db,
                earth_atmospheric_losses_db: input.earth_atmospheric_losses_db,
                all_other_losses_db: input.all_other_losses_db,
                signal_path_km: self.link.slant_distance_km,
                satellite_centric_angle: self.link.satellite_centric_angle_deg,
                earth_central_angle: self.link.earth_central_angle_deg,
                coverage_area_per_sat_sqkm: self.link.coverage_area_km2,
                path_loss_db: self.link.path_loss_db,
                losses_db: self.link.losses_db,
                antenna_gain_db: self.link.antenna_gain_db,
                eirp_db: self.link.eirp_db,
                noise_db: self.link.noise_db,
                received_power_db: self.link.received_power_db,
                cnr_db: self.link.cnr_db,
                cnr_scenario: self.link.cnr_scenario.as_str(),
                modulation: &self.link.modulation,
                spectral_efficiency_bphz: self.link.spectral_efficiency,
                channel_capacity_mbps: self.capacity.channel_capacity_mbps,
                capacity_per_single_satellite_mbps: self.capacity.single_satellite_capacity_mbps,
                constellation_capacity_mbps: self.capacity.constellation_capacity_mbps,
                capacity_per_area_mbps_sqkm: self.capacity.capacity_per_area_mbps_km2,
                subscriber_scenario: outcome.metrics.scenario.as_str(),
                subscribers: outcome.metrics.subscribers,
                capacity_per_user: outcome.metrics.capacity_per_subscriber_mbps,
                monthly_gb: outcome.metrics.monthly_traffic_gb,
                user_per_area: outcome.metrics.active_users_per_km2,
                capex_costs: self.cost.capex_costs,
                opex_costs: self.cost.opex_costs,
                total_cost_ownership: self.cost.total_cost_ownership,
                assessment_period_year: self.assessment_period_year,
                capex_per_user: outcome.cost.capex_per_user,
                opex_per_user: outcome.cost.opex_per_user,
                tco_per_user: outcome.cost.tco_per_user,
                user_monthly_cost: outcome.cost.user_monthly_cost,
                cost_per_mbps: self.cost_per_mbps,
                rocket: self.emissions.rocket.as_str(),
                no_of_launches: self.emissions.number_of_launches,
                climate_change_baseline_kg: emissions.climate_change_baseline_kg,
                climate_change_worst_case_kg: emissions.climate_change_worst_case_kg,
                ozone_depletion_baseline_kg: emissions.ozone_depletion_baseline_kg,
                ozone_depletion_worst_case_kg: emissions.ozone_depletion_worst_case_kg,
                resource_depletion_kg: emissions.resource_depletion_kg,
                freshwater_toxicity_m3: emissions.freshwater_toxicity_m3,
                human_toxicity: emissions.human_toxicity,
                per_subscriber_emission_kg: outcome.per_subscriber_emission_kg,
                annual_emission_kg: self.annual_emission_kg,
                social_carbon_cost_usd: self.social_carbon_cost_usd,
            })
            .collect()
    }
}

/// Evaluate one scenario end to end.
pub fn evaluate(scenario: &Scenario, ctx: &ScenarioContext<'_>) -> Result<ScenarioResult, ScenarioError> {
    let input = &scenario.input;
    let geography = geographic_metrics(
        input.number_of_satellites,
        input.total_area_earth_km_sq,
        input.altitude_km,
    )?;
    let ideal_coverage_area_km2 = round_to(geography.ideal_coverage_area_km2, RESULT_DECIMALS);

    let link = evaluate_link(&input.link_parameters(), ctx.table)?;
    let capacity = aggregate(&link, &input.capacity_inputs(ideal_coverage_area_km2))?;
    let cost = total_cost_of_ownership(&scenario.costs)?;
    let cost_per_mbps = cost_per_mbps(cost.total_cost_ownership, capacity.constellation_capacity_mbps)?;

    let table = scenario.launches.rocket.emission_table();
    let emissions = mission_emissions(&table, scenario.launches.number_of_launches);
    let climate_kg = emissions.total.climate_change_baseline_kg;
    let annual_emission_kg = annualised_kg(climate_kg, scenario.lifespan_years)?;
    let social_carbon_cost_usd =
        social_cost_of_carbon_usd(climate_kg, ctx.assumptions.social_cost_of_carbon_usd_per_tonne);

    let metrics = subscriber_metrics(
        capacity.constellation_capacity_mbps,
        &input.subscriber_counts(),
        input.traffic_fraction(),
        ctx.assumptions.busy_hour_fraction,
        ideal_coverage_area_km2,
    )?;
    let subscribers = metrics
        .into_iter()
        .map(|metrics| -> Result<SubscriberOutcome, DomainError> {
            Ok(SubscriberOutcome {
                cost: per_user_cost(&cost, metrics.subscribers, scenario.costs.assessment_period_years)?,
                per_subscriber_emission_kg: per_subscriber_kg(climate_kg, metrics.subscribers)?,
                metrics,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        constellation = %input.constellation,
        dl_frequency_hz = input.dl_frequency_hz,
        cnr_db = link.cnr_db,
        constellation_capacity_mbps = capacity.constellation_capacity_mbps,
        "evaluated scenario"
    );

    Ok(ScenarioResult {
        input: input.clone(),
        ideal_coverage_area_km2,
        link,
        capacity,
        cost,
        assessment_period_year: scenario.costs.assessment_period_years,
        cost_per_mbps,
        emissions,
        annual_emission_kg,
        social_carbon_cost_usd,
        subscribers,
    })
}

/// Results of a batch run. Failed scenarios never appear in `results`.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub scenarios: usize,
    pub results: Vec<ScenarioResult>,
    pub failures: Vec<FailedScenario>,
}

impl BatchOutcome {
    pub fn records(&self) -> Vec<ResultRecord<'_>> {
        self.results.iter().flat_map(ScenarioResult::records).collect()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            version: crate::version().to_string(),
            scenarios: self.scenarios,
            evaluated: self.results.len(),
            rows: self.results.iter().map(|r| r.subscribers.len()).sum(),
            failed: self.failures.clone(),
        }
    }

    /// Write the results table to `path` (`-` for stdout).
    pub fn write_csv(&self, path: &Path) -> Result<(), ScenarioError> {
        let writer = writer_for_path(path)?;
        write_records(writer, &self.records())?;
        Ok(())
    }
}

/// Evaluate every scenario, skipping (and logging) the ones that fail.
pub fn evaluate_batch(scenarios: &[Scenario], ctx: &ScenarioContext<'_>) -> BatchOutcome {
    let mut results = Vec::with_capacity(scenarios.len());
    let mut failures = Vec::new();
    for (index, scenario) in scenarios.iter().enumerate() {
        match evaluate(scenario, ctx) {
            Ok(result) => results.push(result),
            Err(err) => {
                warn!(
                    index,
                    constellation = %scenario.input.constellation,
                    error = %err,
                    "scenario failed; omitted from results"
                );
                failures.push(FailedScenario {
                    index,
                    constellation: scenario.input.constellation.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    info!(
        scenarios = scenarios.len(),
        evaluated = results.len(),
        failed = failures.len(),
        "batch evaluation finished"
    );
    BatchOutcome {
        scenarios: scenarios.len(),
        results,
        failures,
    }
}
