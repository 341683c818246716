//! Launch-related environmental impacts of deploying a constellation.
//!
//! Each launch vehicle carries a per-launch inventory split into mission phases.
//! [`mission_emissions`] scales an inventory by the number of launches; the ratio
//! helpers turn totals into per-subscriber, per-year and monetised figures.

pub mod inventory;

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use satnet_core::units::kg_to_tonnes;
use satnet_core::{DomainError, checked_div};

pub use inventory::SchedulingQuantities;

/// Supported launch vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RocketKind {
    Falcon9,
    SoyuzFg,
    Ariane5,
}

impl RocketKind {
    pub const ALL: [RocketKind; 3] = [RocketKind::Falcon9, RocketKind::SoyuzFg, RocketKind::Ariane5];

    pub fn as_str(&self) -> &'static str {
        match self {
            RocketKind::Falcon9 => "falcon9",
            RocketKind::SoyuzFg => "soyuz_fg",
            RocketKind::Ariane5 => "ariane5",
        }
    }

    /// Per-launch inventory for every phase of this vehicle.
    pub fn emission_table(&self) -> RocketEmissionTable {
        RocketEmissionTable {
            rocket: *self,
            phases: MissionPhase::ALL
                .iter()
                .map(|&phase| (phase, self.phase_profile(phase)))
                .collect(),
        }
    }
}

/// Life-cycle phase of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionPhase {
    LaunchEvent,
    LauncherProduction,
    LauncherAit,
    PropellantProduction,
    PropellantScheduling,
    LauncherTransportation,
    LaunchCampaign,
}

impl MissionPhase {
    pub const ALL: [MissionPhase; 7] = [
        MissionPhase::LaunchEvent,
        MissionPhase::LauncherProduction,
        MissionPhase::LauncherAit,
        MissionPhase::PropellantProduction,
        MissionPhase::PropellantScheduling,
        MissionPhase::LauncherTransportation,
        MissionPhase::LaunchCampaign,
    ];
}

/// Impact totals by category. Masses in kg; freshwater toxicity in m³ equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionProfile {
    pub climate_change_baseline_kg: f64,
    pub climate_change_worst_case_kg: f64,
    pub ozone_depletion_baseline_kg: f64,
    pub ozone_depletion_worst_case_kg: f64,
    pub resource_depletion_kg: f64,
    pub freshwater_toxicity_m3: f64,
    pub human_toxicity: f64,
}

impl EmissionProfile {
    pub const fn new(
        climate_change_baseline_kg: f64,
        climate_change_worst_case_kg: f64,
        ozone_depletion_baseline_kg: f64,
        ozone_depletion_worst_case_kg: f64,
        resource_depletion_kg: f64,
        freshwater_toxicity_m3: f64,
        human_toxicity: f64,
    ) -> Self {
        Self {
            climate_change_baseline_kg,
            climate_change_worst_case_kg,
            ozone_depletion_baseline_kg,
            ozone_depletion_worst_case_kg,
            resource_depletion_kg,
            freshwater_toxicity_m3,
            human_toxicity,
        }
    }

    /// Profile with no separate worst case: worst-case fields repeat the baseline.
    pub const fn uniform(
        climate_change_kg: f64,
        ozone_depletion_kg: f64,
        resource_depletion_kg: f64,
        freshwater_toxicity_m3: f64,
        human_toxicity: f64,
    ) -> Self {
        Self::new(
            climate_change_kg,
            climate_change_kg,
            ozone_depletion_kg,
            ozone_depletion_kg,
            resource_depletion_kg,
            freshwater_toxicity_m3,
            human_toxicity,
        )
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            climate_change_baseline_kg: self.climate_change_baseline_kg * factor,
            climate_change_worst_case_kg: self.climate_change_worst_case_kg * factor,
            ozone_depletion_baseline_kg: self.ozone_depletion_baseline_kg * factor,
            ozone_depletion_worst_case_kg: self.ozone_depletion_worst_case_kg * factor,
            resource_depletion_kg: self.resource_depletion_kg * factor,
            freshwater_toxicity_m3: self.freshwater_toxicity_m3 * factor,
            human_toxicity: self.human_toxicity * factor,
        }
    }
}

impl Add for EmissionProfile {
    type Output = EmissionProfile;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            climate_change_baseline_kg: self.climate_change_baseline_kg + rhs.climate_change_baseline_kg,
            climate_change_worst_case_kg: self.climate_change_worst_case_kg
                + rhs.climate_change_worst_case_kg,
            ozone_depletion_baseline_kg: self.ozone_depletion_baseline_kg + rhs.ozone_depletion_baseline_kg,
            ozone_depletion_worst_case_kg: self.ozone_depletion_worst_case_kg
                + rhs.ozone_depletion_worst_case_kg,
            resource_depletion_kg: self.resource_depletion_kg + rhs.resource_depletion_kg,
            freshwater_toxicity_m3: self.freshwater_toxicity_m3 + rhs.freshwater_toxicity_m3,
            human_toxicity: self.human_toxicity + rhs.human_toxicity,
        }
    }
}

impl AddAssign for EmissionProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for EmissionProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(EmissionProfile::default(), Add::add)
    }
}

/// Per-launch inventory of one vehicle, phase by phase.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketEmissionTable {
    pub rocket: RocketKind,
    pub phases: Vec<(MissionPhase, EmissionProfile)>,
}

impl RocketEmissionTable {
    pub fn per_launch_total(&self) -> EmissionProfile {
        self.phases.iter().map(|(_, profile)| *profile).sum()
    }
}

/// Emissions of a full deployment campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionEmissions {
    pub rocket: RocketKind,
    pub number_of_launches: u32,
    pub per_phase: Vec<(MissionPhase, EmissionProfile)>,
    pub total: EmissionProfile,
}

/// Scale every phase of `table` by `launches`.
pub fn mission_emissions(table: &RocketEmissionTable, launches: u32) -> MissionEmissions {
    let factor = f64::from(launches);
    let per_phase: Vec<(MissionPhase, EmissionProfile)> = table
        .phases
        .iter()
        .map(|(phase, profile)| (*phase, profile.scaled(factor)))
        .collect();
    let total = per_phase.iter().map(|(_, profile)| *profile).sum();
    MissionEmissions {
        rocket: table.rocket,
        number_of_launches: launches,
        per_phase,
        total,
    }
}

/// Emissions attributable to one subscriber (kg).
pub fn per_subscriber_kg(total_kg: f64, subscribers: u64) -> Result<f64, DomainError> {
    checked_div("per_subscriber_emission_kg", total_kg, subscribers as f64)
}

/// Emissions spread evenly over the constellation lifespan (kg per year).
pub fn annualised_kg(total_kg: f64, lifespan_years: u32) -> Result<f64, DomainError> {
    checked_div("annual_emission_kg", total_kg, f64::from(lifespan_years))
}

/// Monetised climate damage of `emissions_kg` of CO₂-equivalent (USD).
pub fn social_cost_of_carbon_usd(emissions_kg: f64, usd_per_tonne: f64) -> f64 {
    kg_to_tonnes(emissions_kg) * usd_per_tonne
}
