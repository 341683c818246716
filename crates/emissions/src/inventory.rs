//! Per-launch life-cycle inventories for each supported launch vehicle.
//!
//! Figures are per launch. Phases without a separate worst-case estimate carry the
//! baseline figure in their worst-case fields.

use crate::{EmissionProfile, MissionPhase, RocketKind};

// Launch event, with worst-case climate and ozone figures.
const FALCON9_LAUNCH: EmissionProfile =
    EmissionProfile::new(630_466.1352, 27_266_165.94, 6_837.18, 30_767.31, 0.0, 0.0, 0.0);
const SOYUZ_FG_LAUNCH: EmissionProfile =
    EmissionProfile::new(288_655.1096, 12_031_437.19, 3_157.14, 13_872.25, 0.0, 0.0, 0.0);
const ARIANE5_LAUNCH: EmissionProfile =
    EmissionProfile::new(467_816.8, 107_643_343.2, 86_728.6, 211_083.6, 0.0, 0.0, 0.0);

const FALCON9_PRODUCTION: EmissionProfile =
    EmissionProfile::uniform(4_113_533.907, 0.277478514, 1_783.337118, 20_253_601.64, 1.51530806);
const SOYUZ_FG_PRODUCTION: EmissionProfile =
    EmissionProfile::uniform(44_680_412.98, 3.11181773, 12_473.4086, 280_703_930.5, 19.1361269);
const ARIANE5_PRODUCTION: EmissionProfile =
    EmissionProfile::uniform(11_018_755.48, 0.745735051, 2_719.725687, 69_735_037.48, 4.585385379);

const FALCON9_PROPELLANT: EmissionProfile =
    EmissionProfile::uniform(4_744_753.339, 0.546874653, 32.92663196, 15_292_951.2, 1.378727964);
const SOYUZ_FG_PROPELLANT: EmissionProfile =
    EmissionProfile::uniform(968_910.1994, 0.109998823, 6.71625049, 3_114_043.098, 0.28140976);
const ARIANE5_PROPELLANT: EmissionProfile =
    EmissionProfile::uniform(4_793_267.48, 0.223292749, 34.59642811, 17_124_098.34, 1.520253794);

const FALCON9_TRANSPORT: EmissionProfile =
    EmissionProfile::uniform(17_220.72491, 0.003568284, 0.83687164, 47_571.20342, 0.004766684);
const SOYUZ_FG_TRANSPORT: EmissionProfile =
    EmissionProfile::uniform(4_328.603808, 0.001339551, 0.158493574, 22_931.63867, 0.002580373);
const ARIANE5_TRANSPORT: EmissionProfile =
    EmissionProfile::uniform(11_043.18682, 0.001892801, 0.194786912, 17_341.87779, 0.001653926);

// Processes common to every vehicle.
const LAUNCHER_AIT: EmissionProfile =
    EmissionProfile::uniform(1_616_263.557, 0.156575296, 15.65466435, 7_701_094.993, 0.486234151);
const LAUNCH_CAMPAIGN: EmissionProfile =
    EmissionProfile::uniform(5_666_556.742, 0.777870405, 33.22600998, 18_683_396.82, 1.695861368);

// Unit processes behind propellant scheduling.
const PROPELLANT_CONTAINMENT: EmissionProfile =
    EmissionProfile::uniform(3_010.041736, 0.000153001, 0.304111566, 26_153.09824, 0.001972144);
const WASTE_DECONTAMINATION: EmissionProfile =
    EmissionProfile::uniform(8.178531277, 0.000000855992, 0.000238204, 47.24602286, 0.00000283671);
const PROPELLANT_HANDLING: EmissionProfile =
    EmissionProfile::uniform(5.277030386, 0.00000026525, 0.000372566, 5.984817084, 0.000000601283);
const PROPELLANT_STORAGE: EmissionProfile =
    EmissionProfile::uniform(5.789177649, 0.000000461473, 0.000117724, 22.90504946, 0.00000206909);

/// Quantities of each scheduling unit process consumed by one launch campaign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingQuantities {
    pub containment: f64,
    pub decontamination: f64,
    pub handling: f64,
    pub storage: f64,
}

impl SchedulingQuantities {
    pub fn profile(&self) -> EmissionProfile {
        PROPELLANT_CONTAINMENT.scaled(self.containment)
            + WASTE_DECONTAMINATION.scaled(self.decontamination)
            + PROPELLANT_HANDLING.scaled(self.handling)
            + PROPELLANT_STORAGE.scaled(self.storage)
    }
}

impl RocketKind {
    pub fn scheduling_quantities(&self) -> SchedulingQuantities {
        match self {
            RocketKind::Falcon9 => SchedulingQuantities {
                containment: 530.0,
                decontamination: 488_370.0,
                handling: 504.0,
                storage: 494.0,
            },
            RocketKind::SoyuzFg => SchedulingQuantities {
                containment: 304.0,
                decontamination: 281_710.0,
                handling: 504.0,
                storage: 284.0,
            },
            RocketKind::Ariane5 => SchedulingQuantities {
                containment: 1_148.0,
                decontamination: 674_900.0,
                handling: 504.0,
                storage: 1_105.0,
            },
        }
    }

    /// Per-launch inventory for one mission phase.
    pub fn phase_profile(&self, phase: MissionPhase) -> EmissionProfile {
        match phase {
            MissionPhase::LaunchEvent => match self {
                RocketKind::Falcon9 => FALCON9_LAUNCH,
                RocketKind::SoyuzFg => SOYUZ_FG_LAUNCH,
                RocketKind::Ariane5 => ARIANE5_LAUNCH,
            },
            MissionPhase::LauncherProduction => match self {
                RocketKind::Falcon9 => FALCON9_PRODUCTION,
                RocketKind::SoyuzFg => SOYUZ_FG_PRODUCTION,
                RocketKind::Ariane5 => ARIANE5_PRODUCTION,
            },
            MissionPhase::LauncherAit => LAUNCHER_AIT,
            MissionPhase::PropellantProduction => match self {
                RocketKind::Falcon9 => FALCON9_PROPELLANT,
                RocketKind::SoyuzFg => SOYUZ_FG_PROPELLANT,
                RocketKind::Ariane5 => ARIANE5_PROPELLANT,
            },
            MissionPhase::PropellantScheduling => self.scheduling_quantities().profile(),
            MissionPhase::LauncherTransportation => match self {
                RocketKind::Falcon9 => FALCON9_TRANSPORT,
                RocketKind::SoyuzFg => SOYUZ_FG_TRANSPORT,
                RocketKind::Ariane5 => ARIANE5_TRANSPORT,
            },
            MissionPhase::LaunchCampaign => LAUNCH_CAMPAIGN,
        }
    }
}
