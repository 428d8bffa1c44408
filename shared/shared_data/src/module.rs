use std::collections::BTreeMap;

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Deck slot name, e.g. `1` .. `12`
pub type Slot = String;

pub type ModulesBySlot = BTreeMap<Slot, RobotModule>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter)]
#[derive(SerializeDisplay, DeserializeFromStr)]
pub enum ModuleModel {
    #[strum(serialize = "magneticModuleV1")]
    MagneticModuleV1,
    #[strum(serialize = "magneticModuleV2")]
    MagneticModuleV2,
    #[strum(serialize = "temperatureModuleV1")]
    TemperatureModuleV1,
    #[strum(serialize = "temperatureModuleV2")]
    TemperatureModuleV2,
    #[strum(serialize = "thermocyclerModuleV1")]
    ThermocyclerModuleV1,
}

impl ModuleModel {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleModel::MagneticModuleV1 => "Magnetic Module GEN1",
            ModuleModel::MagneticModuleV2 => "Magnetic Module GEN2",
            ModuleModel::TemperatureModuleV1 => "Temperature Module GEN1",
            ModuleModel::TemperatureModuleV2 => "Temperature Module GEN2",
            ModuleModel::ThermocyclerModuleV1 => "Thermocycler Module",
        }
    }
}

/// A module attached to the robot, as reported by the robot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RobotModule {
    pub model: ModuleModel,
    pub slot: Slot,
}
