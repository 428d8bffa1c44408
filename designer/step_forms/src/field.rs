use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::IntoEnumIterator;
use thiserror::Error;

/// The name of a step form field, as persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum_macros::Display, strum_macros::IntoStaticStr, strum_macros::EnumIter)]
#[derive(SerializeDisplay, DeserializeFromStr)]
pub enum StepFieldName {
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "stepType")]
    StepType,
    #[strum(serialize = "stepName")]
    StepName,
    #[strum(serialize = "stepDetails")]
    StepDetails,

    #[strum(serialize = "pipette")]
    Pipette,
    #[strum(serialize = "volume")]
    Volume,
    #[strum(serialize = "changeTip")]
    ChangeTip,
    #[strum(serialize = "path")]
    Path,
    #[strum(serialize = "preWetTip")]
    PreWetTip,

    #[strum(serialize = "aspirate_labware")]
    AspirateLabware,
    #[strum(serialize = "aspirate_wells")]
    AspirateWells,
    #[strum(serialize = "aspirate_wells_grouped")]
    AspirateWellsGrouped,
    #[strum(serialize = "aspirate_wellOrder_first")]
    AspirateWellOrderFirst,
    #[strum(serialize = "aspirate_wellOrder_second")]
    AspirateWellOrderSecond,
    #[strum(serialize = "aspirate_flowRate")]
    AspirateFlowRate,
    #[strum(serialize = "aspirate_mmFromBottom")]
    AspirateMmFromBottom,
    #[strum(serialize = "aspirate_mix_checkbox")]
    AspirateMixCheckbox,
    #[strum(serialize = "aspirate_mix_times")]
    AspirateMixTimes,
    #[strum(serialize = "aspirate_mix_volume")]
    AspirateMixVolume,
    #[strum(serialize = "aspirate_touchTip_checkbox")]
    AspirateTouchTipCheckbox,
    #[strum(serialize = "aspirate_touchTip_mmFromBottom")]
    AspirateTouchTipMmFromBottom,
    #[strum(serialize = "aspirate_airGap_checkbox")]
    AspirateAirGapCheckbox,
    #[strum(serialize = "aspirate_airGap_volume")]
    AspirateAirGapVolume,
    #[strum(serialize = "aspirate_delay_checkbox")]
    AspirateDelayCheckbox,
    #[strum(serialize = "aspirate_delay_seconds")]
    AspirateDelaySeconds,
    #[strum(serialize = "aspirate_delay_mmFromBottom")]
    AspirateDelayMmFromBottom,

    #[strum(serialize = "dispense_labware")]
    DispenseLabware,
    #[strum(serialize = "dispense_wells")]
    DispenseWells,
    #[strum(serialize = "dispense_wellOrder_first")]
    DispenseWellOrderFirst,
    #[strum(serialize = "dispense_wellOrder_second")]
    DispenseWellOrderSecond,
    #[strum(serialize = "dispense_flowRate")]
    DispenseFlowRate,
    #[strum(serialize = "dispense_mmFromBottom")]
    DispenseMmFromBottom,
    #[strum(serialize = "dispense_mix_checkbox")]
    DispenseMixCheckbox,
    #[strum(serialize = "dispense_mix_times")]
    DispenseMixTimes,
    #[strum(serialize = "dispense_mix_volume")]
    DispenseMixVolume,
    #[strum(serialize = "dispense_touchTip_checkbox")]
    DispenseTouchTipCheckbox,
    #[strum(serialize = "dispense_touchTip_mmFromBottom")]
    DispenseTouchTipMmFromBottom,
    #[strum(serialize = "dispense_airGap_checkbox")]
    DispenseAirGapCheckbox,
    #[strum(serialize = "dispense_airGap_volume")]
    DispenseAirGapVolume,
    #[strum(serialize = "dispense_delay_checkbox")]
    DispenseDelayCheckbox,
    #[strum(serialize = "dispense_delay_seconds")]
    DispenseDelaySeconds,
    #[strum(serialize = "dispense_delay_mmFromBottom")]
    DispenseDelayMmFromBottom,

    #[strum(serialize = "disposalVolume_checkbox")]
    DisposalVolumeCheckbox,
    #[strum(serialize = "disposalVolume_volume")]
    DisposalVolumeVolume,
    #[strum(serialize = "blowout_checkbox")]
    BlowoutCheckbox,
    #[strum(serialize = "blowout_location")]
    BlowoutLocation,

    // mix
    #[strum(serialize = "labware")]
    Labware,
    #[strum(serialize = "wells")]
    Wells,
    #[strum(serialize = "times")]
    Times,
    #[strum(serialize = "mix_wellOrder_first")]
    MixWellOrderFirst,
    #[strum(serialize = "mix_wellOrder_second")]
    MixWellOrderSecond,
    #[strum(serialize = "mix_mmFromBottom")]
    MixMmFromBottom,
    #[strum(serialize = "mix_touchTip_checkbox")]
    MixTouchTipCheckbox,
    #[strum(serialize = "mix_touchTip_mmFromBottom")]
    MixTouchTipMmFromBottom,

    // modules
    #[strum(serialize = "moduleId")]
    ModuleId,

    // pause
    #[strum(serialize = "pauseAction")]
    PauseAction,
    #[strum(serialize = "pauseHour")]
    PauseHour,
    #[strum(serialize = "pauseMinute")]
    PauseMinute,
    #[strum(serialize = "pauseSecond")]
    PauseSecond,
    #[strum(serialize = "pauseMessage")]
    PauseMessage,
    #[strum(serialize = "pauseTemperature")]
    PauseTemperature,

    // magnet
    #[strum(serialize = "magnetAction")]
    MagnetAction,
    #[strum(serialize = "engageHeight")]
    EngageHeight,

    // temperature
    #[strum(serialize = "setTemperature")]
    SetTemperature,
    #[strum(serialize = "targetTemperature")]
    TargetTemperature,

    // thermocycler
    #[strum(serialize = "thermocyclerFormType")]
    ThermocyclerFormType,
    #[strum(serialize = "blockIsActive")]
    BlockIsActive,
    #[strum(serialize = "blockTargetTemp")]
    BlockTargetTemp,
    #[strum(serialize = "lidIsActive")]
    LidIsActive,
    #[strum(serialize = "lidTargetTemp")]
    LidTargetTemp,
    #[strum(serialize = "lidOpen")]
    LidOpen,
    #[strum(serialize = "profileVolume")]
    ProfileVolume,
    #[strum(serialize = "profileTargetLidTemp")]
    ProfileTargetLidTemp,
    #[strum(serialize = "orderedProfileItems")]
    OrderedProfileItems,
    #[strum(serialize = "blockIsActiveHold")]
    BlockIsActiveHold,
    #[strum(serialize = "blockTargetTempHold")]
    BlockTargetTempHold,
    #[strum(serialize = "lidIsActiveHold")]
    LidIsActiveHold,
    #[strum(serialize = "lidTargetTempHold")]
    LidTargetTempHold,
    #[strum(serialize = "lidOpenHold")]
    LidOpenHold,
}

impl FromStr for StepFieldName {
    type Err = StepFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|field| <&'static str>::from(*field) == s)
            .ok_or_else(|| StepFieldError::UnknownStepField(s.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum StepFieldError {
    #[error("Unknown step field. name: '{0:}'")]
    UnknownStepField(String),
}

/// The two sides of a transfer, each with its own set of per-side fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[derive(strum_macros::Display, strum_macros::EnumIter)]
pub enum Side {
    #[strum(serialize = "aspirate")]
    Aspirate,
    #[strum(serialize = "dispense")]
    Dispense,
}

impl Side {
    pub fn labware(&self) -> StepFieldName {
        match self {
            Side::Aspirate => StepFieldName::AspirateLabware,
            Side::Dispense => StepFieldName::DispenseLabware,
        }
    }

    pub fn wells(&self) -> StepFieldName {
        match self {
            Side::Aspirate => StepFieldName::AspirateWells,
            Side::Dispense => StepFieldName::DispenseWells,
        }
    }

    pub fn mm_from_bottom(&self) -> StepFieldName {
        match self {
            Side::Aspirate => StepFieldName::AspirateMmFromBottom,
            Side::Dispense => StepFieldName::DispenseMmFromBottom,
        }
    }

    pub fn touch_tip_mm_from_bottom(&self) -> StepFieldName {
        match self {
            Side::Aspirate => StepFieldName::AspirateTouchTipMmFromBottom,
            Side::Dispense => StepFieldName::DispenseTouchTipMmFromBottom,
        }
    }

    /// checkbox, times, volume
    pub fn mix_fields(&self) -> [StepFieldName; 3] {
        match self {
            Side::Aspirate => [
                StepFieldName::AspirateMixCheckbox,
                StepFieldName::AspirateMixTimes,
                StepFieldName::AspirateMixVolume,
            ],
            Side::Dispense => [
                StepFieldName::DispenseMixCheckbox,
                StepFieldName::DispenseMixTimes,
                StepFieldName::DispenseMixVolume,
            ],
        }
    }
}
