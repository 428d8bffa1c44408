use crate::field::StepFieldName;
use crate::form::{ChangeTipPolicy, FieldAccess, FormData, FormPatch, StepType, TransferPath};
use crate::value::FormValue;

pub const DEFAULT_CHANGE_TIP_OPTION: ChangeTipPolicy = ChangeTipPolicy::Always;
/// mm
pub const DEFAULT_MM_FROM_BOTTOM_ASPIRATE: &str = "1";
/// mm
pub const DEFAULT_MM_FROM_BOTTOM_DISPENSE: &str = "0.5";
pub const DEFAULT_WELL_ORDER_FIRST_OPTION: &str = "t2b";
pub const DEFAULT_WELL_ORDER_SECOND_OPTION: &str = "l2r";
/// seconds
pub const DEFAULT_DELAY_SECONDS: &str = "1";

pub const FIXED_TRASH_ID: &str = "trashId";
pub const SOURCE_WELL_BLOWOUT_DESTINATION: &str = "source_well";
pub const DEST_WELL_BLOWOUT_DESTINATION: &str = "dest_well";

/// The values of a freshly added step of the given type.
///
/// Manual intervention steps hold only structured location updates, which are not form fields, so they have no
/// defaults.
pub fn defaults_for_step_type(step_type: StepType) -> FormPatch {
    use StepFieldName::{
        Pipette, Volume, ChangeTip, Path, AspirateWellsGrouped, AspirateFlowRate, AspirateLabware,
        AspirateWells, AspirateWellOrderFirst, AspirateWellOrderSecond, AspirateMixCheckbox, AspirateMixTimes,
        AspirateMixVolume, AspirateMmFromBottom, AspirateTouchTipCheckbox, AspirateTouchTipMmFromBottom,
        DispenseFlowRate, DispenseLabware, DispenseWells, DispenseWellOrderFirst, DispenseWellOrderSecond,
        DispenseMixCheckbox, DispenseMixTimes, DispenseMixVolume, DispenseMmFromBottom, DispenseTouchTipCheckbox,
        DispenseTouchTipMmFromBottom, DisposalVolumeCheckbox, DisposalVolumeVolume, BlowoutCheckbox,
        BlowoutLocation, PreWetTip, AspirateAirGapCheckbox, AspirateAirGapVolume, AspirateDelayCheckbox,
        AspirateDelayMmFromBottom, AspirateDelaySeconds, DispenseAirGapCheckbox, DispenseAirGapVolume,
        DispenseDelayCheckbox, DispenseDelaySeconds, DispenseDelayMmFromBottom, Labware, MixWellOrderFirst,
        MixWellOrderSecond, MixMmFromBottom, MixTouchTipCheckbox, MixTouchTipMmFromBottom, Times, Wells,
        PauseAction, PauseHour, PauseMinute, PauseSecond, PauseMessage, ModuleId, PauseTemperature, MagnetAction,
        EngageHeight, SetTemperature, TargetTemperature, ThermocyclerFormType, BlockIsActive, BlockTargetTemp,
        LidIsActive, LidTargetTemp, LidOpen, ProfileVolume, ProfileTargetLidTemp, OrderedProfileItems,
        BlockIsActiveHold, BlockTargetTempHold, LidIsActiveHold, LidTargetTempHold, LidOpenHold
    };

    let defaults: Vec<(StepFieldName, FormValue)> = match step_type {
        StepType::MoveLiquid => vec![
            (Pipette, FormValue::Null),
            (Volume, FormValue::Null),
            (ChangeTip, DEFAULT_CHANGE_TIP_OPTION.into()),
            (Path, TransferPath::Single.into()),
            (AspirateWellsGrouped, false.into()),
            (AspirateFlowRate, FormValue::Null),
            (AspirateLabware, FormValue::Null),
            (AspirateWells, FormValue::List(vec![])),
            (AspirateWellOrderFirst, DEFAULT_WELL_ORDER_FIRST_OPTION.into()),
            (AspirateWellOrderSecond, DEFAULT_WELL_ORDER_SECOND_OPTION.into()),
            (AspirateMixCheckbox, false.into()),
            (AspirateMixTimes, FormValue::Null),
            (AspirateMixVolume, FormValue::Null),
            (AspirateMmFromBottom, DEFAULT_MM_FROM_BOTTOM_ASPIRATE.into()),
            (AspirateTouchTipCheckbox, false.into()),
            (AspirateTouchTipMmFromBottom, FormValue::Null),
            (DispenseFlowRate, FormValue::Null),
            (DispenseLabware, FormValue::Null),
            (DispenseWells, FormValue::List(vec![])),
            (DispenseWellOrderFirst, DEFAULT_WELL_ORDER_FIRST_OPTION.into()),
            (DispenseWellOrderSecond, DEFAULT_WELL_ORDER_SECOND_OPTION.into()),
            (DispenseMixCheckbox, false.into()),
            (DispenseMixTimes, FormValue::Null),
            (DispenseMixVolume, FormValue::Null),
            (DispenseMmFromBottom, DEFAULT_MM_FROM_BOTTOM_DISPENSE.into()),
            (DispenseTouchTipCheckbox, false.into()),
            (DispenseTouchTipMmFromBottom, FormValue::Null),
            (DisposalVolumeCheckbox, false.into()),
            (DisposalVolumeVolume, FormValue::Null),
            (BlowoutCheckbox, false.into()),
            (BlowoutLocation, FIXED_TRASH_ID.into()),
            (PreWetTip, false.into()),
            (AspirateAirGapCheckbox, false.into()),
            (AspirateAirGapVolume, FormValue::Null),
            (AspirateDelayCheckbox, false.into()),
            (AspirateDelayMmFromBottom, DEFAULT_MM_FROM_BOTTOM_ASPIRATE.into()),
            (AspirateDelaySeconds, DEFAULT_DELAY_SECONDS.into()),
            (DispenseAirGapCheckbox, false.into()),
            (DispenseAirGapVolume, FormValue::Null),
            (DispenseDelayCheckbox, false.into()),
            (DispenseDelaySeconds, DEFAULT_DELAY_SECONDS.into()),
            (DispenseDelayMmFromBottom, DEFAULT_MM_FROM_BOTTOM_DISPENSE.into()),
        ],
        StepType::Mix => vec![
            (ChangeTip, DEFAULT_CHANGE_TIP_OPTION.into()),
            (Labware, FormValue::Null),
            (MixWellOrderFirst, DEFAULT_WELL_ORDER_FIRST_OPTION.into()),
            (MixWellOrderSecond, DEFAULT_WELL_ORDER_SECOND_OPTION.into()),
            (BlowoutCheckbox, false.into()),
            (BlowoutLocation, FIXED_TRASH_ID.into()),
            // mix uses the dispense height for both aspirate and dispense
            (MixMmFromBottom, DEFAULT_MM_FROM_BOTTOM_DISPENSE.into()),
            (MixTouchTipCheckbox, false.into()),
            (MixTouchTipMmFromBottom, FormValue::Null),
            (Pipette, FormValue::Null),
            (Times, FormValue::Null),
            (Wells, FormValue::List(vec![])),
            (AspirateFlowRate, FormValue::Null),
            (DispenseFlowRate, FormValue::Null),
            (AspirateDelayCheckbox, false.into()),
            (AspirateDelaySeconds, DEFAULT_DELAY_SECONDS.into()),
            (DispenseDelayCheckbox, false.into()),
            (DispenseDelaySeconds, DEFAULT_DELAY_SECONDS.into()),
        ],
        StepType::Pause => vec![
            (PauseAction, FormValue::Null),
            (PauseHour, FormValue::Null),
            (PauseMinute, FormValue::Null),
            (PauseSecond, FormValue::Null),
            (PauseMessage, "".into()),
            (ModuleId, FormValue::Null),
            (PauseTemperature, FormValue::Null),
        ],
        StepType::Magnet => vec![
            (ModuleId, FormValue::Null),
            (MagnetAction, FormValue::Null),
            (EngageHeight, FormValue::Null),
        ],
        StepType::Temperature => vec![
            (ModuleId, FormValue::Null),
            (SetTemperature, FormValue::Null),
            (TargetTemperature, FormValue::Null),
        ],
        StepType::Thermocycler => vec![
            (ThermocyclerFormType, FormValue::Null),
            (ModuleId, FormValue::Null),
            (BlockIsActive, false.into()),
            (BlockTargetTemp, FormValue::Null),
            (LidIsActive, false.into()),
            (LidTargetTemp, FormValue::Null),
            (LidOpen, false.into()),
            (ProfileVolume, FormValue::Null),
            (ProfileTargetLidTemp, FormValue::Null),
            (OrderedProfileItems, FormValue::List(vec![])),
            (BlockIsActiveHold, false.into()),
            (BlockTargetTempHold, FormValue::Null),
            (LidIsActiveHold, false.into()),
            (LidTargetTempHold, FormValue::Null),
            (LidOpenHold, FormValue::Null),
        ],
        StepType::ManualIntervention => vec![],
    };

    FormPatch::from_iter(defaults)
}

/// The defaults of the requested fields, fields without a default for the step type are omitted.
pub fn default_fields(step_type: StepType, fields: &[StepFieldName]) -> FormPatch {
    let defaults = defaults_for_step_type(step_type);

    fields
        .iter()
        .filter_map(|field| {
            defaults
                .get(*field)
                .map(|value| (*field, value.clone()))
        })
        .collect()
}

impl FormData {
    /// A new form for a step, populated with the step type's defaults.
    pub fn new_step(id: &str, step_type: StepType) -> FormData {
        let mut form = FormData::from_iter([
            (StepFieldName::Id, FormValue::from(id)),
            (StepFieldName::StepType, FormValue::from(step_type.to_string())),
        ]);
        form.apply_patch(&defaults_for_step_type(step_type));
        form
    }
}
