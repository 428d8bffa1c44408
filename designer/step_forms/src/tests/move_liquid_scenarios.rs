use shared_data::fixtures::{
    fixture_96_plate, fixture_trash, labware_entities, labware_entity, p10_multi, p10_single, p300_single,
    pipette_entities,
};
use shared_data::labware::{LabwareEntities, WellName};
use shared_data::pipette::PipetteEntities;
use tap::Tap;

use crate::field::StepFieldName;
use crate::form::{ChangeTipPolicy, FieldAccess, FormData, FormPatch, StepType, TransferPath};
use crate::move_liquid::dependent_fields_update_move_liquid;
use crate::value::FormValue;

fn catalogs() -> (PipetteEntities, LabwareEntities) {
    let pipettes = pipette_entities(vec![p300_single("p300"), p10_single("p10"), p10_multi("p10-multi")]);
    let labware = labware_entities(vec![
        labware_entity("plate", fixture_96_plate()),
        labware_entity("trash", fixture_trash()),
    ]);
    (pipettes, labware)
}

fn wells(names: &[&str]) -> Vec<WellName> {
    names
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn move_liquid_form(fields: FormPatch) -> FormData {
    FormData::new_step("step-1", StepType::MoveLiquid).tap_mut(|form| form.apply_patch(&fields))
}

fn column(column: u8) -> Vec<WellName> {
    "ABCDEFGH"
        .chars()
        .map(|row| format!("{}{}", row, column))
        .collect()
}

#[test]
fn test_multi_to_single_channel_expands_primary_wells() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p10-multi")
            .with(StepFieldName::Volume, "5")
            .with(StepFieldName::AspirateLabware, "plate")
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseLabware, "plate")
            .with(StepFieldName::DispenseWells, wells(&["A2"])),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Pipette, "p300"),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.wells(StepFieldName::AspirateWells), column(1));
    assert_eq!(patch.wells(StepFieldName::DispenseWells), column(2));
    assert_eq!(patch.path(), Some(TransferPath::Single));
}

#[test]
fn test_single_to_multi_channel_clears_wells() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "5")
            .with(StepFieldName::AspirateLabware, "plate")
            .with(StepFieldName::AspirateWells, column(1))
            .with(StepFieldName::DispenseLabware, "plate")
            .with(StepFieldName::DispenseWells, column(2)),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Pipette, "p10-multi"),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.get(StepFieldName::AspirateWells), Some(&FormValue::List(vec![])));
    assert_eq!(patch.get(StepFieldName::DispenseWells), Some(&FormValue::List(vec![])));
    assert_eq!(patch.path(), Some(TransferPath::Single));
}

#[test]
fn test_pipette_cleared_resets_wells_and_air_gaps() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::AspirateLabware, "trash")
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::AspirateAirGapVolume, "30"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Pipette, FormValue::Null),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.get(StepFieldName::AspirateWells), Some(&FormValue::List(vec![])));
    assert_eq!(patch.get(StepFieldName::AspirateAirGapVolume), Some(&FormValue::Null));
    assert_eq!(patch.get(StepFieldName::DispenseAirGapVolume), Some(&FormValue::Null));
}

#[test]
fn test_labware_change_selects_single_well_and_resets_heights() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::AspirateLabware, "plate")
            .with(StepFieldName::AspirateWells, wells(&["A1", "B1"]))
            .with(StepFieldName::AspirateMmFromBottom, "5")
            .with(StepFieldName::AspirateTouchTipMmFromBottom, "12"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::AspirateLabware, "trash"),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.text(StepFieldName::AspirateLabware), Some("trash"));
    assert_eq!(patch.wells(StepFieldName::AspirateWells), wells(&["A1"]));
    assert_eq!(patch.text(StepFieldName::AspirateMmFromBottom), Some("1"));
    assert_eq!(patch.get(StepFieldName::AspirateTouchTipMmFromBottom), Some(&FormValue::Null));
    assert!(!patch.contains(StepFieldName::DispenseWells));
}

#[test]
fn test_path_away_from_multi_dispense_clears_disposal_volume() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "100")
            .with(StepFieldName::Path, TransferPath::MultiDispense)
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseWells, wells(&["A1", "A2", "A3", "A4"]))
            .with(StepFieldName::DisposalVolumeCheckbox, true)
            .with(StepFieldName::DisposalVolumeVolume, "20"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Path, TransferPath::Single),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.get(StepFieldName::DisposalVolumeCheckbox), Some(&FormValue::Bool(false)));
    assert_eq!(patch.get(StepFieldName::DisposalVolumeVolume), Some(&FormValue::Null));
}

#[test]
fn test_unchecking_disposal_volume_clears_it() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "100")
            .with(StepFieldName::Path, TransferPath::MultiDispense)
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DisposalVolumeCheckbox, true)
            .with(StepFieldName::DisposalVolumeVolume, "20"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::DisposalVolumeCheckbox, false),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.get(StepFieldName::DisposalVolumeCheckbox), Some(&FormValue::Bool(false)));
    // cleared, and the multi-dispense clamp keeps it cleared
    assert_eq!(patch.get(StepFieldName::DisposalVolumeVolume), Some(&FormValue::Null));
}

#[test]
fn test_multi_dispense_initializes_disposal_volume_and_resets_blowout() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "10")
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseWells, wells(&["A1", "A2", "A3"]))
            .with(StepFieldName::DispenseMixCheckbox, true)
            .with(StepFieldName::DispenseMixTimes, "3")
            .with(StepFieldName::BlowoutCheckbox, true)
            .with(StepFieldName::BlowoutLocation, "dest_well"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Path, TransferPath::MultiDispense),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.path(), Some(TransferPath::MultiDispense));
    assert_eq!(patch.get(StepFieldName::DisposalVolumeCheckbox), Some(&FormValue::Bool(true)));
    assert_eq!(patch.text(StepFieldName::DisposalVolumeVolume), Some("30"));
    assert_eq!(patch.get(StepFieldName::DispenseMixCheckbox), Some(&FormValue::Bool(false)));
    assert_eq!(patch.get(StepFieldName::DispenseMixTimes), Some(&FormValue::Null));
    assert_eq!(patch.text(StepFieldName::BlowoutLocation), Some("trashId"));
}

#[test]
fn test_multi_aspirate_keeps_unrelated_blowout_location() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "10")
            .with(StepFieldName::AspirateWells, wells(&["A1", "A2", "A3"]))
            .with(StepFieldName::DispenseWells, wells(&["A1"]))
            .with(StepFieldName::BlowoutLocation, "dest_well"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Path, TransferPath::MultiAspirate),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.path(), Some(TransferPath::MultiAspirate));
    assert!(!patch.contains(StepFieldName::BlowoutLocation));
    assert!(!patch.contains(StepFieldName::DisposalVolumeCheckbox));
    assert_eq!(patch.get(StepFieldName::AspirateMixCheckbox), Some(&FormValue::Bool(false)));
}

#[test]
fn test_volume_exceeding_capacity_falls_back_to_single() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p10")
            .with(StepFieldName::Volume, "4")
            .with(StepFieldName::Path, TransferPath::MultiAspirate)
            .with(StepFieldName::AspirateWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DispenseWells, wells(&["A1"])),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Volume, "6"),
        &form,
        &pipettes,
        &labware,
    );

    // then
    // two aspirations of 6uL do not fit in a 10uL tip
    assert_eq!(patch.path(), Some(TransferPath::Single));
    assert_eq!(patch.text(StepFieldName::Volume), Some("6"));
}

#[test]
fn test_incompatible_change_tip_falls_back_to_single() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "10")
            .with(StepFieldName::Path, TransferPath::MultiAspirate)
            .with(StepFieldName::AspirateWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DispenseWells, wells(&["A1"])),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::ChangeTip, ChangeTipPolicy::PerSource),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.path(), Some(TransferPath::Single));
    assert_eq!(patch.change_tip(), Some(ChangeTipPolicy::PerSource));
}

#[test]
fn test_one_to_many_becoming_n_to_n_applies_transition_overrides() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "10")
            .with(StepFieldName::Path, TransferPath::MultiDispense)
            .with(StepFieldName::ChangeTip, ChangeTipPolicy::PerSource)
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DisposalVolumeCheckbox, true)
            .with(StepFieldName::DisposalVolumeVolume, "30"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::AspirateWells, wells(&["A1", "A2"])),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.change_tip(), Some(ChangeTipPolicy::Always));
    assert_eq!(patch.path(), Some(TransferPath::Single));
    assert_eq!(patch.get(StepFieldName::DisposalVolumeCheckbox), Some(&FormValue::Bool(false)));
}

#[test]
fn test_invalid_well_ratio_resets_path_and_change_tip() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "10")
            .with(StepFieldName::Path, TransferPath::MultiAspirate)
            .with(StepFieldName::ChangeTip, ChangeTipPolicy::PerDest)
            .with(StepFieldName::AspirateWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DispenseWells, wells(&["A1"])),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::DispenseWells, wells(&["A1", "A2", "A3"])),
        &form,
        &pipettes,
        &labware,
    );

    // then
    assert_eq!(patch.path(), Some(TransferPath::Single));
    assert_eq!(patch.change_tip(), Some(ChangeTipPolicy::Always));
}

#[test]
fn test_disposal_volume_reduced_to_room_left_by_volume_change() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "100")
            .with(StepFieldName::Path, TransferPath::MultiDispense)
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseWells, wells(&["A1", "A2"]))
            .with(StepFieldName::DisposalVolumeCheckbox, true)
            .with(StepFieldName::DisposalVolumeVolume, "90"),
    );

    // when
    let patch = dependent_fields_update_move_liquid(
        FormPatch::new().with(StepFieldName::Volume, "120"),
        &form,
        &pipettes,
        &labware,
    );

    // then
    // 300 - 2 * 120
    assert_eq!(patch.path(), None);
    assert_eq!(patch.text(StepFieldName::DisposalVolumeVolume), Some("60"));
}

#[test]
fn test_empty_patch_changes_nothing() {
    // given
    let (pipettes, labware) = catalogs();
    let form = move_liquid_form(
        FormPatch::new()
            .with(StepFieldName::Pipette, "p300")
            .with(StepFieldName::Volume, "50")
            .with(StepFieldName::AspirateLabware, "plate")
            .with(StepFieldName::AspirateWells, wells(&["A1"]))
            .with(StepFieldName::DispenseLabware, "plate")
            .with(StepFieldName::DispenseWells, wells(&["B1"])),
    );

    // when
    let patch = dependent_fields_update_move_liquid(FormPatch::new(), &form, &pipettes, &labware);

    // then
    assert_eq!(form.applied(&patch), form);
}

#[test]
fn test_form_loaded_from_json_resolves_like_built_form() {
    // given
    let (pipettes, labware) = catalogs();
    let json = r#"{
        "id": "1",
        "stepType": "moveLiquid",
        "pipette": "p300",
        "volume": "0",
        "path": "multiDispense",
        "changeTip": "always",
        "aspirate_wells": ["A1"],
        "dispense_wells": ["A1", "A2"]
    }"#;
    let loaded: FormData = serde_json::from_str(json).unwrap();
    let built = FormData::from_iter([
        (StepFieldName::Id, FormValue::from("1")),
        (StepFieldName::StepType, FormValue::from("moveLiquid")),
        (StepFieldName::Pipette, FormValue::from("p300")),
        (StepFieldName::Volume, FormValue::from("0")),
        (StepFieldName::Path, TransferPath::MultiDispense.into()),
        (StepFieldName::ChangeTip, ChangeTipPolicy::Always.into()),
        (StepFieldName::AspirateWells, wells(&["A1"]).into()),
        (StepFieldName::DispenseWells, wells(&["A1", "A2"]).into()),
    ]);

    // when
    let from_loaded = dependent_fields_update_move_liquid(FormPatch::new(), &loaded, &pipettes, &labware);
    let from_built = dependent_fields_update_move_liquid(FormPatch::new(), &built, &pipettes, &labware);

    // then
    assert_eq!(loaded, built);
    assert_eq!(from_loaded, from_built);
    assert_eq!(from_loaded.path(), Some(TransferPath::Single));
    assert_eq!(serde_json::to_value(&loaded).unwrap()["id"], serde_json::json!("1"));
}
