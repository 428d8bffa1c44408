//! Keeps the fields of a `moveLiquid` step consistent with each other while the user edits the form.

use rust_decimal::Decimal;
use shared_data::labware::LabwareEntities;
use shared_data::pipette::{PipetteChannels, PipetteEntities};
use strum::IntoEnumIterator;
use tracing::{debug, Level};
use util::range_utils::clamp_to_bounds;
use util::rounding::round_half_away;

use crate::defaults::{default_fields, DEST_WELL_BLOWOUT_DESTINATION, SOURCE_WELL_BLOWOUT_DESTINATION};
use crate::field::{Side, StepFieldName};
use crate::form::{ChangeTipPolicy, FieldAccess, FormData, FormPatch, StepType, TransferPath};
use crate::patch_updaters::{
    all_wells_from_primary_wells, chain_patch_updaters, default_wells, field_has_changed, get_channels, get_pipette,
    max_disposal_volume_for_multi_dispense, volume_in_capacity_for_multi, PatchUpdater, UpdaterContext,
    DISPOSAL_VOLUME_DIGITS,
};
use crate::value::FormValue;
use crate::well_ratio::{get_well_ratio, well_ratio_overrides};

const MOVE_LIQUID_UPDATERS: [(&str, PatchUpdater); 11] = [
    ("labware change", update_patch_on_labware_change),
    ("pipette channel change", update_patch_on_pipette_channel_change),
    ("pipette change", update_patch_on_pipette_change),
    ("well ratio change", update_patch_on_well_ratio_change),
    ("path", update_patch_path_field),
    ("disposal volume fields", update_patch_disposal_volume_fields),
    ("aspirate air gap clamp", clamp_aspirate_air_gap_volume),
    ("disposal volume clamp", clamp_disposal_volume),
    ("mix fields", update_patch_mix_fields),
    ("blowout fields", update_patch_blowout_fields),
    ("dispense air gap clamp", clamp_dispense_air_gap_volume),
];

/// Resolve the dependent fields of a `moveLiquid` form for a patch.
///
/// Returns the patch, extended with every field that has to change for the edited form to stay consistent.
/// Pipettes and labware that are not in the catalogs are treated as not selected.
#[tracing::instrument(level = Level::DEBUG, skip(form, pipettes, labware))]
pub fn dependent_fields_update_move_liquid(
    patch: FormPatch,
    form: &FormData,
    pipettes: &PipetteEntities,
    labware: &LabwareEntities,
) -> FormPatch {
    let context = UpdaterContext {
        form,
        pipettes,
        labware,
    };

    chain_patch_updaters(patch, &context, &MOVE_LIQUID_UPDATERS)
}

fn get_default_fields(fields: &[StepFieldName]) -> FormPatch {
    default_fields(StepType::MoveLiquid, fields)
}

fn cleared_disposal_volume_fields() -> FormPatch {
    get_default_fields(&[StepFieldName::DisposalVolumeVolume, StepFieldName::DisposalVolumeCheckbox])
}

fn update_patch_on_labware_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let changed_sides: Vec<Side> = Side::iter()
        .filter(|side| field_has_changed(context.form, &patch, side.labware()))
        .collect();

    if changed_sides.is_empty() {
        return patch;
    }

    let applied_form = context.form.applied(&patch);
    let mut update = FormPatch::new();

    for side in changed_sides {
        debug!("Labware changed. side: {}", side);
        update.extend(get_default_fields(&[side.mm_from_bottom(), side.touch_tip_mm_from_bottom()]));
        update.set(
            side.wells(),
            default_wells(
                applied_form.text(side.labware()),
                applied_form.pipette_id(),
                context.labware,
                context.pipettes,
            ),
        );
    }

    patch.merged(update)
}

fn update_patch_on_pipette_channel_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let Some(next_pipette) = patch.get(StepFieldName::Pipette) else {
        return patch;
    };

    let prev_channels = get_channels(context.form.pipette_id(), context.pipettes);
    let next_channels = get_channels(next_pipette.as_text(), context.pipettes);

    let applied_form = context.form.applied(&patch);
    let mut update = FormPatch::new();

    match (prev_channels, next_channels) {
        _ if next_pipette.is_null() => reset_wells(&mut update, &applied_form, context),
        (Some(PipetteChannels::Single), Some(PipetteChannels::Multi)) => {
            debug!("Pipette changed from single to multi-channel, resetting well selection");
            reset_wells(&mut update, &applied_form, context);
        }
        (Some(PipetteChannels::Multi), Some(PipetteChannels::Single)) => {
            debug!("Pipette changed from multi to single-channel, expanding primary wells");
            for side in Side::iter() {
                update.set(
                    side.wells(),
                    all_wells_from_primary_wells(
                        applied_form.wells(side.wells()),
                        applied_form.text(side.labware()),
                        context.labware,
                    ),
                );
            }
        }
        _ => {}
    }

    patch.merged(update)
}

fn reset_wells(update: &mut FormPatch, applied_form: &FormData, context: &UpdaterContext) {
    for side in Side::iter() {
        update.set(
            side.wells(),
            default_wells(
                applied_form.text(side.labware()),
                applied_form.pipette_id(),
                context.labware,
                context.pipettes,
            ),
        );
    }
}

fn update_patch_on_pipette_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    if !field_has_changed(context.form, &patch, StepFieldName::Pipette) {
        return patch;
    }

    let air_gap_volume = get_pipette(patch.pipette_id(), context.pipettes)
        .map(|pipette| FormValue::from_number(pipette.min_volume()))
        .unwrap_or_default();

    patch
        .merged(get_default_fields(&[
            StepFieldName::AspirateFlowRate,
            StepFieldName::DispenseFlowRate,
            StepFieldName::AspirateMixVolume,
            StepFieldName::DispenseMixVolume,
            StepFieldName::DisposalVolumeVolume,
            StepFieldName::AspirateMmFromBottom,
            StepFieldName::DispenseMmFromBottom,
        ]))
        .with(StepFieldName::AspirateAirGapVolume, air_gap_volume.clone())
        .with(StepFieldName::DispenseAirGapVolume, air_gap_volume)
}

fn update_patch_on_well_ratio_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let applied_form = context.form.applied(&patch);

    let prev_well_ratio = get_well_ratio(
        context.form.wells(StepFieldName::AspirateWells),
        context.form.wells(StepFieldName::DispenseWells),
    );
    let next_well_ratio = get_well_ratio(
        applied_form.wells(StepFieldName::AspirateWells),
        applied_form.wells(StepFieldName::DispenseWells),
    );

    match (prev_well_ratio, next_well_ratio) {
        (Some(prev), Some(next)) if prev == next => patch,
        (Some(prev), Some(next)) => {
            let overrides = well_ratio_overrides(prev, next, &applied_form);
            patch.merged(overrides)
        }
        _ => {
            // invalid well combination, e.g. 2:3 or 0:1
            let patch = patch.with(StepFieldName::Path, TransferPath::Single);
            match applied_form.change_tip() {
                Some(ChangeTipPolicy::PerSource | ChangeTipPolicy::PerDest) => {
                    patch.with(StepFieldName::ChangeTip, ChangeTipPolicy::Always)
                }
                _ => patch,
            }
        }
    }
}

/// Fall back to a `single` path when the path is unset, when the volume does not fit a multi path, or when the
/// change tip policy is incompatible with the path.
pub fn update_patch_path_field(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let applied_form = context.form.applied(&patch);

    if !applied_form
        .value(StepFieldName::Path)
        .is_truthy()
    {
        return patch.with(StepFieldName::Path, TransferPath::Single);
    }

    let pipette_capacity_exceeded = applied_form
        .value(StepFieldName::Volume)
        .is_truthy()
        && get_pipette(applied_form.pipette_id(), context.pipettes).is_some()
        && !volume_in_capacity_for_multi(&applied_form, context.pipettes);

    let incompatible_path = matches!(
        (applied_form.change_tip(), applied_form.path()),
        (Some(ChangeTipPolicy::PerSource), Some(TransferPath::MultiAspirate))
            | (Some(ChangeTipPolicy::PerDest), Some(TransferPath::MultiDispense))
    );

    if pipette_capacity_exceeded || incompatible_path {
        debug!(
            "Path reset to single. capacity_exceeded: {}, incompatible_path: {}",
            pipette_capacity_exceeded, incompatible_path
        );
        return patch.with(StepFieldName::Path, TransferPath::Single);
    }

    patch
}

fn update_patch_disposal_volume_fields(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let form = context.form;
    let applied_form = form.applied(&patch);

    let patch_sets_path = patch
        .value(StepFieldName::Path)
        .is_truthy();
    let path_changed_from_multi_dispense = patch_sets_path
        && patch.path() != Some(TransferPath::MultiDispense)
        && form.path() == Some(TransferPath::MultiDispense);
    let checkbox_cleared = patch.get(StepFieldName::DisposalVolumeCheckbox) == Some(&FormValue::Bool(false));

    if path_changed_from_multi_dispense || checkbox_cleared {
        return patch.merged(cleared_disposal_volume_fields());
    }

    let path_became_multi_dispense =
        patch.path() == Some(TransferPath::MultiDispense) && form.path() != Some(TransferPath::MultiDispense);
    let pipette_changed = patch
        .value(StepFieldName::Pipette)
        .is_truthy()
        && patch.value(StepFieldName::Pipette) != form.value(StepFieldName::Pipette);
    let checkbox_checked = patch
        .value(StepFieldName::DisposalVolumeCheckbox)
        .is_truthy();

    if !(path_became_multi_dispense || pipette_changed || checkbox_checked) {
        return patch;
    }

    match get_pipette(applied_form.pipette_id(), context.pipettes) {
        Some(pipette) => {
            // the disposal volume clamp reduces this later if needed
            patch
                .with(StepFieldName::DisposalVolumeCheckbox, true)
                .with(StepFieldName::DisposalVolumeVolume, FormValue::from_number(pipette.min_volume()))
        }
        None => patch,
    }
}

fn clamp_aspirate_air_gap_volume(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let form = context.form;

    let air_gap_volume = non_null(&patch, StepFieldName::AspirateAirGapVolume)
        .unwrap_or_else(|| form.value(StepFieldName::AspirateAirGapVolume));
    let pipette_id = non_null(&patch, StepFieldName::Pipette)
        .unwrap_or_else(|| form.value(StepFieldName::Pipette))
        .as_text();

    let Some(pipette) = get_pipette(pipette_id, context.pipettes) else {
        return patch;
    };
    if !air_gap_volume.is_truthy() {
        return patch;
    }
    let Some(volume) = air_gap_volume.to_number() else {
        return patch;
    };

    let max_air_gap_volume = pipette.capacity() - pipette.min_volume();
    let clamped = clamp_to_bounds(volume, Decimal::ZERO, max_air_gap_volume);
    if clamped == volume {
        return patch;
    }

    debug!("Aspirate air gap volume clamped. volume: {}, clamped: {}", volume, clamped);
    patch.with(StepFieldName::AspirateAirGapVolume, FormValue::from_number(clamped))
}

/// The patch value, unless it is absent or `null`.
fn non_null(patch: &FormPatch, field: StepFieldName) -> Option<&FormValue> {
    patch
        .get(field)
        .filter(|value| !value.is_null())
}

/// Round the disposal volume and keep it within the room left by a `multiDispense` path.
fn clamp_disposal_volume(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let form = context.form;
    let applied_form = form.applied(&patch);

    let disposal_volume = applied_form.value(StepFieldName::DisposalVolumeVolume);
    if applied_form.path() != Some(TransferPath::MultiDispense) || disposal_volume.as_text() == Some(".") {
        return patch;
    }

    // unknown pipette ids count as no pipette selected
    let Some(max_disposal_volume) = max_disposal_volume_for_multi_dispense(&applied_form, context.pipettes) else {
        debug!("No pipette for disposal volume. pipette: {:?}", applied_form.pipette_id());
        return patch;
    };

    let candidate = disposal_volume.to_number();
    let next_disposal_volume = candidate
        .map(|candidate| {
            clamp_to_bounds(
                round_half_away(candidate, DISPOSAL_VOLUME_DIGITS),
                Decimal::ZERO,
                max_disposal_volume,
            )
        })
        .unwrap_or(Decimal::ZERO);

    if Some(next_disposal_volume) == candidate {
        return patch;
    }

    debug!(
        "Disposal volume clamped. candidate: {:?}, clamped: {}, max: {}",
        candidate, next_disposal_volume, max_disposal_volume
    );

    if next_disposal_volume > Decimal::ZERO {
        return patch.with(StepFieldName::DisposalVolumeVolume, FormValue::from_number(next_disposal_volume));
    }

    if form.path() == Some(TransferPath::MultiDispense) {
        let volume = match applied_form
            .value(StepFieldName::DisposalVolumeCheckbox)
            .is_truthy()
        {
            true => FormValue::from("0"),
            false => FormValue::Null,
        };
        patch.with(StepFieldName::DisposalVolumeVolume, volume)
    } else {
        patch.merged(cleared_disposal_volume_fields())
    }
}

/// Mixing before a multi-aspirate, or after a multi-dispense, is not supported.
fn update_patch_mix_fields(patch: FormPatch, _context: &UpdaterContext) -> FormPatch {
    let side = match patch.path() {
        Some(TransferPath::MultiAspirate) => Side::Aspirate,
        Some(TransferPath::MultiDispense) => Side::Dispense,
        _ => return patch,
    };

    patch.merged(get_default_fields(&side.mix_fields()))
}

/// Multi-well paths have no single source or destination well to blow out into.
pub fn update_patch_blowout_fields(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    if !field_has_changed(context.form, &patch, StepFieldName::Path) {
        return patch;
    }

    let applied_form = context.form.applied(&patch);
    let blowout_location = applied_form.text(StepFieldName::BlowoutLocation);

    let should_reset_blowout_location = match applied_form.path() {
        Some(TransferPath::MultiAspirate) => blowout_location == Some(SOURCE_WELL_BLOWOUT_DESTINATION),
        Some(TransferPath::MultiDispense) => blowout_location == Some(DEST_WELL_BLOWOUT_DESTINATION),
        _ => false,
    };

    if should_reset_blowout_location {
        debug!("Blowout location reset. location: {:?}", blowout_location);
        return patch.merged(get_default_fields(&[StepFieldName::BlowoutLocation]));
    }

    patch
}

fn clamp_dispense_air_gap_volume(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let applied_form = context.form.applied(&patch);

    let air_gap_volume = applied_form.value(StepFieldName::DispenseAirGapVolume);
    if !air_gap_volume.is_truthy() {
        return patch;
    }
    let Some(pipette) = get_pipette(applied_form.pipette_id(), context.pipettes) else {
        return patch;
    };
    let Some(volume) = air_gap_volume.to_number() else {
        return patch;
    };

    let capacity = pipette.capacity();
    let max_air_gap_volume = match applied_form.path() {
        Some(TransferPath::MultiDispense) => {
            let disposal_volume = match applied_form
                .value(StepFieldName::DisposalVolumeCheckbox)
                .is_truthy()
            {
                true => applied_form
                    .value(StepFieldName::DisposalVolumeVolume)
                    .to_number()
                    .unwrap_or_default(),
                false => Decimal::ZERO,
            };
            let transfer_volume = applied_form
                .value(StepFieldName::Volume)
                .to_number()
                .unwrap_or_default();

            capacity - disposal_volume - transfer_volume
        }
        _ => capacity,
    };

    let clamped = clamp_to_bounds(volume, Decimal::ZERO, max_air_gap_volume);
    if clamped == volume {
        return patch;
    }

    debug!("Dispense air gap volume clamped. volume: {}, clamped: {}", volume, clamped);
    patch.with(StepFieldName::DispenseAirGapVolume, FormValue::from_number(clamped))
}
