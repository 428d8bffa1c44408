//! Building blocks shared by the dependent field resolvers.

use rust_decimal::Decimal;
use shared_data::labware::{LabwareEntities, WellName};
use shared_data::pipette::{PipetteChannels, PipetteEntities, PipetteEntity};
use shared_data::well_sets;
use tracing::trace;
use util::rounding::round_half_away;

use crate::field::StepFieldName;
use crate::form::{FieldAccess, FormData, FormPatch, TransferPath};

/// Disposal volumes are rounded to this many decimal places.
pub const DISPOSAL_VOLUME_DIGITS: u32 = 1;

/// Read-only inputs shared by every stage of a resolver.
#[derive(Debug, Clone, Copy)]
pub struct UpdaterContext<'a> {
    /// The form as it was before the edit.
    pub form: &'a FormData,
    pub pipettes: &'a PipetteEntities,
    pub labware: &'a LabwareEntities,
}

/// A single stage of a resolver, receives the patch accumulated so far and returns the next patch.
pub type PatchUpdater = fn(FormPatch, &UpdaterContext) -> FormPatch;

/// Thread the patch through each updater in order.
pub fn chain_patch_updaters(patch: FormPatch, context: &UpdaterContext, updaters: &[(&str, PatchUpdater)]) -> FormPatch {
    updaters
        .iter()
        .fold(patch, |patch, (name, updater)| {
            let patch = updater(patch, context);
            trace!("Patch updated. stage: {}, patch: {:?}", name, patch);
            patch
        })
}

/// `true` if the patch sets the field to a value other than the form's.
pub fn field_has_changed(form: &FormData, patch: &FormPatch, field: StepFieldName) -> bool {
    match patch.get(field) {
        Some(value) => value != form.value(field),
        None => false,
    }
}

pub fn get_pipette<'a>(pipette_id: Option<&str>, pipettes: &'a PipetteEntities) -> Option<&'a PipetteEntity> {
    pipette_id.and_then(|pipette_id| pipettes.get(pipette_id))
}

/// `None` when no pipette is selected or the pipette is unknown.
pub fn get_channels(pipette_id: Option<&str>, pipettes: &PipetteEntities) -> Option<PipetteChannels> {
    get_pipette(pipette_id, pipettes).map(|pipette| pipette.channels())
}

/// The wells to select when labware or pipette selection changes.
///
/// Single-well labware, e.g. a reservoir, gets its only well selected, for everything else the selection is
/// cleared.
pub fn default_wells(
    labware_id: Option<&str>,
    pipette_id: Option<&str>,
    labware: &LabwareEntities,
    pipettes: &PipetteEntities,
) -> Vec<WellName> {
    let (Some(labware_id), Some(_pipette)) = (labware_id, get_pipette(pipette_id, pipettes)) else {
        return vec![];
    };
    let Some(labware_entity) = labware.get(labware_id) else {
        return vec![];
    };

    let definition = &labware_entity.def;
    match (definition.is_single_well(), definition.first_well()) {
        (true, Some(well)) => vec![well.clone()],
        _ => vec![],
    }
}

/// Expand the primary wells of a multi-channel selection into all wells, unknown labware has no wells.
pub fn all_wells_from_primary_wells(
    primary_wells: &[WellName],
    labware_id: Option<&str>,
    labware: &LabwareEntities,
) -> Vec<WellName> {
    labware_id
        .and_then(|labware_id| labware.get(labware_id))
        .map(|labware_entity| well_sets::all_wells_from_primary_wells(primary_wells, &labware_entity.def))
        .unwrap_or_default()
}

/// The aspirate air gap volume, zero when the air gap is disabled or not a number.
fn aspirate_air_gap_volume(form: &FormData) -> Decimal {
    if !form
        .value(StepFieldName::AspirateAirGapCheckbox)
        .is_truthy()
    {
        return Decimal::ZERO;
    }

    form.value(StepFieldName::AspirateAirGapVolume)
        .to_number()
        .unwrap_or_default()
}

/// `true` if at least two transfers fit in a single aspiration for the form's path.
///
/// For `multiDispense` there must also be room for the pipette's minimum volume, which is the recommended disposal
/// volume.  Paths other than `multiAspirate` and `multiDispense` are never in capacity for multi.
pub fn volume_in_capacity_for_multi(form: &FormData, pipettes: &PipetteEntities) -> bool {
    let Some(pipette) = get_pipette(form.pipette_id(), pipettes) else {
        return false;
    };
    let Some(volume) = form
        .value(StepFieldName::Volume)
        .to_number()
    else {
        return false;
    };
    let air_gap_volume = aspirate_air_gap_volume(form);
    let capacity = pipette.capacity();

    match form.path() {
        Some(TransferPath::MultiAspirate) => {
            volume > Decimal::ZERO && Decimal::TWO * (volume + air_gap_volume) <= capacity
        }
        Some(TransferPath::MultiDispense) => {
            volume > Decimal::ZERO && Decimal::TWO * volume + air_gap_volume <= capacity - pipette.min_volume()
        }
        _ => false,
    }
}

/// The largest disposal volume that still leaves room for two transfers and the aspirate air gap.
///
/// `None` when no pipette is selected, or the pipette is unknown.  A transfer volume that is not a number leaves no
/// room at all.
pub fn max_disposal_volume_for_multi_dispense(form: &FormData, pipettes: &PipetteEntities) -> Option<Decimal> {
    let pipette = get_pipette(form.pipette_id(), pipettes)?;

    let max_disposal_volume = match form
        .value(StepFieldName::Volume)
        .to_number()
    {
        Some(volume) => pipette.capacity() - Decimal::TWO * volume - aspirate_air_gap_volume(form),
        None => Decimal::ZERO,
    };

    Some(round_half_away(max_disposal_volume, DISPOSAL_VOLUME_DIGITS))
}
