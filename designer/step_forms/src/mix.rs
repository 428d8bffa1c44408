//! Keeps the fields of a `mix` step consistent while the user edits the form.

use shared_data::labware::LabwareEntities;
use shared_data::pipette::{PipetteChannels, PipetteEntities};
use tracing::{debug, Level};

use crate::defaults::default_fields;
use crate::field::StepFieldName;
use crate::form::{FieldAccess, FormData, FormPatch, StepType};
use crate::patch_updaters::{
    all_wells_from_primary_wells, chain_patch_updaters, default_wells, field_has_changed, get_channels, PatchUpdater,
    UpdaterContext,
};

const MIX_UPDATERS: [(&str, PatchUpdater); 3] = [
    ("labware change", update_patch_on_labware_change),
    ("pipette channel change", update_patch_on_pipette_channel_change),
    ("pipette change", update_patch_on_pipette_change),
];

/// Resolve the dependent fields of a `mix` form for a patch.
#[tracing::instrument(level = Level::DEBUG, skip(form, pipettes, labware))]
pub fn dependent_fields_update_mix(
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

    chain_patch_updaters(patch, &context, &MIX_UPDATERS)
}

fn get_default_fields(fields: &[StepFieldName]) -> FormPatch {
    default_fields(StepType::Mix, fields)
}

fn update_patch_on_labware_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    if !field_has_changed(context.form, &patch, StepFieldName::Labware) {
        return patch;
    }

    let applied_form = context.form.applied(&patch);
    debug!("Labware changed. labware: {:?}", applied_form.text(StepFieldName::Labware));

    patch
        .merged(get_default_fields(&[
            StepFieldName::MixMmFromBottom,
            StepFieldName::MixTouchTipMmFromBottom,
        ]))
        .with(
            StepFieldName::Wells,
            default_wells(
                applied_form.text(StepFieldName::Labware),
                applied_form.pipette_id(),
                context.labware,
                context.pipettes,
            ),
        )
}

fn update_patch_on_pipette_channel_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    let Some(next_pipette) = patch.get(StepFieldName::Pipette) else {
        return patch;
    };

    let prev_channels = get_channels(context.form.pipette_id(), context.pipettes);
    let next_channels = get_channels(next_pipette.as_text(), context.pipettes);
    let applied_form = context.form.applied(&patch);

    let single_to_multi = prev_channels == Some(PipetteChannels::Single) && next_channels == Some(PipetteChannels::Multi);
    let multi_to_single = prev_channels == Some(PipetteChannels::Multi) && next_channels == Some(PipetteChannels::Single);

    let wells = if next_pipette.is_null() || single_to_multi {
        Some(default_wells(
            applied_form.text(StepFieldName::Labware),
            applied_form.pipette_id(),
            context.labware,
            context.pipettes,
        ))
    } else if multi_to_single {
        Some(all_wells_from_primary_wells(
            applied_form.wells(StepFieldName::Wells),
            applied_form.text(StepFieldName::Labware),
            context.labware,
        ))
    } else {
        None
    };

    match wells {
        Some(wells) => patch.with(StepFieldName::Wells, wells),
        None => patch,
    }
}

fn update_patch_on_pipette_change(patch: FormPatch, context: &UpdaterContext) -> FormPatch {
    if !field_has_changed(context.form, &patch, StepFieldName::Pipette) {
        return patch;
    }

    patch.merged(get_default_fields(&[StepFieldName::AspirateFlowRate, StepFieldName::DispenseFlowRate]))
}

#[cfg(test)]
mod tests {
    use shared_data::fixtures::{
        fixture_96_plate, fixture_trash, labware_entities, labware_entity, p10_multi, p300_single, pipette_entities,
    };

    use super::*;
    use crate::value::FormValue;

    fn catalogs() -> (PipetteEntities, LabwareEntities) {
        (
            pipette_entities(vec![p300_single("p300"), p10_multi("p10-multi")]),
            labware_entities(vec![
                labware_entity("plate", fixture_96_plate()),
                labware_entity("trash", fixture_trash()),
            ]),
        )
    }

    fn mix_form(pipette: &str, labware: &str, wells: &[&str]) -> FormData {
        let mut form = FormData::new_step("step-1", StepType::Mix);
        form.apply_patch(
            &FormPatch::new()
                .with(StepFieldName::Pipette, pipette)
                .with(StepFieldName::Labware, labware)
                .with(
                    StepFieldName::Wells,
                    wells
                        .iter()
                        .map(|well| well.to_string())
                        .collect::<Vec<_>>(),
                )
                .with(StepFieldName::MixMmFromBottom, "3")
                .with(StepFieldName::AspirateFlowRate, "50"),
        );
        form
    }

    #[test]
    fn labware_change_resets_height_and_wells() {
        // given
        let (pipettes, labware) = catalogs();
        let form = mix_form("p300", "plate", &["A1", "B1"]);

        // when
        let patch = dependent_fields_update_mix(
            FormPatch::new().with(StepFieldName::Labware, "trash"),
            &form,
            &pipettes,
            &labware,
        );

        // then
        assert_eq!(patch.text(StepFieldName::Labware), Some("trash"));
        assert_eq!(patch.text(StepFieldName::MixMmFromBottom), Some("0.5"));
        assert_eq!(patch.wells(StepFieldName::Wells), ["A1".to_string()]);
    }

    #[test]
    fn multi_to_single_expands_primary_wells() {
        // given
        let (pipettes, labware) = catalogs();
        let form = mix_form("p10-multi", "plate", &["A2"]);

        // when
        let patch = dependent_fields_update_mix(
            FormPatch::new().with(StepFieldName::Pipette, "p300"),
            &form,
            &pipettes,
            &labware,
        );

        // then
        assert_eq!(patch.wells(StepFieldName::Wells), [
            "A2", "B2", "C2", "D2", "E2", "F2", "G2", "H2"
        ]);
        assert_eq!(patch.get(StepFieldName::AspirateFlowRate), Some(&FormValue::Null));
        assert_eq!(patch.get(StepFieldName::DispenseFlowRate), Some(&FormValue::Null));
    }

    #[test]
    fn single_to_multi_resets_wells() {
        // given
        let (pipettes, labware) = catalogs();
        let form = mix_form("p300", "plate", &["A1", "B1", "C1"]);

        // when
        let patch = dependent_fields_update_mix(
            FormPatch::new().with(StepFieldName::Pipette, "p10-multi"),
            &form,
            &pipettes,
            &labware,
        );

        // then
        assert!(patch.wells(StepFieldName::Wells).is_empty());
        assert!(patch.contains(StepFieldName::Wells));
    }

    #[test]
    fn unrelated_edit_passes_through() {
        // given
        let (pipettes, labware) = catalogs();
        let form = mix_form("p300", "plate", &["A1"]);
        let patch = FormPatch::new().with(StepFieldName::Times, "3");

        // expect
        assert_eq!(dependent_fields_update_mix(patch.clone(), &form, &pipettes, &labware), patch);
    }
}
