use shared_data::labware::LabwareEntities;
use shared_data::pipette::PipetteEntities;
use tracing::{debug, trace};

use crate::form::{FormData, FormPatch, StepType};
use crate::mix::dependent_fields_update_mix;
use crate::move_liquid::dependent_fields_update_move_liquid;

/// Resolve a patch for a form of any step type.
///
/// Step types without dependent fields get the patch back unchanged.
pub fn handle_form_change(
    patch: FormPatch,
    form: &FormData,
    pipettes: &PipetteEntities,
    labware: &LabwareEntities,
) -> FormPatch {
    let step_type = form.step_type();
    debug!("Handling form change. step_type: {:?}, fields: {}", step_type, patch.len());

    let updates = match step_type {
        Some(StepType::MoveLiquid) => dependent_fields_update_move_liquid(patch.clone(), form, pipettes, labware),
        Some(StepType::Mix) => dependent_fields_update_mix(patch.clone(), form, pipettes, labware),
        _ => FormPatch::new(),
    };
    trace!("Dependent field updates. updates: {:?}", updates);

    patch.merged(updates)
}
