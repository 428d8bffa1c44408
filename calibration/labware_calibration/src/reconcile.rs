use indexmap::IndexMap;
use shared_data::module::ModulesBySlot;
use tracing::{debug, trace, Level};
use util::rounding::round_f64_half_away;

use crate::identity::{matches_labware_identity_for_calibration, LabwareIdentity};
use crate::protocol_labware::{BaseProtocolLabware, CalibrationOffset, LabwareSummary, ProtocolLabware};
use crate::record::LabwareCalibration;

/// Offsets are rounded to this many decimal places.
pub const OFFSET_DIGITS: u32 = 1;

/// `None` if any component of the offset is not a finite number.
pub fn format_calibration_data(record: &LabwareCalibration) -> Option<CalibrationOffset> {
    let [x, y, z] = record.calibration_data.offset.value;

    Some(CalibrationOffset {
        x: round_f64_half_away(x, OFFSET_DIGITS)?,
        y: round_f64_half_away(y, OFFSET_DIGITS)?,
        z: round_f64_half_away(z, OFFSET_DIGITS)?,
    })
}

/// Project each protocol labware instance, in order, resolving its identity, parent module and calibration.
///
/// When several calibration records match an instance the first one wins.
#[tracing::instrument(level = Level::DEBUG, skip_all)]
pub fn protocol_labware_list(
    labware: &[ProtocolLabware],
    calibrations: &[LabwareCalibration],
    modules_by_slot: &ModulesBySlot,
) -> Vec<BaseProtocolLabware> {
    labware
        .iter()
        .map(|instance| {
            let mut base_labware = BaseProtocolLabware {
                slot: instance.slot.clone(),
                labware_type: instance.labware_type.clone(),
                definition: instance.definition.clone(),
                definition_hash: instance.definition_hash.clone(),
                load_name: instance
                    .definition
                    .as_ref()
                    .map(|definition| definition.load_name().to_string())
                    .unwrap_or_else(|| instance.labware_type.clone()),
                namespace: instance
                    .definition
                    .as_ref()
                    .map(|definition| definition.namespace.clone()),
                version: instance
                    .definition
                    .as_ref()
                    .map(|definition| definition.version),
                parent: modules_by_slot
                    .get(&instance.slot)
                    .map(|module| module.model),
                calibration_data: None,
            };

            base_labware.calibration_data = calibrations
                .iter()
                .find(|record| matches_labware_identity_for_calibration(record, &base_labware))
                .and_then(|record| {
                    debug!(
                        "Matched calibration. slot: {}, load_name: {}, calibration: {}",
                        base_labware.slot, base_labware.load_name, record.id
                    );
                    format_calibration_data(record)
                });

            trace!("Projected labware. labware: {:?}", base_labware);
            base_labware
        })
        .collect()
}

/// Aggregate identical labware into one summary each, in order of first appearance.
///
/// Each summary reflects the first instance of its group.
pub fn unique_protocol_labware_summaries(labware_list: &[BaseProtocolLabware]) -> Vec<LabwareSummary> {
    let mut groups: IndexMap<LabwareIdentity<'_>, (&BaseProtocolLabware, usize)> = IndexMap::new();

    for labware in labware_list {
        groups
            .entry(labware.identity())
            .and_modify(|(_first, quantity)| *quantity += 1)
            .or_insert((labware, 1));
    }

    groups
        .into_values()
        .map(|(labware, quantity)| LabwareSummary {
            display_name: labware.display_name().to_string(),
            parent_display_name: labware
                .parent
                .map(|model| model.display_name().to_string()),
            quantity,
            calibration: labware.calibration_data,
            cal_data_available: labware.definition_hash.is_some(),
        })
        .collect()
}

pub fn labware_summaries(
    labware: &[ProtocolLabware],
    calibrations: &[LabwareCalibration],
    modules_by_slot: &ModulesBySlot,
) -> Vec<LabwareSummary> {
    let labware_list = protocol_labware_list(labware, calibrations, modules_by_slot);

    unique_protocol_labware_summaries(&labware_list)
}
