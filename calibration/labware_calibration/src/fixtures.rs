//! Calibration records and robot labware for tests.

use shared_data::labware::LabwareDefinition;
use shared_data::module::{ModuleModel, ModulesBySlot, RobotModule};
use time::macros::datetime;

use crate::protocol_labware::{BaseProtocolLabware, ProtocolLabware};
use crate::record::{
    AllLabwareCalibrations, CalibrationData, CalibrationStore, LabwareCalibration, OffsetCalibration,
    RobotCalibrationState,
};

/// A record for version 1 of an `opentrons` labware.
pub fn calibration_record(
    load_name: &str,
    parent: &str,
    definition_hash: Option<&str>,
    offset: [f64; 3],
) -> LabwareCalibration {
    LabwareCalibration {
        id: format!("calibration_{}_{}", load_name, parent),
        load_name: load_name.to_string(),
        namespace: "opentrons".to_string(),
        version: 1,
        parent: parent.to_string(),
        definition_hash: definition_hash.map(str::to_string),
        calibration_data: CalibrationData {
            offset: OffsetCalibration {
                value: offset,
                last_modified: datetime!(2020-04-05 14:30:00 UTC),
            },
            tip_length: None,
        },
    }
}

pub fn calibration_store(robot_name: &str, records: Option<Vec<LabwareCalibration>>) -> CalibrationStore {
    CalibrationStore::from([(robot_name.to_string(), RobotCalibrationState {
        labware_calibrations: records.map(|data| AllLabwareCalibrations {
            data,
        }),
    })])
}

pub fn protocol_labware(slot: &str, definition: LabwareDefinition, definition_hash: &str) -> ProtocolLabware {
    ProtocolLabware {
        slot: slot.to_string(),
        labware_type: definition.load_name().to_string(),
        definition: Some(definition),
        definition_hash: Some(definition_hash.to_string()),
    }
}

/// Labware loaded by a v1 protocol, the robot only knows its type.
pub fn legacy_protocol_labware(slot: &str, labware_type: &str) -> ProtocolLabware {
    ProtocolLabware {
        slot: slot.to_string(),
        labware_type: labware_type.to_string(),
        definition: None,
        definition_hash: None,
    }
}

/// Projected labware without a definition, for testing identity rules.
pub fn base_labware(slot: &str, load_name: &str, parent: Option<ModuleModel>) -> BaseProtocolLabware {
    BaseProtocolLabware {
        slot: slot.to_string(),
        labware_type: load_name.to_string(),
        definition: None,
        definition_hash: None,
        load_name: load_name.to_string(),
        namespace: Some("opentrons".to_string()),
        version: Some(1),
        parent,
        calibration_data: None,
    }
}

pub fn modules_by_slot(modules: Vec<(&str, ModuleModel)>) -> ModulesBySlot {
    modules
        .into_iter()
        .map(|(slot, model)| {
            (slot.to_string(), RobotModule {
                model,
                slot: slot.to_string(),
            })
        })
        .collect()
}
