use std::collections::BTreeMap;

use time::serde::rfc3339;
use time::OffsetDateTime;

/// A labware calibration record, as stored on the robot.
///
/// Older records lack a definition hash, they never apply to any labware.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareCalibration {
    pub id: String,
    pub load_name: String,
    pub namespace: String,
    pub version: u32,
    /// Module model the labware was calibrated on, empty when calibrated directly on the deck.
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub definition_hash: Option<String>,
    pub calibration_data: CalibrationData,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationData {
    pub offset: OffsetCalibration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_length: Option<TipLengthCalibration>,
}

/// `value` is the `[x, y, z]` offset in mm.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetCalibration {
    pub value: [f64; 3],
    #[serde(with = "rfc3339")]
    pub last_modified: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipLengthCalibration {
    pub value: f64,
    #[serde(with = "rfc3339")]
    pub last_modified: OffsetDateTime,
}

/// Response body of the labware calibration list.
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AllLabwareCalibrations {
    pub data: Vec<LabwareCalibration>,
}

/// Calibration state of a single robot, the records are absent until they have been fetched.
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotCalibrationState {
    #[serde(default)]
    pub labware_calibrations: Option<AllLabwareCalibrations>,
}

/// Calibration state, keyed by robot name.
pub type CalibrationStore = BTreeMap<String, RobotCalibrationState>;

/// The labware calibration records of a robot, empty when the robot or its records are unknown.
pub fn labware_calibrations_for_robot<'a>(store: &'a CalibrationStore, robot_name: &str) -> &'a [LabwareCalibration] {
    store
        .get(robot_name)
        .and_then(|state| state.labware_calibrations.as_ref())
        .map(|calibrations| calibrations.data.as_slice())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use time::macros::datetime;

    use super::*;
    use crate::fixtures::{calibration_record, calibration_store};

    #[test]
    fn deserialize_record() {
        // given
        let content = indoc! {r#"
            {
                "id": "some id",
                "loadName": "opentrons_96_tiprack_10ul",
                "namespace": "opentrons",
                "version": 1,
                "parent": "",
                "definitionHash": "some_hash",
                "calibrationData": {
                    "offset": {
                        "value": [1.23, 4.56, 7.89],
                        "lastModified": "2020-04-05T14:30:00Z"
                    },
                    "tipLength": {
                        "value": 30.5,
                        "lastModified": "2020-04-05T14:30:00Z"
                    }
                }
            }
        "#};

        // when
        let record: LabwareCalibration = serde_json::from_str(content).unwrap();

        // then
        assert_eq!(record.load_name, "opentrons_96_tiprack_10ul");
        assert_eq!(record.parent, "");
        assert_eq!(record.definition_hash.as_deref(), Some("some_hash"));
        assert_eq!(record.calibration_data.offset.value, [1.23, 4.56, 7.89]);
        assert_eq!(record.calibration_data.offset.last_modified, datetime!(2020-04-05 14:30:00 UTC));
        assert_eq!(
            record
                .calibration_data
                .tip_length
                .map(|tip_length| tip_length.value),
            Some(30.5)
        );
    }

    #[test]
    fn deserialize_record_without_definition_hash() {
        // given
        let content = indoc! {r#"
            {
                "id": "some id",
                "loadName": "some_labware",
                "namespace": "opentrons",
                "version": 1,
                "parent": "magneticModuleV1",
                "calibrationData": {
                    "offset": {
                        "value": [0.0, 0.0, 0.0],
                        "lastModified": "2020-04-05T14:30:00+01:00"
                    }
                }
            }
        "#};

        // when
        let record: LabwareCalibration = serde_json::from_str(content).unwrap();

        // then
        assert_eq!(record.definition_hash, None);
        assert_eq!(record.parent, "magneticModuleV1");
        assert_eq!(record.calibration_data.tip_length, None);
    }

    #[test]
    fn calibrations_for_known_robot() {
        // given
        let records = vec![calibration_record("a", "", Some("hash"), [1.0, 2.0, 3.0])];
        let store = calibration_store("robot-name", Some(records.clone()));

        // expect
        assert_eq!(labware_calibrations_for_robot(&store, "robot-name"), records.as_slice());
    }

    #[test]
    fn calibrations_for_unknown_robot() {
        // given
        let store = calibration_store("robot-name", Some(vec![calibration_record("a", "", Some("hash"), [0.0; 3])]));

        // expect
        assert!(labware_calibrations_for_robot(&store, "other-robot").is_empty());
    }

    #[test]
    fn calibrations_not_yet_fetched() {
        // given
        let store = calibration_store("robot-name", None);

        // expect
        assert!(labware_calibrations_for_robot(&store, "robot-name").is_empty());
    }
}
