use rust_decimal::Decimal;
use shared_data::labware::LabwareDefinition;
use shared_data::module::{ModuleModel, Slot};

/// A physical labware instance, as reported by the robot for the loaded protocol.
///
/// Legacy (v1) labware has no definition and no definition hash, only the raw type string.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolLabware {
    pub slot: Slot,
    #[serde(rename = "type")]
    pub labware_type: String,
    #[serde(default)]
    pub definition: Option<LabwareDefinition>,
    #[serde(default)]
    pub definition_hash: Option<String>,
}

/// Calibrated offset of a labware instance, in mm, rounded to one decimal place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CalibrationOffset {
    #[serde(with = "rust_decimal::serde::float")]
    pub x: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub y: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub z: Decimal,
}

/// A protocol labware instance with its resolved identity and calibration.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProtocolLabware {
    pub slot: Slot,
    #[serde(rename = "type")]
    pub labware_type: String,
    pub definition: Option<LabwareDefinition>,
    pub definition_hash: Option<String>,

    /// From the definition, else the raw type string.
    pub load_name: String,
    pub namespace: Option<String>,
    pub version: Option<u32>,
    /// Model of the module the labware sits on.
    pub parent: Option<ModuleModel>,
    pub calibration_data: Option<CalibrationOffset>,
}

impl BaseProtocolLabware {
    pub fn display_name(&self) -> &str {
        self.definition
            .as_ref()
            .map(|definition| definition.display_name())
            .unwrap_or(&self.load_name)
    }
}

/// One line of the labware list shown for a protocol, identical labware is listed once.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareSummary {
    pub display_name: String,
    pub parent_display_name: Option<String>,
    pub quantity: usize,
    pub calibration: Option<CalibrationOffset>,
    /// `false` for legacy labware, the robot never has calibration data for it.
    pub cal_data_available: bool,
}
