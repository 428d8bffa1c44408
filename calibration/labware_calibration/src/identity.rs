use shared_data::module::ModuleModel;

use crate::protocol_labware::BaseProtocolLabware;
use crate::record::LabwareCalibration;

/// The fields that make two labware instances interchangeable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LabwareIdentity<'a> {
    pub load_name: &'a str,
    pub namespace: Option<&'a str>,
    pub version: Option<u32>,
    pub parent: Option<ModuleModel>,
}

impl BaseProtocolLabware {
    pub fn identity(&self) -> LabwareIdentity<'_> {
        LabwareIdentity {
            load_name: &self.load_name,
            namespace: self.namespace.as_deref(),
            version: self.version,
            parent: self.parent,
        }
    }
}

/// `true` if the calibration record was made for this exact labware, on the same parent.
///
/// A record without a parent (`""`) matches labware placed directly on the deck.  Labware without a definition
/// hash never matches.
pub fn matches_labware_identity_for_calibration(record: &LabwareCalibration, labware: &BaseProtocolLabware) -> bool {
    let Some(definition_hash) = labware.definition_hash.as_deref() else {
        return false;
    };

    let parent_matches = match labware.parent {
        Some(model) => record.parent == model.to_string(),
        None => record.parent.is_empty(),
    };

    record.load_name == labware.load_name
        && labware.namespace.as_deref() == Some(record.namespace.as_str())
        && labware.version == Some(record.version)
        && parent_matches
        && record.definition_hash.as_deref() == Some(definition_hash)
}

/// `true` if both instances count towards the same summary.
pub fn matches_labware_identity_for_quantity(a: &BaseProtocolLabware, b: &BaseProtocolLabware) -> bool {
    a.identity() == b.identity()
}
