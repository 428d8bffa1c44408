use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Identifies an instantiated entity in a protocol, e.g. a pipette or a piece of labware.
///
/// Ids must be non-empty and contain no whitespace or control characters, e.g. `pipette-1`,
/// `3e4a1f9c:opentrons/opentrons_96_tiprack_300ul/1`.
#[derive(Debug, Clone, SerializeDisplay, DeserializeFromStr, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

pub type PipetteId = EntityId;
pub type LabwareId = EntityId;

impl EntityId {
    fn is_valid(value: &str) -> bool {
        !value.is_empty()
            && value
                .chars()
                .all(|c| !(c.is_whitespace() || c.is_control()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Self::is_valid(&value) {
            true => Ok(Self(value)),
            false => Err(EntityIdError::Invalid(value)),
        }
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allows catalogs keyed by [`EntityId`] to be queried with the raw id held in a form field.
impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EntityIdError {
    #[error("Invalid entity id. value: '{0:}'")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pipette-1", true)]
    #[case("abc:opentrons/opentrons_96_tiprack_300ul/1", true)]
    #[case("", false)]
    #[case("pipette 1", false)]
    #[case("pipette\t1", false)]
    fn test_parse(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(EntityId::from_str(value).is_ok(), valid);
    }

    #[test]
    fn lookup_by_str() {
        // given
        let mut catalog = IndexMap::new();
        catalog.insert(EntityId::from_str("labware-1").unwrap(), 1);

        // expect
        assert_eq!(catalog.get("labware-1"), Some(&1));
        assert_eq!(catalog.get("labware-2"), None);
    }
}
