use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::entity_id::PipetteId;

pub type PipetteEntities = IndexMap<PipetteId, PipetteEntity>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PipetteChannels {
    Single,
    /// 8 tips, 9mm apart, in a single column
    Multi,
}

impl PipetteChannels {
    pub fn count(&self) -> u8 {
        match self {
            PipetteChannels::Single => 1,
            PipetteChannels::Multi => 8,
        }
    }
}

impl TryFrom<u8> for PipetteChannels {
    type Error = PipetteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            8 => Ok(Self::Multi),
            _ => Err(PipetteError::UnsupportedChannelCount(value)),
        }
    }
}

impl From<PipetteChannels> for u8 {
    fn from(value: PipetteChannels) -> Self {
        value.count()
    }
}

impl Display for PipetteChannels {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRateSpec {
    pub value: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// Name-level specification, shared by all pipettes of the same model, e.g. `p300_single_gen2`
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipetteSpec {
    pub display_name: String,
    pub channels: PipetteChannels,
    /// uL, the smallest volume the pipette can accurately deliver, also the recommended disposal volume.
    pub min_volume: Decimal,
    /// uL
    pub max_volume: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub default_aspirate_flow_rate: Option<FlowRateSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub default_dispense_flow_rate: Option<FlowRateSpec>,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipetteEntity {
    pub id: PipetteId,
    /// e.g. `p300_single_gen2`
    pub name: String,
    pub spec: PipetteSpec,

    /// uL, the volume of the tips in the assigned tip rack
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub tiprack_max_volume: Option<Decimal>,
}

impl PipetteEntity {
    pub fn channels(&self) -> PipetteChannels {
        self.spec.channels
    }

    pub fn min_volume(&self) -> Decimal {
        self.spec.min_volume
    }

    /// The largest volume a single aspiration can hold, limited by both the pipette and its tips.
    pub fn capacity(&self) -> Decimal {
        match self.tiprack_max_volume {
            Some(tiprack_max_volume) => self
                .spec
                .max_volume
                .min(tiprack_max_volume),
            None => self.spec.max_volume,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PipetteError {
    #[error("Unsupported pipette channel count. channels: {0}")]
    UnsupportedChannelCount(u8),
}
