use indexmap::IndexMap;
use nalgebra::Point2;

use crate::entity_id::LabwareId;

pub type LabwareEntities = IndexMap<LabwareId, LabwareEntity>;

/// e.g. `A1`, `H12`, `P24`
pub type WellName = String;

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareEntity {
    pub id: LabwareId,
    pub def: LabwareDefinition,
}

/// A labware definition, as published by the labware library.
///
/// Coordinates are in mm, relative to the front-left-bottom corner of the labware, y increases towards row `A`.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareDefinition {
    /// e.g. `opentrons`, `custom_beta`
    pub namespace: String,
    pub version: u32,
    pub parameters: LabwareParameters,
    pub metadata: LabwareMetadata,
    /// Columns of well names, e.g. `[["A1", "B1", ...], ["A2", "B2", ...], ...]`
    pub ordering: Vec<Vec<WellName>>,
    pub wells: IndexMap<WellName, WellDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareParameters {
    pub load_name: String,
    #[serde(default)]
    pub is_tiprack: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub tip_length: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareMetadata {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub display_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellDefinition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub depth: f64,
    pub total_liquid_volume: f64,
    #[serde(flatten)]
    pub shape: WellShape,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum WellShape {
    Circular {
        diameter: f64,
    },
    Rectangular {
        #[serde(rename = "xDimension")]
        x_dimension: f64,
        #[serde(rename = "yDimension")]
        y_dimension: f64,
    },
}

impl WellDefinition {
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// `true` if the point, projected onto the top of the well, is inside the well's outline.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let offset = *point - self.center();
        match self.shape {
            WellShape::Circular {
                diameter,
            } => offset.norm() <= diameter / 2.0,
            WellShape::Rectangular {
                x_dimension,
                y_dimension,
            } => offset.x.abs() <= x_dimension / 2.0 && offset.y.abs() <= y_dimension / 2.0,
        }
    }

    /// The extent of the well along the y axis.
    pub fn y_extent(&self) -> f64 {
        match self.shape {
            WellShape::Circular {
                diameter,
            } => diameter,
            WellShape::Rectangular {
                y_dimension, ..
            } => y_dimension,
        }
    }
}

impl LabwareDefinition {
    pub fn load_name(&self) -> &str {
        &self.parameters.load_name
    }

    pub fn display_name(&self) -> &str {
        &self.metadata.display_name
    }

    pub fn is_single_well(&self) -> bool {
        self.wells.len() == 1
    }

    /// The first well in the definition's ordering, usually `A1`.
    pub fn first_well(&self) -> Option<&WellName> {
        self.ordering
            .first()
            .and_then(|column| column.first())
    }

    pub fn well(&self, name: &str) -> Option<&WellDefinition> {
        self.wells.get(name)
    }

    /// The name of the first well, in definition order, whose outline contains the point.
    pub fn find_well_at(&self, point: &Point2<f64>) -> Option<&WellName> {
        self.wells
            .iter()
            .find(|(_name, well)| well.contains(point))
            .map(|(name, _well)| name)
    }
}
