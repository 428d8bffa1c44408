//! Labware and pipette definitions for tests, modelled on commonly used library definitions.

use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entity_id::EntityId;
use crate::labware::{
    LabwareDefinition, LabwareEntities, LabwareEntity, LabwareMetadata, LabwareParameters, WellDefinition, WellName,
    WellShape,
};
use crate::pipette::{FlowRateSpec, PipetteChannels, PipetteEntities, PipetteEntity, PipetteSpec};

const ROW_NAMES: &str = "ABCDEFGHIJKLMNOP";

struct GridLayout {
    rows: usize,
    columns: usize,
    /// center of `A1`
    origin_x: f64,
    origin_y: f64,
    pitch_x: f64,
    pitch_y: f64,
}

fn build_grid(layout: GridLayout, template: WellDefinition) -> (Vec<Vec<WellName>>, IndexMap<WellName, WellDefinition>) {
    let mut ordering = vec![];
    let mut wells = IndexMap::new();

    for column in 0..layout.columns {
        let mut column_names = vec![];
        for (row, row_name) in ROW_NAMES
            .chars()
            .take(layout.rows)
            .enumerate()
        {
            let name = format!("{}{}", row_name, column + 1);
            let well = WellDefinition {
                x: layout.origin_x + layout.pitch_x * column as f64,
                y: layout.origin_y - layout.pitch_y * row as f64,
                ..template.clone()
            };
            wells.insert(name.clone(), well);
            column_names.push(name);
        }
        ordering.push(column_names);
    }

    (ordering, wells)
}

fn definition(
    load_name: &str,
    display_name: &str,
    ordering: Vec<Vec<WellName>>,
    wells: IndexMap<WellName, WellDefinition>,
) -> LabwareDefinition {
    LabwareDefinition {
        namespace: "opentrons".to_string(),
        version: 1,
        parameters: LabwareParameters {
            load_name: load_name.to_string(),
            is_tiprack: false,
            tip_length: None,
        },
        metadata: LabwareMetadata {
            display_name: display_name.to_string(),
            display_category: None,
        },
        ordering,
        wells,
    }
}

pub fn fixture_96_plate() -> LabwareDefinition {
    let (ordering, wells) = build_grid(
        GridLayout {
            rows: 8,
            columns: 12,
            origin_x: 14.38,
            origin_y: 74.24,
            pitch_x: 9.0,
            pitch_y: 9.0,
        },
        WellDefinition {
            x: 0.0,
            y: 0.0,
            z: 3.69,
            depth: 10.54,
            total_liquid_volume: 200.0,
            shape: WellShape::Circular {
                diameter: 6.4,
            },
        },
    );

    definition("fixture_96_plate", "96 Well Plate 200 µL", ordering, wells)
}

pub fn fixture_384_plate() -> LabwareDefinition {
    let (ordering, wells) = build_grid(
        GridLayout {
            rows: 16,
            columns: 24,
            origin_x: 12.12,
            origin_y: 76.48,
            pitch_x: 4.5,
            pitch_y: 4.5,
        },
        WellDefinition {
            x: 0.0,
            y: 0.0,
            z: 2.29,
            depth: 12.2,
            total_liquid_volume: 50.0,
            shape: WellShape::Circular {
                diameter: 3.1,
            },
        },
    );

    definition("fixture_384_plate", "384 Well Plate 50 µL", ordering, wells)
}

pub fn fixture_12_trough() -> LabwareDefinition {
    let (ordering, wells) = build_grid(
        GridLayout {
            rows: 1,
            columns: 12,
            origin_x: 13.94,
            origin_y: 42.78,
            pitch_x: 9.0,
            pitch_y: 0.0,
        },
        WellDefinition {
            x: 0.0,
            y: 0.0,
            z: 2.29,
            depth: 39.22,
            total_liquid_volume: 22000.0,
            shape: WellShape::Rectangular {
                x_dimension: 8.33,
                y_dimension: 71.88,
            },
        },
    );

    definition("fixture_12_trough", "12 Channel Trough", ordering, wells)
}

pub fn fixture_trash() -> LabwareDefinition {
    let (ordering, wells) = build_grid(
        GridLayout {
            rows: 1,
            columns: 1,
            origin_x: 82.84,
            origin_y: 80.0,
            pitch_x: 0.0,
            pitch_y: 0.0,
        },
        WellDefinition {
            x: 0.0,
            y: 0.0,
            z: 5.0,
            depth: 40.0,
            total_liquid_volume: 1_100_000.0,
            shape: WellShape::Rectangular {
                x_dimension: 172.86,
                y_dimension: 165.86,
            },
        },
    );

    definition("fixture_trash", "Trash", ordering, wells)
}

pub fn labware_entity(id: &str, def: LabwareDefinition) -> LabwareEntity {
    LabwareEntity {
        id: entity_id(id),
        def,
    }
}

pub fn labware_entities(entities: Vec<LabwareEntity>) -> LabwareEntities {
    entities
        .into_iter()
        .map(|entity| (entity.id.clone(), entity))
        .collect()
}

fn flow_rate(value: Decimal) -> FlowRateSpec {
    FlowRateSpec {
        value,
        min: dec!(0.001),
        max: value * dec!(2),
    }
}

pub fn p300_single(id: &str) -> PipetteEntity {
    PipetteEntity {
        id: entity_id(id),
        name: "p300_single".to_string(),
        spec: PipetteSpec {
            display_name: "P300 Single-Channel".to_string(),
            channels: PipetteChannels::Single,
            min_volume: dec!(30),
            max_volume: dec!(300),
            default_aspirate_flow_rate: Some(flow_rate(dec!(150))),
            default_dispense_flow_rate: Some(flow_rate(dec!(300))),
        },
        tiprack_max_volume: Some(dec!(300)),
    }
}

pub fn p10_single(id: &str) -> PipetteEntity {
    PipetteEntity {
        id: entity_id(id),
        name: "p10_single".to_string(),
        spec: PipetteSpec {
            display_name: "P10 Single-Channel".to_string(),
            channels: PipetteChannels::Single,
            min_volume: dec!(1),
            max_volume: dec!(10),
            default_aspirate_flow_rate: Some(flow_rate(dec!(5))),
            default_dispense_flow_rate: Some(flow_rate(dec!(10))),
        },
        tiprack_max_volume: Some(dec!(10)),
    }
}

pub fn p10_multi(id: &str) -> PipetteEntity {
    PipetteEntity {
        id: entity_id(id),
        name: "p10_multi".to_string(),
        spec: PipetteSpec {
            display_name: "P10 8-Channel".to_string(),
            channels: PipetteChannels::Multi,
            min_volume: dec!(1),
            max_volume: dec!(10),
            default_aspirate_flow_rate: None,
            default_dispense_flow_rate: None,
        },
        tiprack_max_volume: Some(dec!(10)),
    }
}

pub fn pipette_entities(entities: Vec<PipetteEntity>) -> PipetteEntities {
    entities
        .into_iter()
        .map(|entity| (entity.id.clone(), entity))
        .collect()
}

fn entity_id(id: &str) -> EntityId {
    EntityId::from_str(id).unwrap()
}
