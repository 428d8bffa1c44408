pub mod entity_id;
pub mod labware;
pub mod module;
pub mod pipette;
pub mod well_sets;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;
