use itertools::Itertools;
use nalgebra::{Point2, Vector2};
use tracing::warn;

use crate::labware::{LabwareDefinition, WellName};

/// mm, distance between adjacent tips of a multi-channel pipette.
pub const MULTI_CHANNEL_TIP_PITCH: f64 = 9.0;
pub const MULTI_CHANNEL_TIP_COUNT: usize = 8;
/// mm, distance between the first and the last tip.
pub const MULTI_CHANNEL_TIP_SPAN: f64 = MULTI_CHANNEL_TIP_PITCH * (MULTI_CHANNEL_TIP_COUNT - 1) as f64;

/// The wells reached by each tip of a multi-channel pipette when its first tip is addressed to `primary_well`.
///
/// Tips extend towards the front of the labware (decreasing y).  For wells taller than the tip span, e.g. a
/// trough, all tips are centered in the well instead.
///
/// Returns `None` if the primary well is unknown or if any tip would not be inside a well.
pub fn well_names_per_multi_tip(definition: &LabwareDefinition, primary_well: &str) -> Option<Vec<WellName>> {
    let well = definition.well(primary_well)?;

    let first_tip = if well.y_extent() > MULTI_CHANNEL_TIP_SPAN {
        well.center() + Vector2::new(0.0, MULTI_CHANNEL_TIP_SPAN / 2.0)
    } else {
        well.center()
    };

    (0..MULTI_CHANNEL_TIP_COUNT)
        .map(|tip_index| tip_position(&first_tip, tip_index))
        .map(|tip| definition.find_well_at(&tip).cloned())
        .collect::<Option<Vec<_>>>()
}

fn tip_position(first_tip: &Point2<f64>, tip_index: usize) -> Point2<f64> {
    *first_tip - Vector2::new(0.0, MULTI_CHANNEL_TIP_PITCH * tip_index as f64)
}

/// Expand the primary wells of a multi-channel selection into every well the tips touch, preserving order.
///
/// Primary wells that cannot be reached by all tips are skipped.
pub fn all_wells_from_primary_wells(primary_wells: &[WellName], definition: &LabwareDefinition) -> Vec<WellName> {
    primary_wells
        .iter()
        .filter_map(|primary_well| {
            let well_set = well_names_per_multi_tip(definition, primary_well);
            if well_set.is_none() {
                warn!(
                    "Primary well not reachable by all tips. labware: '{}', well: '{}'",
                    definition.load_name(),
                    primary_well
                );
            }
            well_set
        })
        .flatten()
        .unique()
        .collect()
}
