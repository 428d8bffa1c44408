use shared_data::labware::WellName;
use tracing::debug;

use crate::field::StepFieldName;
use crate::form::{ChangeTipPolicy, FieldAccess, FormData, FormPatch, TransferPath};

/// Classification of an aspirate:dispense well count pairing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(strum_macros::Display)]
pub enum WellRatio {
    #[strum(serialize = "n:n")]
    NToN,
    #[strum(serialize = "1:many")]
    OneToMany,
    #[strum(serialize = "many:1")]
    ManyToOne,
}

/// `None` if either side is empty, or if the pairing is not one of the supported ratios, e.g. `2:3`.
pub fn get_well_ratio(source_wells: &[WellName], dest_wells: &[WellName]) -> Option<WellRatio> {
    match (source_wells.len(), dest_wells.len()) {
        (0, _) | (_, 0) => None,
        (source, dest) if source == dest => Some(WellRatio::NToN),
        (1, _) => Some(WellRatio::OneToMany),
        (_, 1) => Some(WellRatio::ManyToOne),
        _ => None,
    }
}

/// A directive that replaces a field value, applied only when the form currently holds `from`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldOverride {
    ChangeTip { from: ChangeTipPolicy, to: ChangeTipPolicy },
    Path { from: TransferPath, to: TransferPath },
}

impl FieldOverride {
    pub fn apply(&self, form: &FormData, patch: &mut FormPatch) {
        match *self {
            FieldOverride::ChangeTip {
                from,
                to,
            } => {
                if form.change_tip() == Some(from) {
                    patch.set(StepFieldName::ChangeTip, to);
                }
            }
            FieldOverride::Path {
                from,
                to,
            } => {
                if form.path() == Some(from) {
                    patch.set(StepFieldName::Path, to);
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct WellRatioTransition {
    pub prev: WellRatio,
    pub next: WellRatio,
    pub overrides: &'static [FieldOverride],
}

const PER_SOURCE_TO_ALWAYS: FieldOverride = FieldOverride::ChangeTip {
    from: ChangeTipPolicy::PerSource,
    to: ChangeTipPolicy::Always,
};
const PER_DEST_TO_ALWAYS: FieldOverride = FieldOverride::ChangeTip {
    from: ChangeTipPolicy::PerDest,
    to: ChangeTipPolicy::Always,
};
const MULTI_DISPENSE_TO_SINGLE: FieldOverride = FieldOverride::Path {
    from: TransferPath::MultiDispense,
    to: TransferPath::Single,
};
const MULTI_ASPIRATE_TO_SINGLE: FieldOverride = FieldOverride::Path {
    from: TransferPath::MultiAspirate,
    to: TransferPath::Single,
};

/// Fields that become invalid when the well ratio changes.
pub const WELL_RATIO_TRANSITIONS: [WellRatioTransition; 6] = [
    WellRatioTransition {
        prev: WellRatio::NToN,
        next: WellRatio::OneToMany,
        overrides: &[PER_SOURCE_TO_ALWAYS, PER_DEST_TO_ALWAYS],
    },
    WellRatioTransition {
        prev: WellRatio::NToN,
        next: WellRatio::ManyToOne,
        overrides: &[],
    },
    WellRatioTransition {
        prev: WellRatio::OneToMany,
        next: WellRatio::NToN,
        overrides: &[PER_SOURCE_TO_ALWAYS, PER_DEST_TO_ALWAYS, MULTI_DISPENSE_TO_SINGLE],
    },
    WellRatioTransition {
        prev: WellRatio::OneToMany,
        next: WellRatio::ManyToOne,
        overrides: &[PER_SOURCE_TO_ALWAYS, PER_DEST_TO_ALWAYS, MULTI_DISPENSE_TO_SINGLE],
    },
    WellRatioTransition {
        prev: WellRatio::ManyToOne,
        next: WellRatio::NToN,
        overrides: &[MULTI_ASPIRATE_TO_SINGLE],
    },
    WellRatioTransition {
        prev: WellRatio::ManyToOne,
        next: WellRatio::OneToMany,
        overrides: &[PER_SOURCE_TO_ALWAYS, MULTI_ASPIRATE_TO_SINGLE],
    },
];

/// The overrides required by a change of well ratio, evaluated against the form with the patch applied.
pub fn well_ratio_overrides(prev: WellRatio, next: WellRatio, applied_form: &FormData) -> FormPatch {
    let mut overrides = FormPatch::new();

    if let Some(transition) = WELL_RATIO_TRANSITIONS
        .iter()
        .find(|transition| transition.prev == prev && transition.next == next)
    {
        for directive in transition.overrides {
            directive.apply(applied_form, &mut overrides);
        }
        debug!(
            "Well ratio changed. prev: {}, next: {}, overrides: {:?}",
            prev, next, overrides
        );
    }

    overrides
}
