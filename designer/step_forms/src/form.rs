use std::str::FromStr;

use indexmap::IndexMap;
use shared_data::labware::WellName;

use crate::field::StepFieldName;
use crate::value::FormValue;

static NULL: FormValue = FormValue::Null;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter)]
#[derive(serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum StepType {
    MoveLiquid,
    Mix,
    Pause,
    Magnet,
    Temperature,
    Thermocycler,
    ManualIntervention,
}

/// How many wells are visited per aspirate/dispense cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum TransferPath {
    Single,
    /// aspirate from several wells before dispensing once
    MultiAspirate,
    /// aspirate once and dispense into several wells
    MultiDispense,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ChangeTipPolicy {
    Always,
    Once,
    Never,
    PerSource,
    PerDest,
}

impl From<TransferPath> for FormValue {
    fn from(value: TransferPath) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<ChangeTipPolicy> for FormValue {
    fn from(value: ChangeTipPolicy) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// Typed read access to the fields of forms and patches.
pub trait FieldAccess {
    fn get(&self, field: StepFieldName) -> Option<&FormValue>;

    /// Absent fields read as `null`.
    fn value(&self, field: StepFieldName) -> &FormValue {
        self.get(field).unwrap_or(&NULL)
    }

    fn contains(&self, field: StepFieldName) -> bool {
        self.get(field).is_some()
    }

    fn text(&self, field: StepFieldName) -> Option<&str> {
        self.value(field).as_text()
    }

    fn wells(&self, field: StepFieldName) -> &[WellName] {
        self.value(field)
            .as_wells()
            .unwrap_or_default()
    }

    fn path(&self) -> Option<TransferPath> {
        self.text(StepFieldName::Path)
            .and_then(|value| TransferPath::from_str(value).ok())
    }

    fn change_tip(&self) -> Option<ChangeTipPolicy> {
        self.text(StepFieldName::ChangeTip)
            .and_then(|value| ChangeTipPolicy::from_str(value).ok())
    }

    /// The selected pipette id, if any.
    fn pipette_id(&self) -> Option<&str> {
        self.text(StepFieldName::Pipette)
    }
}

/// A complete step form.
#[derive(Debug, Clone, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FormData(IndexMap<StepFieldName, FormValue>);

impl FormData {
    pub fn step_type(&self) -> Option<StepType> {
        self.text(StepFieldName::StepType)
            .and_then(|value| StepType::from_str(value).ok())
    }

    /// Merge a patch into the form; fields in the patch replace fields in the form.
    pub fn apply_patch(&mut self, patch: &FormPatch) {
        for (field, value) in patch.iter() {
            self.0.insert(*field, value.clone());
        }
    }

    /// A copy of the form with the patch applied.
    pub fn applied(&self, patch: &FormPatch) -> FormData {
        let mut form = self.clone();
        form.apply_patch(patch);
        form
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepFieldName, &FormValue)> {
        self.0.iter()
    }
}

impl FieldAccess for FormData {
    fn get(&self, field: StepFieldName) -> Option<&FormValue> {
        self.0.get(&field)
    }
}

impl FromIterator<(StepFieldName, FormValue)> for FormData {
    fn from_iter<T: IntoIterator<Item = (StepFieldName, FormValue)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

/// A partial edit of a form, a field that is absent means 'not edited', a field that is `null` means 'set to null'.
#[derive(Debug, Clone, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FormPatch(IndexMap<StepFieldName, FormValue>);

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: StepFieldName, value: impl Into<FormValue>) {
        self.0.insert(field, value.into());
    }

    /// Builder-style [`FormPatch::set`].
    pub fn with(mut self, field: StepFieldName, value: impl Into<FormValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Fields in `other` replace fields in this patch.
    pub fn extend(&mut self, other: FormPatch) {
        self.0.extend(other.0);
    }

    pub fn merged(mut self, other: FormPatch) -> Self {
        self.extend(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepFieldName, &FormValue)> {
        self.0.iter()
    }
}

impl FieldAccess for FormPatch {
    fn get(&self, field: StepFieldName) -> Option<&FormValue> {
        self.0.get(&field)
    }
}

impl FromIterator<(StepFieldName, FormValue)> for FormPatch {
    fn from_iter<T: IntoIterator<Item = (StepFieldName, FormValue)>>(iter: T) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}
