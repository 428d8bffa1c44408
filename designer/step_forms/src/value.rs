use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use shared_data::labware::WellName;

/// The value of a single form field.
///
/// Forms are persisted, so values are restricted to JSON primitives and lists of well names.
#[derive(Debug, Clone, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    #[default]
    Null,
    Bool(bool),
    Number(
        #[serde(serialize_with = "rust_decimal::serde::float::serialize", deserialize_with = "deserialize_json_number")]
        Decimal,
    ),
    Text(String),
    List(Vec<WellName>),
}

impl FormValue {
    /// `null`, `false`, `""` and `0` are falsy, everything else, including an empty list, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FormValue::Null => false,
            FormValue::Bool(value) => *value,
            FormValue::Number(value) => !value.is_zero(),
            FormValue::Text(value) => !value.is_empty(),
            FormValue::List(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }

    /// Numeric interpretation of the value, `None` when the value is not a number.
    ///
    /// Blank text and `null` are zero, booleans are zero or one.
    pub fn to_number(&self) -> Option<Decimal> {
        match self {
            FormValue::Null => Some(Decimal::ZERO),
            FormValue::Bool(value) => Some(Decimal::from(u8::from(*value))),
            FormValue::Number(value) => Some(*value),
            FormValue::Text(value) => parse_number(value),
            FormValue::List(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_wells(&self) -> Option<&[WellName]> {
        match self {
            FormValue::List(wells) => Some(wells),
            _ => None,
        }
    }

    /// Numbers are written back into forms as text, e.g. `12.5`, `10`.
    pub fn from_number(value: Decimal) -> Self {
        FormValue::Text(value.normalize().to_string())
    }
}

/// Only JSON numbers, numeric text stays text.
fn deserialize_json_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = f64::deserialize(deserializer)?;

    Decimal::from_f64(value).ok_or_else(|| D::Error::custom(format!("Number out of range. value: '{}'", value)))
}

fn parse_number(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<Vec<WellName>> for FormValue {
    fn from(value: Vec<WellName>) -> Self {
        FormValue::List(value)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => FormValue::Null,
        }
    }
}

impl Display for FormValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormValue::Null => f.write_str("null"),
            FormValue::Bool(value) => write!(f, "{}", value),
            FormValue::Number(value) => write!(f, "{}", value),
            FormValue::Text(value) => write!(f, "'{}'", value),
            FormValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}
