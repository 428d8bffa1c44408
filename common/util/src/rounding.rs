use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `decimal_places`, midpoints away from zero (`1.25` -> `1.3`, `-1.25` -> `-1.3`).
///
/// [`Decimal::round_dp`] uses banker's rounding which is not what users expect for displayed volumes and offsets.
pub fn round_half_away(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an `f64` via [`Decimal`], `None` for NaN/infinite values.
///
/// Uses [`FromPrimitive::from_f64`] which drops the excess binary digits `from_f64_retain` would keep.
pub fn round_f64_half_away(value: f64, decimal_places: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|value| round_half_away(value, decimal_places))
}
