/// Clamp `value` into `lower..=upper`.
///
/// The upper bound is applied first, then the lower bound, so when the bounds are inverted
/// (`upper < lower`) the result is `lower`.  Unlike [`Ord::clamp`] this never panics, volume limits
/// derived from user input are frequently inverted, e.g. when a transfer volume exceeds the pipette
/// capacity.
pub fn clamp_to_bounds<T>(value: T, lower: T, upper: T) -> T
where
    T: PartialOrd,
{
    let value = if value <= upper { value } else { upper };
    if value >= lower {
        value
    } else {
        lower
    }
}
