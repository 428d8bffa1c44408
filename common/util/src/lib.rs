pub mod range_utils;
pub mod rounding;
pub mod source;
#[cfg(any(test, feature = "testing"))]
pub mod test;
