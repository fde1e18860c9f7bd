//! Number text shared by both encoders.

use alloc::string::String;
use core::fmt::Write;

/// Formats a number the way both codecs print it.
///
/// Integral values print without a fractional part. Anything else prints with
/// six decimals and then drops trailing zeros; the first character is never
/// dropped, so a value that rounds to zero keeps its dot (`1e-7` prints `0.`).
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn format(value: f64, out: &mut String) {
    if is_integral(value) {
        if value > i64::MIN as f64 && value < i64::MAX as f64 {
            let _ = write!(out, "{}", value as i64);
        } else {
            let _ = write!(out, "{value:.0}");
        }
        return;
    }

    let start = out.len();
    let _ = write!(out, "{value:.6}");
    while out.len() > start + 1 && out.ends_with('0') {
        out.pop();
    }
}

/// Every finite float at or beyond 2^52 is a whole number.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn is_integral(value: f64) -> bool {
    const EXACT: f64 = 4_503_599_627_370_496.0;
    if !value.is_finite() {
        return false;
    }
    if value >= EXACT || value <= -EXACT {
        return true;
    }
    (value as i64) as f64 == value
}
