/// Scale used by `round13`: 13 digits after the decimal point.
const SCALE: f64 = 1e13;

/// Half-width of the band around a rounding midpoint where the fast path
/// cannot trust `x * SCALE` and the exact decimal expansion is consulted.
const MIDPOINT_BAND: f64 = 0.01;

/// Fractional part, `x - floor(x)`. Always in `[0, 1)` for finite `x`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Round to 13 digits after the decimal point, exactly as printing with
/// `%.13f` and parsing back would.
///
/// For `x` in `[0, 1)` the scaled product carries at most 2^-9 of error, so
/// the arithmetic result is only ambiguous when the scaled fractional part
/// sits next to one half. Those inputs (and anything outside `[0, 1)`) take
/// the exact decimal route.
#[inline]
pub fn round13(x: f64) -> f64 {
    if (0.0..1.0).contains(&x) {
        let scaled = x * SCALE;
        let frac = scaled - scaled.floor();
        if (frac - 0.5).abs() >= MIDPOINT_BAND {
            return scaled.round() / SCALE;
        }
    }
    round13_exact(x)
}

/// Exact reference rounding through the decimal expansion of `x`.
///
/// Rust float formatting is correctly rounded and locale-free, which makes
/// this platform independent.
#[cold]
pub fn round13_exact(x: f64) -> f64 {
    let text = format!("{x:.13}");
    text.parse::<f64>().unwrap_or(x)
}
