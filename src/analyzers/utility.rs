/// Arithmetic mean of a running total. Returns 0.0 when `count` is zero.
pub fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

/// Share of `part` in `total` on a 0–100 scale, unrounded. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// [`pct`] rounded to the nearest whole percent.
pub fn whole_pct(part: usize, total: usize) -> u32 {
    pct(part, total).round() as u32
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
