/// Smallest thumb the overlay ever draws for a scrollable target.
pub const THUMB_FLOOR_PX: f64 = 10.0;

/// Share of the stage a minimum-size thumb may occupy at most.
pub const THUMB_MIN_STAGE_RATIO: f64 = 0.8;

/// Progress above this value snaps to the end of the range.
pub const PROGRESS_END_SNAP: f64 = 0.999;

#[must_use]
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Rounds to two decimals, the precision the surface styles are written with.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replaces a zero (or non-finite) divisor with 1.
#[must_use]
pub fn nonzero_divisor(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        1.0
    } else {
        value
    }
}
