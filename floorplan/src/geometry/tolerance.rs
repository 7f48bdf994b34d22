// Centralized tolerances and rounding for model-space geometry (millimetres)

pub const EPS_LEN: f64 = 1e-9;           // zero-length vector threshold (mm)
pub const EPS_DENOM: f64 = 1e-12;        // denominator guard for intersections
pub const EPS_POS: f64 = 1e-6;           // point coincidence / endpoint touch

// Committed coordinates are rounded to whole millimetres
pub const ROUND_STEP: f64 = 1.0;

pub const MM2_PER_M2: f64 = 1_000_000.0;

#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }

#[inline]
pub fn round_to_step(x: f64) -> f64 {
    (x / ROUND_STEP).round() * ROUND_STEP
}
