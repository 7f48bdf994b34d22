// Centralized ingestion limits to harden against untrusted floor-plan documents

// Scene size caps
pub const MAX_NODES: usize = 200_000;
pub const MAX_EDGES: usize = 300_000;

// Numeric bounds (mm); a kilometre of floor plan in each direction
pub const COORD_MIN: f64 = -1_000_000.0;
pub const COORD_MAX: f64 = 1_000_000.0;
pub const STROKE_MAX_LEN: usize = 64;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
