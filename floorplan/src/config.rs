//! Editor settings: the two corner radii.
//!
//! `translate_radius` is the inner handle used to grab a corner for moving it;
//! `extend_radius` is the outer ring used to drag a new wall out of a corner
//! and is also the threshold for every snap. The setters keep
//! `extend_radius >= translate_radius`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSLATE_RADIUS: f64 = 10.0;
pub const DEFAULT_EXTEND_RADIUS: f64 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub translate_radius: f64,
    pub extend_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            translate_radius: DEFAULT_TRANSLATE_RADIUS,
            extend_radius: DEFAULT_EXTEND_RADIUS,
        }
    }
}

#[inline]
fn valid_radius(r: f64) -> bool {
    r.is_finite() && r > 0.0
}

impl Settings {
    pub fn new(translate_radius: f64, extend_radius: f64) -> Self {
        let mut s = Settings::default();
        s.set_translate_radius(translate_radius);
        s.set_extend_radius(extend_radius);
        s
    }

    /// Growing the inner handle drags the outer ring along.
    pub fn set_translate_radius(&mut self, r: f64) -> bool {
        if !valid_radius(r) {
            return false;
        }
        self.translate_radius = r;
        self.extend_radius = self.extend_radius.max(r);
        true
    }

    /// Shrinking the outer ring drags the inner handle along.
    pub fn set_extend_radius(&mut self, r: f64) -> bool {
        if !valid_radius(r) {
            return false;
        }
        self.extend_radius = r;
        self.translate_radius = self.translate_radius.min(r);
        true
    }

    /// Parses settings, falling back to defaults for missing fields and
    /// re-applying the radius ordering.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let raw: Settings = serde_json::from_str(s)?;
        let mut out = Settings::default();
        out.set_extend_radius(raw.extend_radius);
        out.set_translate_radius(raw.translate_radius);
        Ok(out)
    }
}
