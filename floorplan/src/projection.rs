//! Screen <-> model mapping used by snapping and the interaction controller.

use crate::model::Point;
use serde::{Deserialize, Serialize};

pub trait Projection {
    fn to_model(&self, screen: Point) -> Point;
    fn to_screen(&self, model: Point) -> Point;
    /// Screen units per model unit.
    fn scale(&self) -> f64;
}

/// Uniform scale followed by a screen-space offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewProjection {
    pub offset: Point,
    pub scale: f64,
}

impl Default for ViewProjection {
    fn default() -> Self {
        ViewProjection {
            offset: Point::default(),
            scale: 1.0,
        }
    }
}

impl ViewProjection {
    pub fn new(offset: Point, scale: f64) -> Self {
        ViewProjection { offset, scale }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Multiplies the scale by `factor`, keeping the model point under
    /// `screen` fixed. Non-positive or non-finite factors are ignored.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.to_model(screen);
        self.scale *= factor;
        self.offset = screen - anchor * self.scale;
    }
}

impl Projection for ViewProjection {
    #[inline]
    fn to_model(&self, screen: Point) -> Point {
        (screen - self.offset) * (1.0 / self.scale)
    }
    #[inline]
    fn to_screen(&self, model: Point) -> Point {
        model * self.scale + self.offset
    }
    #[inline]
    fn scale(&self) -> f64 {
        self.scale
    }
}
