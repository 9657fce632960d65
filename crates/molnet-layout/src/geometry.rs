//! Points, polar offsets and layout bounds

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult};

/// A vertex position in layout space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Offset from an origin in polar form; `theta` in `[0, 2π)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub r: f64,
    pub theta: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &LayoutPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// This point's offset from `origin` in polar form
    pub fn polar_from(&self, origin: LayoutPoint) -> Polar {
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Polar {
            r: dx.hypot(dy),
            theta: dy.atan2(dx).rem_euclid(TAU),
        }
    }

    /// The point at `polar` from `origin`
    pub fn from_polar(origin: LayoutPoint, polar: Polar) -> Self {
        Self {
            x: origin.x + polar.r * polar.theta.cos(),
            y: origin.y + polar.r * polar.theta.sin(),
        }
    }
}

/// The layout area, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Validated bounds; both sides must be positive and finite
    pub fn new(width: f64, height: f64) -> LayoutResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(LayoutError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> LayoutPoint {
        LayoutPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: LayoutPoint) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp a point into the area
    pub fn clamp(&self, p: LayoutPoint) -> LayoutPoint {
        LayoutPoint::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Characteristic radius: half the shorter side
    pub fn multiplier(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }
}
