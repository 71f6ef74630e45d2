use serde::{Deserialize, Serialize};

use crate::orientation::{classify_orientation, Orientation, Oriented};

/// Axis-aligned layer bounds in document units: `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds of a `width` x `height` rectangle centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Scale about the centre (the host's middle-centre anchor).
    pub fn scaled_about_center(&self, factor: f64) -> Self {
        let (cx, cy) = self.center();
        Self::centered(cx, cy, self.width() * factor, self.height() * factor)
    }

    /// Whether `self` fully covers `other`, allowing for float error.
    pub fn covers(&self, other: &Bounds) -> bool {
        const EPS: f64 = 1e-6;
        self.left <= other.left + EPS
            && self.top <= other.top + EPS
            && self.right + EPS >= other.right
            && self.bottom + EPS >= other.bottom
    }
}

impl Oriented for Bounds {
    fn orientation(&self) -> Orientation {
        classify_orientation(self.width(), self.height())
    }
}

impl From<[f64; 4]> for Bounds {
    fn from(b: [f64; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

impl From<Bounds> for [f64; 4] {
    fn from(b: Bounds) -> Self {
        [b.left, b.top, b.right, b.bottom]
    }
}
