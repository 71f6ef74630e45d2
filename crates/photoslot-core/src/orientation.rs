//! Orientation classification and per-orientation counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Landscape (wider than tall) or portrait (everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a width/height pair. Landscape iff `width > height`; squares are portrait.
pub fn classify_orientation<T: PartialOrd>(width: T, height: T) -> Orientation {
    if width > height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    }
}

/// Anything with a width and height that can be classified.
pub trait Oriented {
    fn orientation(&self) -> Orientation;
}

impl<T: Oriented + ?Sized> Oriented for &T {
    fn orientation(&self) -> Orientation {
        (**self).orientation()
    }
}

impl Oriented for (u32, u32) {
    fn orientation(&self) -> Orientation {
        classify_orientation(self.0, self.1)
    }
}

/// A 1-based running counter per orientation.
///
/// Landscape and portrait advance independently. Owned by whoever walks the
/// tree or the image list; never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationCounter {
    landscape: u32,
    portrait: u32,
}

impl Default for OrientationCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationCounter {
    pub fn new() -> Self {
        Self {
            landscape: 1,
            portrait: 1,
        }
    }

    /// The ordinal the next item of `orientation` would receive.
    pub fn peek(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Landscape => self.landscape,
            Orientation::Portrait => self.portrait,
        }
    }

    /// Take the next ordinal for `orientation` and advance.
    pub fn take(&mut self, orientation: Orientation) -> u32 {
        let slot = self.slot_mut(orientation);
        let current = *slot;
        *slot += 1;
        current
    }

    /// Give back `ordinal` if it was the last one handed out for `orientation`.
    ///
    /// Returns `false` (and changes nothing) when a later ordinal has
    /// already been taken.
    pub fn release(&mut self, orientation: Orientation, ordinal: u32) -> bool {
        let slot = self.slot_mut(orientation);
        if *slot > 1 && *slot - 1 == ordinal {
            *slot -= 1;
            true
        } else {
            false
        }
    }

    /// Number of ordinals handed out so far for `orientation`.
    pub fn taken(&self, orientation: Orientation) -> u32 {
        self.peek(orientation) - 1
    }

    fn slot_mut(&mut self, orientation: Orientation) -> &mut u32 {
        match orientation {
            Orientation::Landscape => &mut self.landscape,
            Orientation::Portrait => &mut self.portrait,
        }
    }
}
