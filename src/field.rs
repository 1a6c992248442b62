//! The simulation context shared by every particle: physical constants, the
//! oversized coordinate space and the pending-burst slot.

use crate::error::{Error, Result};
use crate::fixed::{Accum88, Fract8, SAccum78};
use log::debug;

/// Margin added on every side of the visible matrix.
pub const DEFAULT_BORDER: u16 = 3;

/// Largest model dimension: screen steps must fit in a byte.
const MAX_MODEL_SIZE: u16 = 256;

/// Smallest model dimension: the rasterizer needs at least one step per axis.
const MIN_MODEL_SIZE: u16 = 2;

/// Constants applied to every particle each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Physics {
    /// Added to vertical velocity every frame
    pub gravity: SAccum78,
    /// Fraction of vertical speed kept after hitting the ground
    pub bounce: Fract8,
    /// Fraction of velocity sparks keep each frame
    pub drag: Fract8,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: SAccum78::from_bits(-15),
            bounce: Fract8::from_bits(200),
            drag: Fract8::from_bits(250),
        }
    }
}

/// Visible matrix size plus the off-screen border around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: u16,
    height: u16,
    border: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_border(width, height, DEFAULT_BORDER)
    }

    pub fn with_border(width: u16, height: u16, border: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyMatrix { width, height });
        }
        for (axis, size) in [("width", width), ("height", height)] {
            let model = u32::from(size) + 2 * u32::from(border);
            if model > u32::from(MAX_MODEL_SIZE) {
                return Err(Error::FieldTooLarge { axis, size, border });
            }
            if model < u32::from(MIN_MODEL_SIZE) {
                return Err(Error::FieldTooSmall { axis, size, border });
            }
        }
        Ok(Self {
            width,
            height,
            border,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn border(&self) -> u16 {
        self.border
    }

    pub fn model_width(&self) -> u16 {
        self.width + 2 * self.border
    }

    pub fn model_height(&self) -> u16 {
        self.height + 2 * self.border
    }

    /// Model column of the first visible pixel.
    pub fn x_offset(&self) -> u16 {
        (self.model_width() - self.width) / 2
    }

    /// Model row of the first visible pixel.
    pub fn y_offset(&self) -> u16 {
        (self.model_height() - self.height) / 2
    }

    /// Screen steps across the model, as fed to `screenscale`.
    pub(crate) fn x_steps(&self) -> u8 {
        // bounded by MAX_MODEL_SIZE - 1 at construction
        (self.model_width() - 1) as u8
    }

    pub(crate) fn y_steps(&self) -> u8 {
        (self.model_height() - 1) as u8
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            border: DEFAULT_BORDER,
        }
    }
}

/// A shell's pinnacle, waiting to be turned into sparks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst {
    pub x: Accum88,
    pub y: Accum88,
    /// Horizontal bias inherited by every spark
    pub xv: SAccum78,
    pub color: u8,
}

/// Everything a particle can see besides itself.
#[derive(Debug, Clone)]
pub struct Field {
    pub physics: Physics,
    pub geometry: Geometry,
    burst: Option<Burst>,
}

impl Field {
    pub fn new(physics: Physics, geometry: Geometry) -> Self {
        Self {
            physics,
            geometry,
            burst: None,
        }
    }

    /// Records a burst. A second burst before the slot is drained replaces the first.
    pub fn publish_burst(&mut self, burst: Burst) {
        if let Some(previous) = self.burst.replace(burst) {
            debug!(
                "burst at ({:#06x}, {:#06x}) overwritten before dispatch",
                previous.x.to_bits(),
                previous.y.to_bits()
            );
        } else {
            debug!(
                "burst published at ({:#06x}, {:#06x}) color {}",
                burst.x.to_bits(),
                burst.y.to_bits(),
                burst.color
            );
        }
    }

    pub fn take_burst(&mut self) -> Option<Burst> {
        self.burst.take()
    }

    pub fn pending_burst(&self) -> Option<&Burst> {
        self.burst.as_ref()
    }

    pub fn burst_pending(&self) -> bool {
        self.pending_burst().is_some()
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(Physics::default(), Geometry::default())
    }
}
