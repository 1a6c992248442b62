use thiserror::Error;

/// Errors raised while setting up a simulation.
///
/// Frame-by-frame work never fails: degenerate states deactivate the
/// particle involved and the frame carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// One of the matrix dimensions is zero
    #[error("matrix dimensions must be non-zero, got {width}x{height}")]
    EmptyMatrix {
        /// Requested visible width
        width: u16,
        /// Requested visible height
        height: u16,
    },
    /// Matrix plus border does not fit the 8-bit integer part of a position
    #[error("matrix {axis} of {size} with a {border}-pixel border exceeds the 256-unit field")]
    FieldTooLarge {
        /// "width" or "height"
        axis: &'static str,
        /// Requested visible size along that axis
        size: u16,
        /// Border added on each side
        border: u16,
    },
    /// Matrix plus border leaves the rasterizer no step to quantise onto
    #[error("matrix {axis} of {size} with a {border}-pixel border is narrower than 2 field units")]
    FieldTooSmall {
        /// "width" or "height"
        axis: &'static str,
        /// Requested visible size along that axis
        size: u16,
        /// Border added on each side
        border: u16,
    },
    /// A pool needs somewhere to put particles
    #[error("particle pool needs at least one slot")]
    EmptyPool,
}

/// Result type for simulation setup
pub type Result<T> = std::result::Result<T, Error>;
