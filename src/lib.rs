//! Fixed-point 2-D fireworks for small LED matrices.
//!
//! Shells launch from the bottom centre, rise under gravity and burst a little
//! past their apex. Each burst becomes a batch of sparks that slow down with
//! drag and fade out one brightness step per frame. Every particle is drawn
//! anti-aliased across the 2x2 block of pixels around its sub-pixel position.
//!
//! The display and the random number generator stay outside the crate, behind
//! [`PixelSink`] and [`RandomSource`]. A caller drives it frame by frame:
//!
//! ```
//! use fireworks_xy::{Config, Frame, Launcher, Simulation};
//!
//! let mut sim = Simulation::new(Config::default())?;
//! let mut launcher = Launcher::default();
//! let mut rng = fastrand::Rng::with_seed(1);
//! let mut frame = Frame::for_geometry(sim.geometry());
//!
//! for _ in 0..120 {
//!     frame.clear();
//!     launcher.tick(&mut sim, &mut rng);
//!     sim.frame(&mut rng, &mut frame);
//! }
//! # Ok::<(), fireworks_xy::Error>(())
//! ```

pub mod error;
pub mod field;
pub mod fixed;
pub mod launcher;
pub mod particle;
pub mod pool;
pub mod raster;
pub mod rng;
pub mod sim;

pub use error::{Error, Result};
pub use field::{Burst, Field, Geometry, Physics};
pub use fixed::{Accum88, Fract8, SAccum78};
pub use launcher::Launcher;
pub use particle::{Kind, Particle};
pub use pool::ParticlePool;
pub use raster::{Frame, PixelSink, PixelWrite};
pub use rng::RandomSource;
pub use sim::{Config, Simulation};
