//! A single pool entity, acting as either a rising shell or a burst spark.

use crate::field::{Burst, Field, Geometry};
use crate::fixed::{Accum88, SAccum78};
use crate::rng::RandomSource;
use log::trace;

/// A shell falling faster than this has passed its apex and bursts.
pub const PINNACLE_VELOCITY: SAccum78 = SAccum78::from_bits(-300);

/// Rebounds slower than this end the bounce sequence.
pub const MIN_REBOUND: SAccum78 = SAccum78::from_bits(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    None,
    Shell,
    Spark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Particle {
    pub active: bool,
    pub kind: Kind,
    pub x: Accum88,
    pub y: Accum88,
    pub xv: SAccum78,
    pub yv: SAccum78,
    /// Carried along but never consulted.
    pub radius: Accum88,
    /// Brightness, and for sparks the frames left to live.
    pub color: u8,
}

impl Particle {
    /// Runs one frame of physics. Particles only interact through `field`.
    pub fn advance(&mut self, field: &mut Field) {
        if !self.active {
            return;
        }
        let physics = field.physics;

        self.yv = self.yv + physics.gravity;

        if self.kind == Kind::Spark {
            self.xv = self.xv.scale(physics.drag);
            self.yv = self.yv.scale(physics.drag);
            self.color = self.color.saturating_sub(1);
            if self.color == 0 {
                trace!("spark burnt out");
                self.active = false;
                return;
            }
        }

        // this frame's descent would carry it through y = 0
        if self.yv.is_negative() && self.y.to_bits() < self.yv.magnitude() {
            if self.kind == Kind::Spark {
                trace!("spark hit the ground");
                self.active = false;
                return;
            }
            self.yv = (-self.yv).scale(physics.bounce);
            if self.yv < MIN_REBOUND {
                trace!("bounce died out at {}", self.yv.to_bits());
                self.active = false;
                return;
            }
        }

        if self.kind == Kind::Shell && self.yv < PINNACLE_VELOCITY {
            self.active = false;
            field.publish_burst(Burst {
                x: self.x,
                y: self.y,
                xv: self.xv,
                color: self.color,
            });
            return;
        }

        if self.kind == Kind::Spark {
            match self.x.checked_offset(self.xv) {
                Some(x) => self.x = x,
                None => {
                    trace!("spark left the field sideways");
                    self.active = false;
                    return;
                }
            }
        } else {
            self.x = self.x.wrapping_offset(self.xv);
        }
        self.y = self.y.wrapping_offset(self.yv);
    }

    /// Fires a shell from the bottom centre of the field. Taller matrices get
    /// faster shells so bursts land at a similar relative height.
    pub fn launch_from_ground<R: RandomSource + ?Sized>(
        &mut self,
        geometry: &Geometry,
        rng: &mut R,
    ) {
        let span = 300 + 25 * geometry.height();
        self.yv = SAccum78::from_bits(600 + rng.uniform(span) as i16);
        self.xv = SAccum78::from_bits(rng.uniform(600) as i16 - 300);
        self.x = Accum88::CENTER;
        self.y = Accum88::ZERO;
        self.color = u8::MAX;
        self.kind = Kind::Shell;
        self.active = true;
    }

    /// Turns this slot into a spark flying out of `burst`.
    pub fn spawn_spark<R: RandomSource + ?Sized>(&mut self, burst: &Burst, rng: &mut R) {
        self.yv = SAccum78::from_bits(rng.uniform(2000) as i16 - 1000);
        self.xv = burst.xv + SAccum78::from_bits(rng.uniform(2000) as i16 - 1000);
        self.x = burst.x;
        self.y = burst.y;
        self.color = burst.color;
        self.kind = Kind::Spark;
        self.active = true;
    }
}
