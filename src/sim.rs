//! One frame = advance every slot, turn a pending burst into sparks, draw.

use crate::error::Result;
use crate::field::{Field, Geometry, Physics};
use crate::pool::{DEFAULT_CAPACITY, ParticlePool};
use crate::raster::{self, PixelSink};
use crate::rng::RandomSource;
use log::debug;

/// Everything fixed at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub geometry: Geometry,
    pub physics: Physics,
    /// Number of particle slots, shells and sparks together
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            physics: Physics::default(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    field: Field,
    pool: ParticlePool,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            field: Field::new(config.physics, config.geometry),
            pool: ParticlePool::new(config.capacity)?,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn geometry(&self) -> &Geometry {
        &self.field.geometry
    }

    /// Physics pass over every slot.
    pub fn advance(&mut self) {
        for particle in self.pool.iter_mut() {
            particle.advance(&mut self.field);
        }
    }

    /// Converts the pending burst, if any, into a batch of sparks and returns
    /// how many were spawned. With every slot busy the burst is lost.
    pub fn dispatch_burst<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let Some(burst) = self.field.take_burst() else {
            return 0;
        };

        let batch = self.spark_batch(rng);
        let slots: Vec<usize> = self.pool.inactive_slots().take(batch).collect();
        if slots.is_empty() {
            debug!("burst dropped, no free slots");
            return 0;
        }

        for &slot in &slots {
            if let Some(particle) = self.pool.get_mut(slot) {
                particle.spawn_spark(&burst, rng);
            }
        }
        debug!(
            "burst spawned {} of {} sparks at ({}+{}/256, {}+{}/256)",
            slots.len(),
            batch,
            burst.x.integer(),
            burst.x.fraction(),
            burst.y.integer(),
            burst.y.fraction()
        );
        slots.len()
    }

    /// Between half and all of the pool, at least one.
    fn spark_batch<R: RandomSource + ?Sized>(&self, rng: &mut R) -> usize {
        let capacity = self.pool.capacity();
        let low = (capacity / 2).max(1);
        let span = u16::try_from(capacity - low + 1).unwrap_or(u16::MAX);
        low + usize::from(rng.uniform(span))
    }

    pub fn render<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        for particle in self.pool.iter() {
            raster::render(particle, &self.field.geometry, sink);
        }
    }

    /// Runs one full frame and returns the number of sparks born in it.
    pub fn frame<R, S>(&mut self, rng: &mut R, sink: &mut S) -> usize
    where
        R: RandomSource + ?Sized,
        S: PixelSink + ?Sized,
    {
        self.advance();
        let spawned = self.dispatch_burst(rng);
        self.render(sink);
        spawned
    }

    /// Fires a shell from the first free slot.
    pub fn launch<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let slot = self.pool.find_inactive()?;
        let geometry = self.field.geometry;
        let particle = self.pool.get_mut(slot)?;
        particle.launch_from_ground(&geometry, rng);
        debug!(
            "shell launched from slot {} with velocity ({}, {})",
            slot,
            particle.xv.to_bits(),
            particle.yv.to_bits()
        );
        Some(slot)
    }
}
