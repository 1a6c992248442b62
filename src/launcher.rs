//! Keeps a single shell going: once the sky is clear, waits a random number
//! of frames and fires again.

use crate::rng::RandomSource;
use crate::sim::Simulation;

pub const DEFAULT_MAX_DELAY: u16 = 350;

#[derive(Debug, Clone)]
pub struct Launcher {
    countdown: u16,
    max_delay: u16,
}

impl Launcher {
    /// The first shell goes up on the first tick.
    pub fn new(max_delay: u16) -> Self {
        Self {
            countdown: 0,
            max_delay,
        }
    }

    /// Frames left before the next launch.
    pub fn countdown(&self) -> u16 {
        self.countdown
    }

    /// Call once per frame before `Simulation::frame`. Returns the slot of a
    /// newly launched shell.
    pub fn tick<R: RandomSource + ?Sized>(
        &mut self,
        sim: &mut Simulation,
        rng: &mut R,
    ) -> Option<usize> {
        if sim.pool().has_active_shell() || sim.field().burst_pending() {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }

        let slot = sim.launch(rng)?;
        self.countdown = rng.uniform(self.max_delay) + 1;
        Some(slot)
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELAY)
    }
}
