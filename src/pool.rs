//! Fixed-capacity storage for particles. Slots are recycled forever.

use crate::error::{Error, Result};
use crate::particle::{Kind, Particle};

pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::EmptyPool);
        }
        Ok(Self {
            slots: vec![Particle::default(); capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Particle> {
        self.slots.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }

    /// Indices of every slot free for reuse, lowest first.
    pub fn inactive_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.active)
            .map(|(i, _)| i)
    }

    pub fn find_inactive(&self) -> Option<usize> {
        self.inactive_slots().next()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn has_active_shell(&self) -> bool {
        self.iter_active().any(|p| p.kind == Kind::Shell)
    }

    /// Nothing left to move or draw.
    pub fn is_quiescent(&self) -> bool {
        self.slots.iter().all(|p| !p.active)
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self {
            slots: vec![Particle::default(); DEFAULT_CAPACITY],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_rejected() {
        assert_eq!(ParticlePool::new(0).unwrap_err(), Error::EmptyPool);
    }

    #[test]
    fn test_slot_bookkeeping() {
        let mut pool = ParticlePool::new(4).unwrap();
        assert!(pool.is_quiescent());
        assert_eq!(pool.find_inactive(), Some(0));

        for slot in [0, 2] {
            let p = pool.get_mut(slot).unwrap();
            p.active = true;
            p.kind = Kind::Spark;
        }
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.inactive_slots().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!pool.has_active_shell());

        pool.get_mut(3).unwrap().active = true;
        pool.get_mut(3).unwrap().kind = Kind::Shell;
        assert!(pool.has_active_shell());
        assert_eq!(pool.find_inactive(), Some(1));

        pool.get_mut(1).unwrap().active = true;
        assert_eq!(pool.find_inactive(), None);
        assert!(pool.get(4).is_none());
    }
}
