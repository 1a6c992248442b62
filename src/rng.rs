/// Source of uniform integers for launch and burst velocities.
pub trait RandomSource {
    /// A value in `0..max_exclusive`, or 0 when the range is empty.
    fn uniform(&mut self, max_exclusive: u16) -> u16;
}

impl RandomSource for fastrand::Rng {
    fn uniform(&mut self, max_exclusive: u16) -> u16 {
        if max_exclusive == 0 {
            return 0;
        }
        self.u16(0..max_exclusive)
    }
}

/// Always answers the same value, clamped into range.
#[cfg(test)]
pub(crate) struct FixedRandom(pub u16);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn uniform(&mut self, max_exclusive: u16) -> u16 {
        self.0.min(max_exclusive.saturating_sub(1))
    }
}
