//! 8.8 fixed-point values and the 8-bit scaling helpers built on them.
//!
//! Positions are unsigned 8.8 ([`Accum88`]), velocities and accelerations are
//! signed 7.8 ([`SAccum78`]) and damping factors are 0..=255 fractions of one
//! ([`Fract8`]). All the divide-by-256 truncation lives here.

use std::ops::{Add, Neg};

/// Unsigned 8.8 position: 8 integer bits, 8 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Accum88(u16);

impl Accum88 {
    pub const ZERO: Self = Self(0);
    pub const CENTER: Self = Self(0x8000);
    pub const MAX: Self = Self(u16::MAX);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Whole-unit part.
    pub const fn integer(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Sub-unit part in 1/256ths.
    pub const fn fraction(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Moves by `delta`, or `None` if the result leaves the representable range.
    pub fn checked_offset(self, delta: SAccum78) -> Option<Self> {
        self.0.checked_add_signed(delta.0).map(Self)
    }

    /// Moves by `delta`, wrapping at the ends of the range.
    pub fn wrapping_offset(self, delta: SAccum78) -> Self {
        Self(self.0.wrapping_add_signed(delta.0))
    }
}

/// Signed 7.8 velocity or acceleration, in position units per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SAccum78(i16);

impl SAccum78 {
    pub const ZERO: Self = Self(0);

    pub const fn from_bits(bits: i16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> i16 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value in raw units; total for `i16::MIN`.
    pub const fn magnitude(self) -> u16 {
        self.0.unsigned_abs()
    }

    /// `self * factor / 256`, truncating toward zero.
    pub fn scale(self, factor: Fract8) -> Self {
        let scaled = i32::from(self.0) * i32::from(factor.0) / 256;
        // |scaled| <= |self|, so this never truncates
        Self(scaled as i16)
    }
}

impl Add for SAccum78 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Neg for SAccum78 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// Fraction of one in 1/256ths: 0 is 0.0, 255 is just under 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fract8(u8);

impl Fract8 {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u8 {
        self.0
    }
}

/// Scales `i` by `scale / 256`, treating 255 as exactly one.
///
/// The result never exceeds `i` and grows monotonically with both inputs.
#[inline]
pub fn scale8(i: u8, scale: u8) -> u8 {
    ((u16::from(i) * (1 + u16::from(scale))) >> 8) as u8
}

/// Perceptual dimming for LEDs: squares the input in the 0..=255 domain but
/// keeps any non-zero value lit.
#[inline]
pub fn dim8_video(x: u8) -> u8 {
    if x == 0 {
        return 0;
    }
    let x = u16::from(x);
    ((x * x) >> 8) as u8 + 1
}

/// Maps the integer part of `a` onto `n` screen steps.
///
/// Returns the step index and the residual left over by that quantisation,
/// stretched to a 0..=255 weight toward the next step. `n` must be non-zero.
pub fn screenscale(a: Accum88, n: u8) -> (u8, u8) {
    debug_assert!(n > 0, "screenscale needs at least one step");
    let ia = u16::from(a.integer());
    let n = u16::from(n);

    let cell = (ia * n) >> 8;
    let covered = cell * (256 / n);
    let residual = ia.saturating_sub(covered);
    let stretch = (255 * n) >> 8;
    let weight = (residual * stretch).min(255);

    (cell as u8, weight as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_accum88_parts() {
        let a = Accum88::from_bits(0x12AB);
        assert_eq!(a.integer(), 0x12);
        assert_eq!(a.fraction(), 0xAB);
        assert_eq!(Accum88::CENTER.integer(), 128);
    }

    #[test]
    fn test_checked_offset_reports_edges() {
        let near_top = Accum88::from_bits(0xFFF0);
        assert_eq!(near_top.checked_offset(SAccum78::from_bits(0x20)), None);
        assert_eq!(
            near_top.checked_offset(SAccum78::from_bits(0x0F)),
            Some(Accum88::MAX)
        );

        let near_bottom = Accum88::from_bits(0x10);
        assert_eq!(near_bottom.checked_offset(SAccum78::from_bits(-0x20)), None);
        assert_eq!(
            near_bottom.checked_offset(SAccum78::from_bits(-0x10)),
            Some(Accum88::ZERO)
        );
        assert_eq!(
            near_bottom.checked_offset(SAccum78::ZERO),
            Some(near_bottom)
        );
    }

    #[test]
    fn test_wrapping_offset_wraps() {
        let a = Accum88::from_bits(0xFFFF);
        assert_eq!(a.wrapping_offset(SAccum78::from_bits(2)).to_bits(), 1);
    }

    #[test_case(-2000, 200, -1562 ; "negative truncates toward zero")]
    #[test_case(2000, 200, 1562 ; "positive truncates down")]
    #[test_case(2000, 50, 390 ; "heavy damping")]
    #[test_case(-1, 250, 0 ; "tiny values vanish")]
    #[test_case(i16::MIN, 255, -32640 ; "extreme input stays in range")]
    fn test_scale(v: i16, f: u8, expected: i16) {
        let scaled = SAccum78::from_bits(v).scale(Fract8::from_bits(f));
        assert_eq!(scaled.to_bits(), expected);
    }

    #[test]
    fn test_velocity_ops_saturate() {
        let max = SAccum78::from_bits(i16::MAX);
        assert_eq!((max + SAccum78::from_bits(1)).to_bits(), i16::MAX);
        assert_eq!((-SAccum78::from_bits(i16::MIN)).to_bits(), i16::MAX);
        assert_eq!(SAccum78::from_bits(i16::MIN).magnitude(), 32768);
    }

    #[test_case(255, 255, 255)]
    #[test_case(200, 255, 200)]
    #[test_case(0, 255, 0)]
    #[test_case(255, 0, 0)]
    #[test_case(128, 127, 64)]
    fn test_scale8(i: u8, s: u8, expected: u8) {
        assert_eq!(scale8(i, s), expected);
    }

    #[test]
    fn test_scale8_is_bounded_and_monotonic() {
        for i in 0..=255u8 {
            let mut prev = 0;
            for s in 0..=255u8 {
                let v = scale8(i, s);
                assert!(v <= i);
                assert!(v >= prev);
                prev = v;
            }
        }
    }

    #[test]
    fn test_dim8_video_curve() {
        assert_eq!(dim8_video(0), 0);
        assert_eq!(dim8_video(1), 1);
        assert_eq!(dim8_video(128), 65);
        assert_eq!(dim8_video(255), 255);

        let mut prev = 0;
        for x in 0..=255u8 {
            let d = dim8_video(x);
            assert!(d <= x, "dimming brightened {x} to {d}");
            assert!(d >= prev);
            prev = d;
        }
    }

    #[test]
    fn test_screenscale() {
        // 16-pixel matrix with a 3-pixel border: 22 units, 21 steps
        assert_eq!(screenscale(Accum88::ZERO, 21), (0, 0));
        assert_eq!(screenscale(Accum88::CENTER, 21), (10, 160));
        // fraction bits never affect the quantisation
        assert_eq!(screenscale(Accum88::from_bits(0x80FF), 21), (10, 160));

        for bits in (0..=u16::MAX).step_by(97) {
            let (cell, _) = screenscale(Accum88::from_bits(bits), 21);
            assert!(cell < 21);
        }
    }
}
