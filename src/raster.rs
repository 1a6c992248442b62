//! Sub-pixel rendering: one particle lights the 2x2 block of pixels around
//! its position, weighted by how close it sits to each of them.

use crate::field::Geometry;
use crate::fixed::{dim8_video, scale8, screenscale};
use crate::particle::Particle;

/// Anything that can light an LED.
///
/// Corner writes routinely land one past the last row or column, and
/// particles in the border land further out still. Sinks must ignore
/// coordinates they do not have.
pub trait PixelSink {
    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8);
}

/// One recorded `set_pixel` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    pub x: i32,
    pub y: i32,
    pub brightness: u8,
}

impl PixelSink for Vec<PixelWrite> {
    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) {
        self.push(PixelWrite { x, y, brightness });
    }
}

/// Where a particle lands on the matrix and how its brightness splits
/// across the four pixels it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Visible column of the near corner
    pub x: i32,
    /// Visible row of the near corner, after flipping
    pub y: i32,
    /// Undimmed weights for (x, y), (x, y+1), (x+1, y), (x+1, y+1)
    pub weights: [u8; 4],
}

pub fn footprint(particle: &Particle, geometry: &Geometry) -> Footprint {
    let (sx, xe) = screenscale(particle.x, geometry.x_steps());
    let (sy, ye) = screenscale(particle.y, geometry.y_steps());

    let x = i32::from(sx) - i32::from(geometry.x_offset());
    let y = i32::from(geometry.height()) - (i32::from(sy) - i32::from(geometry.y_offset())) - 1;

    let xc = 255 - xe;
    let yc = 255 - ye;
    let c = particle.color;

    Footprint {
        x,
        y,
        weights: [
            scale8(scale8(c, yc), xc),
            scale8(scale8(c, ye), xc),
            scale8(scale8(c, yc), xe),
            scale8(scale8(c, ye), xe),
        ],
    }
}

/// Draws an active particle as exactly four writes; inactive ones draw nothing.
pub fn render<S: PixelSink + ?Sized>(particle: &Particle, geometry: &Geometry, sink: &mut S) {
    if !particle.active {
        return;
    }
    let Footprint { x, y, weights } = footprint(particle, geometry);
    let [c00, c01, c10, c11] = weights;

    sink.set_pixel(x, y, dim8_video(c00));
    sink.set_pixel(x, y + 1, dim8_video(c01));
    sink.set_pixel(x + 1, y, dim8_video(c10));
    sink.set_pixel(x + 1, y + 1, dim8_video(c11));
}

/// In-memory brightness matrix. Overlapping writes keep the brightest value.
#[derive(Debug, Clone)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn for_geometry(geometry: &Geometry) -> Self {
        Self::new(usize::from(geometry.width()), usize::from(geometry.height()))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// True if any pixel is lit.
    pub fn is_lit(&self) -> bool {
        self.pixels.iter().any(|&p| p > 0)
    }
}

impl PixelSink for Frame {
    fn set_pixel(&mut self, x: i32, y: i32, brightness: u8) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if brightness > self.pixels[idx] {
            self.pixels[idx] = brightness;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Accum88;
    use crate::particle::Kind;
    use pretty_assertions::assert_eq;

    fn dot(x: u16, y: u16, color: u8) -> Particle {
        Particle {
            active: true,
            kind: Kind::Spark,
            x: Accum88::from_bits(x),
            y: Accum88::from_bits(y),
            color,
            ..Particle::default()
        }
    }

    fn write(x: i32, y: i32, brightness: u8) -> PixelWrite {
        PixelWrite { x, y, brightness }
    }

    #[test]
    fn test_inactive_draws_nothing() {
        let mut p = dot(0x8000, 0x8000, 255);
        p.active = false;
        let mut writes = Vec::new();

        render(&p, &Geometry::default(), &mut writes);
        assert!(writes.is_empty());
    }

    #[test]
    fn test_center_footprint() {
        let geometry = Geometry::default();
        let p = dot(0x8000, 0x8000, 255);

        let fp = footprint(&p, &geometry);
        assert_eq!(fp, Footprint { x: 7, y: 8, weights: [35, 60, 59, 100] });

        let mut writes = Vec::new();
        render(&p, &geometry, &mut writes);
        assert_eq!(
            writes,
            vec![write(7, 8, 5), write(7, 9, 15), write(8, 8, 14), write(8, 9, 40)]
        );
    }

    #[test]
    fn test_weights_partition_brightness() {
        let geometry = Geometry::default();
        for color in [1u8, 17, 128, 200, 255] {
            for x in (0..=u16::MAX).step_by(1021) {
                for y in (0..=u16::MAX).step_by(2039) {
                    let p = dot(x, y, color);
                    let total: u32 = footprint(&p, &geometry)
                        .weights
                        .iter()
                        .map(|&w| u32::from(w))
                        .sum();
                    assert!(total <= u32::from(color), "{total} > {color} at ({x}, {y})");
                    assert!(total + 3 >= u32::from(color), "{total} << {color} at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_writes_never_exceed_color() {
        let geometry = Geometry::new(24, 12).unwrap();
        for color in [3u8, 90, 255] {
            for x in (0..=u16::MAX).step_by(4093) {
                let mut writes = Vec::new();
                render(&dot(x, 0x4000, color), &geometry, &mut writes);
                assert_eq!(writes.len(), 4);
                assert!(writes.iter().all(|w| w.brightness <= color));
            }
        }
    }

    #[test]
    fn test_frame_ignores_out_of_range() {
        let mut frame = Frame::new(4, 3);
        frame.set_pixel(-1, 0, 255);
        frame.set_pixel(0, -1, 255);
        frame.set_pixel(4, 0, 255);
        frame.set_pixel(0, 3, 255);
        assert!(!frame.is_lit());

        // a particle deep in the border lands entirely off the matrix
        render(&dot(0, 0, 255), &Geometry::new(4, 3).unwrap(), &mut frame);
        assert!(!frame.is_lit());
    }

    #[test]
    fn test_frame_keeps_brightest() {
        let mut frame = Frame::new(4, 3);
        frame.set_pixel(1, 2, 80);
        frame.set_pixel(1, 2, 40);
        assert_eq!(frame.get(1, 2), Some(80));
        frame.set_pixel(1, 2, 120);
        assert_eq!(frame.get(1, 2), Some(120));
        assert_eq!(frame.get(4, 0), None);

        frame.clear();
        assert!(!frame.is_lit());
    }
}
