use super::Effect;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use fireworks_xy::{Frame, Launcher, Simulation};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How a lit LED looks against the unlit background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub tint: Rgb,
    pub background: Rgb,
}

impl Appearance {
    /// Blends from background to tint as brightness goes 0..=255.
    fn shade(&self, brightness: u8) -> Rgb {
        let mix = |bg: u8, fg: u8| {
            let b = u16::from(brightness);
            ((u16::from(bg) * (255 - b) + u16::from(fg) * b) / 255) as u8
        };
        Rgb(
            mix(self.background.0, self.tint.0),
            mix(self.background.1, self.tint.1),
            mix(self.background.2, self.tint.2),
        )
    }
}

/// Shows the LED matrix scaled up by whole cells and centred in the terminal.
pub struct FireworksEffect {
    width: usize,
    height: usize,
    sim: Simulation,
    launcher: Launcher,
    rng: fastrand::Rng,
    leds: Frame,
    appearance: Appearance,
    output_buf: Vec<u8>,
}

impl FireworksEffect {
    pub fn new(
        sim: Simulation,
        launcher: Launcher,
        rng: fastrand::Rng,
        appearance: Appearance,
    ) -> Self {
        let leds = Frame::for_geometry(sim.geometry());
        Self {
            width: 0,
            height: 0,
            sim,
            launcher,
            rng,
            leds,
            appearance,
            output_buf: Vec::new(),
        }
    }

    /// Terminal pixels per LED along each axis.
    fn led_size(&self) -> usize {
        (self.width / self.leds.width())
            .min(self.height / self.leds.height())
            .max(1)
    }

    /// Brightness of the LED under terminal pixel (x, y).
    fn led_at(&self, x: usize, y: usize, size: usize, origin: (usize, usize)) -> u8 {
        let (Some(dx), Some(dy)) = (x.checked_sub(origin.0), y.checked_sub(origin.1)) else {
            return 0;
        };
        self.leds.get(dx / size, dy / size).unwrap_or(0)
    }
}

impl Effect for FireworksEffect {
    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.output_buf = Vec::with_capacity(width * height * 25);
    }

    fn update(&mut self) {
        self.leds.clear();
        self.launcher.tick(&mut self.sim, &mut self.rng);
        self.sim.frame(&mut self.rng, &mut self.leds);
    }

    fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let mut buf = std::mem::take(&mut self.output_buf);
        buf.clear();
        buf.extend_from_slice(b"\x1b[H");

        let size = self.led_size();
        let origin = (
            self.width.saturating_sub(self.leds.width() * size) / 2,
            self.height.saturating_sub(self.leds.height() * size) / 2,
        );

        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        // Render using half-blocks
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.appearance.shade(self.led_at(x, y, size, origin));
                let bot = if y + 1 < self.height {
                    self.appearance.shade(self.led_at(x, y + 1, size, origin))
                } else {
                    top
                };

                if prev_top != Some(top) {
                    write!(buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                buf.extend_from_slice("▄".as_bytes());
            }
            buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&buf)?;
        self.output_buf = buf;
        out.flush()
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char(' ')
                && !self.sim.pool().has_active_shell()
            {
                self.sim.launch(&mut self.rng);
            }
        }
    }
}
