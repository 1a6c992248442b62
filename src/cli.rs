//! Command-line options for the terminal front-end

use clap::Parser;
use fireworks_xy::field::DEFAULT_BORDER;
use fireworks_xy::launcher::DEFAULT_MAX_DELAY;
use fireworks_xy::pool::DEFAULT_CAPACITY;
use fireworks_xy::{Config, Fract8, Geometry, Physics, SAccum78};

use crate::effects::fireworks::{Appearance, Rgb};

/// Upper bound for `--sparks`; the pool is scanned linearly every frame.
const MAX_SPARKS: i64 = 4096;

#[derive(Parser, Debug)]
#[command(name = "fireworks-xy")]
#[command(about = "Fixed-point fireworks on a simulated LED matrix", long_about = None)]
#[command(version)]
#[command(after_help = "Keys: Space launches a shell, q / Esc / Ctrl+C exits.\n\
    Logs go to stderr; redirect it (2>log.txt) when raising verbosity.")]
pub struct Cli {
    /// Visible matrix width in pixels
    #[arg(long, default_value_t = 16)]
    pub width: u16,

    /// Visible matrix height in pixels
    #[arg(long, default_value_t = 16)]
    pub height: u16,

    /// Off-screen margin around the matrix, in pixels
    #[arg(long, default_value_t = DEFAULT_BORDER)]
    pub border: u16,

    /// Particle slots shared by shells and sparks
    #[arg(
        long,
        default_value_t = DEFAULT_CAPACITY as u16,
        value_parser = clap::value_parser!(u16).range(1..=MAX_SPARKS)
    )]
    pub sparks: u16,

    /// Vertical acceleration in 1/256 units per frame (negative pulls down)
    #[arg(long, default_value_t = -15, allow_negative_numbers = true)]
    pub gravity: i16,

    /// Share of vertical speed kept after a ground bounce, out of 256
    #[arg(long, default_value_t = 200)]
    pub bounce: u8,

    /// Share of spark speed kept each frame, out of 256
    #[arg(long, default_value_t = 250)]
    pub drag: u8,

    /// Longest pause between shells, in frames
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY)]
    pub max_delay: u16,

    /// Seed for a reproducible show
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulation frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// LED color as hex RRGGBB
    #[arg(long, default_value = "ffc860", value_parser = parse_hex_color)]
    pub tint: Rgb,

    /// Background color as hex RRGGBB (e.g., --bg-color 1a1b26)
    #[arg(long, default_value = "000000", value_parser = parse_hex_color)]
    pub bg_color: Rgb,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn sim_config(&self) -> fireworks_xy::Result<Config> {
        Ok(Config {
            geometry: Geometry::with_border(self.width, self.height, self.border)?,
            physics: Physics {
                gravity: SAccum78::from_bits(self.gravity),
                bounce: Fract8::from_bits(self.bounce),
                drag: Fract8::from_bits(self.drag),
            },
            capacity: usize::from(self.sparks),
        })
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            tint: self.tint,
            background: self.bg_color,
        }
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, false) => None,
            (0, true) => Some(log::LevelFilter::Error),
            (1, _) => Some(log::LevelFilter::Info),
            (2, _) => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}

pub fn parse_hex_color(hex: &str) -> Result<Rgb, String> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got {hex:?}"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid hex color {hex:?}: {e}"))
    };
    Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("1a1b26"), Ok(Rgb(0x1a, 0x1b, 0x26)));
        assert_eq!(parse_hex_color("#FFC860"), Ok(Rgb(0xff, 0xc8, 0x60)));
        assert!(parse_hex_color("12345").is_err());
        assert!(parse_hex_color("zzzzzz").is_err());
        assert!(parse_hex_color("ééé").is_err());
    }

    #[test]
    fn test_defaults_match_library() {
        let cli = Cli::try_parse_from(["fireworks-xy"]).unwrap();
        assert_eq!(cli.sim_config().unwrap(), Config::default());
        assert_eq!(cli.log_level(), None);
        assert_eq!(cli.appearance().background, Rgb(0, 0, 0));
    }

    #[test]
    fn test_custom_options() {
        let cli = Cli::try_parse_from([
            "fireworks-xy",
            "--width",
            "32",
            "--height",
            "8",
            "--gravity",
            "-20",
            "--seed",
            "7",
            "-vv",
        ])
        .unwrap();
        let config = cli.sim_config().unwrap();
        assert_eq!(config.geometry.width(), 32);
        assert_eq!(config.geometry.height(), 8);
        assert_eq!(config.physics.gravity.to_bits(), -20);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_oversized_matrix_is_an_error() {
        let cli = Cli::try_parse_from(["fireworks-xy", "--width", "300"]).unwrap();
        assert_eq!(
            cli.sim_config().unwrap_err(),
            fireworks_xy::Error::FieldTooLarge {
                axis: "width",
                size: 300,
                border: 3
            }
        );
        assert!(Cli::try_parse_from(["fireworks-xy", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_spark_pool_size_is_bounded() {
        assert!(Cli::try_parse_from(["fireworks-xy", "--sparks", "0"]).is_err());
        assert!(Cli::try_parse_from(["fireworks-xy", "--sparks", "4097"]).is_err());
        assert!(Cli::try_parse_from(["fireworks-xy", "--sparks", "18446744073709551615"]).is_err());

        let cli = Cli::try_parse_from(["fireworks-xy", "--sparks", "4096"]).unwrap();
        assert_eq!(cli.sim_config().unwrap().capacity, 4096);
    }

    #[test]
    fn test_single_pixel_row_without_border_is_an_error() {
        let cli = Cli::try_parse_from(["fireworks-xy", "--height", "1", "--border", "0"]).unwrap();
        assert_eq!(
            cli.sim_config().unwrap_err(),
            fireworks_xy::Error::FieldTooSmall {
                axis: "height",
                size: 1,
                border: 0
            }
        );
    }
}
