use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use fireworks_xy::{Launcher, Simulation};
use log::info;
use std::io::{BufWriter, Stdout, stdout};
use std::time::{Duration, Instant};

mod cli;
mod effects;

use cli::Cli;
use effects::Effect;
use effects::fireworks::FireworksEffect;

fn run_effect<E: Effect>(effect: &mut E, fps: u32) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = frame_loop(effect, fps, &mut stdout);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

fn frame_loop<E: Effect>(
    effect: &mut E,
    fps: u32,
    stdout: &mut BufWriter<Stdout>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    effect.resize(cols as usize, rows as usize * 2);

    let fixed_dt = 1.0 / fps as f32;
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        return Ok(());
                    }
                    effect.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    effect.resize(*cols as usize, *rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => effect.handle_event(&event),
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > fixed_dt * 3.0 {
            accumulator = fixed_dt * 3.0;
        }

        while accumulator >= fixed_dt {
            effect.update();
            accumulator -= fixed_dt;
        }

        effect.render(stdout)?;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    let config = cli.sim_config().context("invalid matrix configuration")?;
    let sim = Simulation::new(config).context("invalid simulation configuration")?;
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    info!(
        "{}x{} matrix, {} particle slots, seed {:?}",
        config.geometry.width(),
        config.geometry.height(),
        config.capacity,
        cli.seed
    );
    info!(
        "gravity {}, bounce {}/256, drag {}/256",
        config.physics.gravity.to_bits(),
        config.physics.bounce.to_bits(),
        config.physics.drag.to_bits()
    );

    let launcher = Launcher::new(cli.max_delay);
    let mut effect = FireworksEffect::new(sim, launcher, rng, cli.appearance());
    run_effect(&mut effect, cli.fps).context("terminal session failed")?;

    Ok(())
}
