use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers, MouseEvent, MouseEventKind},
    execute,
    terminal::{self, Clear, ClearType},
};
use std::fs::File;
use std::io::{BufWriter, Stdout, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

use skyburst::canvas::TermCanvas;
use skyburst::cli::{Cli, Settings};
use skyburst::random::Random;
use skyburst::show::{Point, Show};
use skyburst::surface::Surface;
use skyburst::terminal::Session;

fn init_logging(path: &Path, verbose: u8) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build(cols: u16, rows: u16, settings: &Settings) -> (TermCanvas, Show) {
    let canvas = TermCanvas::new(
        cols as usize,
        rows as usize,
        settings.scale,
        settings.bg_color,
    );
    let rng = match settings.seed {
        Some(seed) => Random::with_seed(seed),
        None => Random::new(),
    };
    let show = Show::new(
        settings.show.clone(),
        rng,
        canvas.width(),
        canvas.height(),
    );
    info!(
        cols,
        rows,
        width = canvas.width(),
        height = canvas.height(),
        stars = show.stars().len(),
        "sky ready"
    );
    (canvas, show)
}

fn is_quit(event: &Event) -> bool {
    let Event::Key(key_event) = event else {
        return false;
    };
    key_event.code == KeyCode::Char('q')
        || key_event.code == KeyCode::Esc
        || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
}

fn run(stdout: &mut BufWriter<Stdout>, settings: &Settings) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let (mut canvas, mut show) = build(cols, rows, settings);

    let fixed_dt = 1.0 / settings.fps as f32;
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    let mut ticks: u64 = 0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            if is_quit(&event) {
                break;
            }
            match event {
                Event::Resize(cols, rows) => {
                    (canvas, show) = build(cols, rows, settings);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(_),
                    column,
                    row,
                    ..
                }) => {
                    let target = Point::new(
                        (column as f32 + 0.5) * settings.scale,
                        (row as f32 * 2.0 + 1.0) * settings.scale,
                    );
                    show.launch_at(target, canvas.height());
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > fixed_dt * 3.0 {
            accumulator = fixed_dt * 3.0;
        }

        let mut dirty = false;
        while accumulator >= fixed_dt {
            let report = show.tick(&mut canvas);
            accumulator -= fixed_dt;
            if report.launched || report.boomed > 0 {
                trace!(
                    launched = report.launched,
                    boomed = report.boomed,
                    spawned = report.spawned,
                    expired = report.expired,
                    dropped = report.dropped,
                    "tick"
                );
            }
            dirty = true;

            ticks += 1;
            if ticks % u64::from(settings.fps) == 0 {
                debug!(
                    ticks,
                    fireworks = show.fireworks().len(),
                    particles = show.particles().len(),
                    hue = show.hue(),
                    "live entities"
                );
            }
        }

        if dirty {
            canvas.present(stdout)?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.verbose)?;
    }
    info!(?settings, "starting");

    let stdout = BufWriter::with_capacity(1024 * 64, stdout());
    let mut session = Session::start(stdout).context("failed to set up the terminal")?;

    let result = run(session.out(), &settings);
    let restored = session
        .finish()
        .context("failed to restore the terminal");

    if let Err(err) = &result {
        tracing::error!(error = %err, "display stopped");
    }
    result.and(restored)
}
