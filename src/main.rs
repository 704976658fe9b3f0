use std::io::{stdout, BufWriter, Write};

use log::{error, info};

use pixel_dash::compute::{time_seed, RandomWander};
use pixel_dash::display::TerminalCanvas;
use pixel_dash::entities::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pixel_dash::session::SessionError;
use pixel_dash::terminal::{TerminalContext, TerminalInput};
use pixel_dash::{GameConfig, InitError, Session, SessionOutcome};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("failed to initialize: {0}")]
    Init(#[from] InitError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Always exits 0.  Console lines are held back until the terminal has been
/// restored, then written to stdout.
fn main() {
    env_logger::init();
    info!("Pixel Dash starting...");

    let mut console: Vec<u8> = Vec::new();
    match run(&mut console) {
        Ok(outcome) => info!(
            "finished: {:?}, score {} in {} frames",
            outcome.reason, outcome.score, outcome.frames
        ),
        Err(e) => error!("{}", e),
    }

    let mut out = stdout().lock();
    let _ = out.write_all(&console);
    let _ = out.flush();
}

fn run(console: &mut Vec<u8>) -> Result<SessionOutcome, AppError> {
    let config = GameConfig::load()?;
    let seed = config.seed.unwrap_or_else(time_seed);
    info!("enemy RNG seed {}", seed);

    // Dropping the context restores the terminal on every path out of here.
    let mut ctx = TerminalContext::acquire(BufWriter::new(stdout()))?;
    let (cols, rows) = ctx.size().map_err(InitError::from)?;

    let mut canvas = TerminalCanvas::new(ctx.writer(), cols, rows, SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut session = Session::new(config, RandomWander::from_seed(seed));
    let outcome = session.run(&mut canvas, &mut TerminalInput::new(), console)?;
    Ok(outcome)
}
