//! The frame loop: drain input, simulate, report, draw, sleep.

use std::io::Write;

use log::info;

use crate::compute::{init_state, steer_player, tick, GameEvent, WanderSource};
use crate::config::GameConfig;
use crate::display::{render, Canvas};
use crate::entities::{GameState, SessionState};
use crate::input::{InputError, InputEvent, InputSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Initializing,
    Running,
    Terminating,
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Won,
    Lost,
    /// `max_frames` was reached.
    FrameLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub reason: EndReason,
    pub score: u32,
    pub frames: u64,
}

/// I/O failures while a session is running.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("presentation failed: {0}")]
    Present(#[from] std::io::Error),
}

/// One game from first frame to a terminal outcome.
///
/// The wander source is injected so the enemy's behaviour can be scripted.
pub struct Session<S> {
    state: GameState,
    config: GameConfig,
    wander: S,
    phase: LoopPhase,
    end: Option<EndReason>,
}

impl<S: WanderSource> Session<S> {
    pub fn new(config: GameConfig, wander: S) -> Self {
        let state = init_state(config.speed);
        Self::with_state(config, wander, state)
    }

    /// Start from an arbitrary state instead of the opening layout.
    pub fn with_state(config: GameConfig, wander: S, state: GameState) -> Self {
        Self {
            state,
            config,
            wander,
            phase: LoopPhase::Initializing,
            end: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.end.map(|reason| self.outcome_for(reason))
    }

    /// Simulate a single frame without drawing or sleeping.
    ///
    /// Returns the end reason once the session is over; further calls keep
    /// returning it and change nothing.
    pub fn step_frame<I, W>(
        &mut self,
        input: &mut I,
        console: &mut W,
    ) -> Result<Option<EndReason>, SessionError>
    where
        I: InputSource + ?Sized,
        W: Write + ?Sized,
    {
        match self.phase {
            LoopPhase::Terminating => return Ok(self.end),
            LoopPhase::Initializing => {
                info!("session started");
                self.phase = LoopPhase::Running;
            }
            LoopPhase::Running => {}
        }

        // Every pending event is applied in arrival order before the step.
        while let Some(event) = input.poll()? {
            if event == InputEvent::Quit {
                input.end_frame();
                return Ok(Some(self.finish(EndReason::Quit)));
            }
            self.state = steer_player(&self.state, &event);
        }
        input.end_frame();

        let (next, events) = tick(
            &self.state,
            &mut self.wander,
            self.config.direction_change_percent,
        );
        self.state = next;
        report(console, &events)?;

        let reason = match self.state.state {
            SessionState::Running => None,
            SessionState::Won => Some(self.finish(EndReason::Won)),
            SessionState::Lost => Some(self.finish(EndReason::Lost)),
        };
        Ok(reason)
    }

    /// Drive frames until the game ends, the player quits, or the frame cap
    /// is hit.  A frame is drawn only while the game is still running.
    pub fn run<C, I, W>(
        &mut self,
        canvas: &mut C,
        input: &mut I,
        console: &mut W,
    ) -> Result<SessionOutcome, SessionError>
    where
        C: Canvas + ?Sized,
        I: InputSource + ?Sized,
        W: Write + ?Sized,
    {
        let delay = self.config.frame_delay();
        loop {
            // Checked first so a cap of zero simulates nothing.
            if let Some(limit) = self.config.max_frames {
                if self.state.frame >= limit {
                    let reason = self.finish(EndReason::FrameLimit);
                    return Ok(self.outcome_for(reason));
                }
            }

            if let Some(reason) = self.step_frame(input, console)? {
                return Ok(self.outcome_for(reason));
            }

            if let Some((cols, rows)) = input.take_resize() {
                canvas.resize(cols, rows);
            }
            render(canvas, &self.state)?;

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }

    fn finish(&mut self, reason: EndReason) -> EndReason {
        info!(
            "session ended: {:?} after {} frames, score {}",
            reason, self.state.frame, self.state.score
        );
        self.phase = LoopPhase::Terminating;
        self.end = Some(reason);
        reason
    }

    fn outcome_for(&self, reason: EndReason) -> SessionOutcome {
        SessionOutcome {
            reason,
            score: self.state.score,
            frames: self.state.frame,
        }
    }
}

/// Human-readable lines for the console.
fn report<W: Write + ?Sized>(console: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
    for event in events {
        match event {
            GameEvent::Collected { score, .. } => writeln!(console, "Score: {}", score)?,
            GameEvent::Won { score } => writeln!(console, "You Win! Final Score: {}", score)?,
            GameEvent::Lost { score } => {
                writeln!(console, "Player has died! Final Score: {}", score)?
            }
        }
    }
    Ok(())
}
