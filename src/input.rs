//! Key transitions and how they turn into player velocity.
//!
//! Each axis is a single slot: pressing a key overwrites the slot, releasing
//! either key of an opposing pair clears it.  Holding Up, then tapping Down,
//! leaves the player with no vertical motion even though Up is still down.
//! Diagonals are not normalised.

use std::collections::VecDeque;

use crate::entities::Velocity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / quit key.
    Quit,
    KeyDown(Direction),
    KeyUp(Direction),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read input event: {0}")]
    Read(#[from] std::io::Error),
}

/// Non-blocking event queue.  `Ok(None)` means nothing is pending this frame.
pub trait InputSource {
    fn poll(&mut self) -> Result<Option<InputEvent>, InputError>;

    /// Called by the frame loop once the queue has been drained.
    fn end_frame(&mut self) {}

    /// Latest output size `(cols, rows)` seen since the last call, if the
    /// output was resized.
    fn take_resize(&mut self) -> Option<(u16, u16)> {
        None
    }
}

/// Apply one key transition to the current velocity.
pub fn apply_input(vel: Velocity, event: &InputEvent, speed: i32) -> Velocity {
    match *event {
        InputEvent::KeyDown(Direction::Up) => Velocity { vy: -speed, ..vel },
        InputEvent::KeyDown(Direction::Down) => Velocity { vy: speed, ..vel },
        InputEvent::KeyDown(Direction::Left) => Velocity { vx: -speed, ..vel },
        InputEvent::KeyDown(Direction::Right) => Velocity { vx: speed, ..vel },
        InputEvent::KeyUp(Direction::Up | Direction::Down) => Velocity { vy: 0, ..vel },
        InputEvent::KeyUp(Direction::Left | Direction::Right) => Velocity { vx: 0, ..vel },
        InputEvent::Quit => vel,
    }
}

// ── Scripted input ────────────────────────────────────────────────────────────

/// Replays a fixed list of per-frame event batches.
///
/// `poll` hands out the current frame's events one at a time and returns
/// `None` once the batch is empty; `end_frame` advances to the next batch.
/// After the script runs out every frame is empty.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<VecDeque<InputEvent>>,
    current: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        let mut frames: VecDeque<VecDeque<InputEvent>> =
            frames.into_iter().map(VecDeque::from).collect();
        let current = frames.pop_front().unwrap_or_default();
        Self { frames, current }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_empty() && self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Option<InputEvent>, InputError> {
        Ok(self.current.pop_front())
    }

    /// Move on to the next frame's batch, dropping anything left unread.
    fn end_frame(&mut self) {
        self.current = self.frames.pop_front().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_leaves_velocity_alone() {
        let v = Velocity::new(2, -2);
        assert_eq!(apply_input(v, &InputEvent::Quit, 2), v);
    }

    #[test]
    fn scripted_batches_are_per_frame() {
        let mut input = ScriptedInput::new(vec![
            vec![InputEvent::KeyDown(Direction::Up)],
            vec![],
            vec![InputEvent::KeyUp(Direction::Up), InputEvent::Quit],
        ]);
        assert_eq!(input.poll().unwrap(), Some(InputEvent::KeyDown(Direction::Up)));
        assert_eq!(input.poll().unwrap(), None);
        input.end_frame();
        assert_eq!(input.poll().unwrap(), None);
        input.end_frame();
        assert_eq!(input.poll().unwrap(), Some(InputEvent::KeyUp(Direction::Up)));
        assert_eq!(input.poll().unwrap(), Some(InputEvent::Quit));
        assert!(input.is_exhausted());
    }
}
