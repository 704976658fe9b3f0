//! Terminal I/O: acquiring and releasing the screen, and reading keys.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use crate::error::InitError;
use crate::input::{Direction, InputError, InputEvent, InputSource};

/// Smallest grid that still shows every entity as at least one cell.
pub const MIN_COLS: u16 = 32;
pub const MIN_ROWS: u16 = 12;

// ── Screen lifetime ───────────────────────────────────────────────────────────

/// Owns the terminal modes a session switches on.
///
/// `release` undoes only what was actually acquired, so it is safe to call
/// after a failed `acquire`, more than once, or not at all (`Drop` calls it).
pub struct TerminalContext<W: Write> {
    out: W,
    raw_mode: bool,
    alternate_screen: bool,
    cursor_hidden: bool,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalContext<W> {
    /// Switch the terminal into game mode.  On failure everything acquired
    /// so far is released before the error is returned.
    pub fn acquire(out: W) -> Result<Self, InitError> {
        let mut ctx = Self {
            out,
            raw_mode: false,
            alternate_screen: false,
            cursor_hidden: false,
            keyboard_enhanced: false,
        };
        ctx.enter()?;
        Ok(ctx)
    }

    fn enter(&mut self) -> Result<(), InitError> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(InitError::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }

        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.alternate_screen = true;
        self.out.execute(cursor::Hide)?;
        self.cursor_hidden = true;
        self.out.execute(terminal::SetTitle("Pixel Dash"))?;

        // Request key-release events.  Terminals without the kitty protocol
        // ignore this, and keys then stay pressed until the opposite key.
        self.keyboard_enhanced = self
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        if !self.keyboard_enhanced {
            log::warn!("terminal does not report key releases");
        }
        Ok(())
    }

    /// Current grid size in cells.
    pub fn size(&self) -> std::io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn release(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
            self.keyboard_enhanced = false;
        }
        if self.cursor_hidden {
            let _ = self.out.execute(cursor::Show);
            self.cursor_hidden = false;
        }
        if self.alternate_screen {
            let _ = self.out.execute(terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
        }
    }
}

impl<W: Write> Drop for TerminalContext<W> {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

/// Map a terminal event to a game input, if it is one.
///
/// Arrows and WASD steer; Esc, `q` and Ctrl-C quit.  Key repeats count as
/// presses.
pub fn translate(ev: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = ev
    else {
        return None;
    };

    let quit = match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    };
    if quit {
        return match kind {
            KeyEventKind::Release => None,
            _ => Some(InputEvent::Quit),
        };
    }

    let dir = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,
        _ => return None,
    };
    Some(match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyDown(dir),
        KeyEventKind::Release => InputEvent::KeyUp(dir),
    })
}

/// Polls crossterm without blocking.  Non-game events are skipped, except
/// resizes, which are remembered for the frame loop.
#[derive(Debug, Default)]
pub struct TerminalInput {
    resized: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn accept(&mut self, ev: &Event) -> Option<InputEvent> {
        if let Event::Resize(cols, rows) = *ev {
            self.resized = Some((cols, rows));
        }
        translate(ev)
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Option<InputEvent>, InputError> {
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Some(input) = self.accept(&ev) {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(
            translate(&key(KeyCode::Up, KeyEventKind::Press)),
            Some(InputEvent::KeyDown(Direction::Up))
        );
        assert_eq!(
            translate(&key(KeyCode::Char('d'), KeyEventKind::Repeat)),
            Some(InputEvent::KeyDown(Direction::Right))
        );
        assert_eq!(
            translate(&key(KeyCode::Left, KeyEventKind::Release)),
            Some(InputEvent::KeyUp(Direction::Left))
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            translate(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(InputEvent::Quit)
        );
        assert_eq!(translate(&key(KeyCode::Char('q'), KeyEventKind::Release)), None);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c), Some(InputEvent::Quit));
        assert_eq!(translate(&key(KeyCode::Char('c'), KeyEventKind::Press)), None);
    }

    #[test]
    fn other_events_ignored() {
        assert_eq!(translate(&Event::Resize(80, 24)), None);
        assert_eq!(translate(&key(KeyCode::Char(' '), KeyEventKind::Press)), None);
    }

    #[test]
    fn latest_resize_is_kept_until_taken() {
        let mut input = TerminalInput::new();
        assert_eq!(input.take_resize(), None);
        assert_eq!(input.accept(&Event::Resize(80, 24)), None);
        assert_eq!(input.accept(&Event::Resize(120, 40)), None);
        assert_eq!(
            input.accept(&key(KeyCode::Up, KeyEventKind::Press)),
            Some(InputEvent::KeyDown(Direction::Up))
        );
        assert_eq!(input.take_resize(), Some((120, 40)));
        assert_eq!(input.take_resize(), None);
    }

    fn context(out: &mut Vec<u8>) -> TerminalContext<&mut Vec<u8>> {
        TerminalContext {
            out,
            raw_mode: false,
            alternate_screen: false,
            cursor_hidden: false,
            keyboard_enhanced: false,
        }
    }

    #[test]
    fn releasing_nothing_writes_nothing() {
        let mut out = Vec::new();
        {
            let mut ctx = context(&mut out);
            ctx.release();
            ctx.release();
        }
        assert!(out.is_empty());
    }

    #[test]
    fn each_restore_is_written_once() {
        let mut expected = Vec::new();
        expected.execute(cursor::Show).unwrap();
        expected.execute(terminal::LeaveAlternateScreen).unwrap();

        let mut out = Vec::new();
        {
            let mut ctx = context(&mut out);
            ctx.cursor_hidden = true;
            ctx.alternate_screen = true;
            ctx.release();
            ctx.release();
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn drop_releases_what_was_acquired() {
        let mut expected = Vec::new();
        expected.execute(cursor::Show).unwrap();

        let mut out = Vec::new();
        {
            let mut ctx = context(&mut out);
            ctx.cursor_hidden = true;
        }
        assert_eq!(out, expected);
    }
}
