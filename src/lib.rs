//! Pixel Dash — collect the yellow squares, dodge the blue one.
//!
//! - `geometry`: rectangles and the overlap test
//! - `entities`: plain game data
//! - `input`: key transitions → player velocity
//! - `compute`: enemy wandering, collisions, scoring, per-frame tick
//! - `display`: presentation sink and frame rendering
//! - `session`: the frame loop
//! - `terminal`: crossterm screen and keyboard bindings
//! - `config`, `error`: start-up settings and failures

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod session;
pub mod terminal;

pub use config::GameConfig;
pub use error::InitError;
pub use session::{EndReason, Session, SessionOutcome};
