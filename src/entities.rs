//! All game entity types — pure data, no logic.

use crate::geometry::Rect;

// ── Playfield & sizes ─────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 1280;
pub const SCREEN_HEIGHT: i32 = 720;

/// Player and enemy share the same square footprint.
pub const RECT_WIDTH: i32 = 50;
pub const RECT_HEIGHT: i32 = 50;

pub const COLLECTABLE_SIZE: i32 = 20;

/// Pixels per frame along each axis.
pub const DEFAULT_SPEED: i32 = 2;

/// Points awarded per collectable picked up.
pub const SCORE_PER_PICKUP: u32 = 10;

/// Where the five collectables sit at the start of every session.
pub const SEED_POSITIONS: [(i32, i32); 5] =
    [(100, 100), (200, 150), (300, 200), (400, 250), (500, 300)];

// ── Session status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Every collectable has been picked up.
    Won,
    /// The player touched the enemy.
    Lost,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Running)
    }
}

// ── Movers ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Velocity {
    pub vx: i32,
    pub vy: i32,
}

impl Velocity {
    pub const fn new(vx: i32, vy: i32) -> Self {
        Self { vx, vy }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub vel: Velocity,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, RECT_WIDTH, RECT_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub vel: Velocity,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, RECT_WIDTH, RECT_HEIGHT)
    }
}

// ── Collectables ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collectable {
    pub x: i32,
    pub y: i32,
}

impl Collectable {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, COLLECTABLE_SIZE, COLLECTABLE_SIZE)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one frame of the simulation needs.  Cloneable so the update
/// functions in `compute` can hand back a new copy without touching the old.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    pub enemy: Enemy,
    /// Live collectables; order carries no meaning.
    pub collectables: Vec<Collectable>,
    pub score: u32,
    pub state: SessionState,
    /// Number of simulated frames so far.
    pub frame: u64,
    pub speed: i32,
    pub width: i32,
    pub height: i32,
}
