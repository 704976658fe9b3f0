//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, a `WanderSource`) and returns a brand-new
//! value.  Side effects are limited to the injected random source.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{
    Collectable, Enemy, GameState, Player, SessionState, Velocity, DEFAULT_SPEED, RECT_HEIGHT,
    RECT_WIDTH, SCORE_PER_PICKUP, SCREEN_HEIGHT, SCREEN_WIDTH, SEED_POSITIONS,
};
use crate::input::{apply_input, InputEvent};

/// Chance, in percent per frame, that the enemy picks a new heading.
pub const DEFAULT_DIRECTION_CHANGE_PERCENT: u32 = 2;

// ── Outcomes reported to the frame loop ──────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A collectable was picked up; `score` is the total after the pickup.
    Collected { at: Collectable, score: u32 },
    Won { score: u32 },
    Lost { score: u32 },
}

// ── Randomness seam ──────────────────────────────────────────────────────────

/// Source of the enemy's random heading changes.
///
/// Production code wraps a seeded `rand` RNG in `RandomWander`; tests can
/// substitute anything that answers these two questions.
pub trait WanderSource {
    /// Whether this frame's roll (uniform over 0..100) lands under `percent`.
    fn roll_direction_change(&mut self, percent: u32) -> bool;

    /// A fresh heading, each component drawn independently from {-1, 0, 1}.
    fn next_direction(&mut self) -> (i32, i32);
}

/// `WanderSource` backed by any `rand::Rng`.
#[derive(Clone, Debug)]
pub struct RandomWander<R> {
    rng: R,
}

impl<R: Rng> RandomWander<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomWander<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the wall clock; see `time_seed`.
    pub fn from_time() -> Self {
        Self::from_seed(time_seed())
    }
}

impl<R: Rng> WanderSource for RandomWander<R> {
    fn roll_direction_change(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0..100) < percent
    }

    fn next_direction(&mut self) -> (i32, i32) {
        (self.rng.gen_range(-1..=1), self.rng.gen_range(-1..=1))
    }
}

/// Seed derived from the wall clock, so consecutive runs differ.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: player centred and still, enemy in the upper-left
/// quadrant heading down-right, all five collectables in place.
pub fn init_state(speed: i32) -> GameState {
    GameState {
        player: Player {
            x: (SCREEN_WIDTH - RECT_WIDTH) / 2,
            y: (SCREEN_HEIGHT - RECT_HEIGHT) / 2,
            vel: Velocity::default(),
        },
        enemy: Enemy {
            x: SCREEN_WIDTH / 4,
            y: SCREEN_HEIGHT / 4,
            vel: Velocity::new(speed, speed),
        },
        collectables: SEED_POSITIONS
            .iter()
            .map(|&(x, y)| Collectable { x, y })
            .collect(),
        score: 0,
        state: SessionState::Running,
        frame: 0,
        speed,
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    }
}

impl Default for GameState {
    fn default() -> Self {
        init_state(DEFAULT_SPEED)
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fold one key transition into the player's velocity.
pub fn steer_player(state: &GameState, event: &InputEvent) -> GameState {
    GameState {
        player: Player {
            vel: apply_input(state.player.vel, event, state.speed),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Advance the player by its velocity.  There is no clamp: the player may
/// leave the visible playfield.
pub fn move_player(player: &Player) -> Player {
    Player {
        x: player.x + player.vel.vx,
        y: player.y + player.vel.vy,
        ..player.clone()
    }
}

// ── Enemy controller ─────────────────────────────────────────────────────────

/// One frame of enemy motion: maybe pick a new heading, move, then flip any
/// axis whose box now pokes outside the playfield.
///
/// The flip is checked against the already-moved box, so the enemy can sit
/// up to `speed` pixels past an edge for one frame before heading back.
pub fn step_enemy(
    enemy: &Enemy,
    width: i32,
    height: i32,
    speed: i32,
    change_percent: u32,
    wander: &mut impl WanderSource,
) -> Enemy {
    let mut vel = enemy.vel;
    if wander.roll_direction_change(change_percent) {
        let (dx, dy) = wander.next_direction();
        vel = Velocity::new(dx * speed, dy * speed);
        debug!("enemy heading changed to ({}, {})", vel.vx, vel.vy);
    }

    let mut moved = Enemy {
        x: enemy.x + vel.vx,
        y: enemy.y + vel.vy,
        vel,
    };

    let bounds = moved.bounds();
    if bounds.outside_horizontally(width) {
        moved.vel.vx = -moved.vel.vx;
        debug!("enemy reflected horizontally at x={}", moved.x);
    }
    if bounds.outside_vertically(height) {
        moved.vel.vy = -moved.vel.vy;
        debug!("enemy reflected vertically at y={}", moved.y);
    }
    moved
}

// ── Collision & scoring ──────────────────────────────────────────────────────

/// Remove every collectable the player overlaps, score them, then decide
/// whether the session ended.
///
/// The win check runs before the enemy check, so picking up the last
/// collectable while touching the enemy ends as `Lost`.
pub fn resolve_collisions(state: &GameState) -> (GameState, Vec<GameEvent>) {
    let player_box = state.player.bounds();

    let (taken, collectables): (Vec<Collectable>, Vec<Collectable>) = state
        .collectables
        .iter()
        .copied()
        .partition(|c| player_box.intersects(&c.bounds()));

    let mut events = Vec::with_capacity(taken.len() + 1);
    let mut score = state.score;
    for at in taken {
        score += SCORE_PER_PICKUP;
        info!("collected item at ({}, {}), score {}", at.x, at.y, score);
        events.push(GameEvent::Collected { at, score });
    }

    let mut status = state.state;
    if collectables.is_empty() {
        status = SessionState::Won;
    }
    if player_box.intersects(&state.enemy.bounds()) {
        status = SessionState::Lost;
    }

    match status {
        SessionState::Won => events.push(GameEvent::Won { score }),
        SessionState::Lost => events.push(GameEvent::Lost { score }),
        SessionState::Running => {}
    }

    (
        GameState {
            collectables,
            score,
            state: status,
            ..state.clone()
        },
        events,
    )
}

// ── Per-frame tick (nearly pure — randomness is injected) ───────────────────

/// Advance the simulation by one frame.  Input must already have been folded
/// into the player's velocity (see `steer_player`).
///
/// A finished session is returned unchanged with no events.
pub fn tick(
    state: &GameState,
    wander: &mut impl WanderSource,
    change_percent: u32,
) -> (GameState, Vec<GameEvent>) {
    if state.state.is_terminal() {
        return (state.clone(), Vec::new());
    }

    let moved = GameState {
        player: move_player(&state.player),
        enemy: step_enemy(
            &state.enemy,
            state.width,
            state.height,
            state.speed,
            change_percent,
            wander,
        ),
        frame: state.frame + 1,
        ..state.clone()
    };

    resolve_collisions(&moved)
}
