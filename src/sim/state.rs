//! Game state and core simulation types
//!
//! One `GameState` lives for the whole browser session; `restart` puts it back
//! to its initial values instead of building a new one.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::drop::WaterDrop;
use crate::consts::*;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Intro screen, waiting for explicit start
    NotStarted,
    /// Drops spawn and fall, answers accepted
    Running,
    /// Lock-out after a wrong answer: no drops, no spawns, no input
    Cooldown,
    /// Terminal until restart
    GameOver(GameOutcome),
}

/// Why a wrong-answer event happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrongCause {
    /// Submitted value matched no drop
    NoMatch { value: i32 },
    /// At least one drop fell past the bottom edge
    MissedDrop,
}

/// Things the front end reacts to (sound, HUD, input box)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    DropSpawned { answer: i32 },
    /// A submission cleared `cleared` drops (counts as one correct answer)
    Correct { cleared: usize },
    Wrong { cause: WrongCause },
    CooldownEnded,
    GameOver { outcome: GameOutcome },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Active drops in spawn order
    pub drops: Vec<WaterDrop>,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Fall speed scale, grows with every correct answer
    pub speed_multiplier: f32,
    /// Minimum time between spawns, shrinks with every correct answer
    pub spawn_interval_ms: u32,
    /// Only meaningful during `GamePhase::Cooldown`
    pub cooldown_end_ms: f64,
    pub last_spawn_ms: f64,
    /// Timestamp of the most recent tick
    pub last_frame_ms: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a game state around an explicit RNG (used by tests to script spawns)
    pub fn with_rng(seed: u64, rng: Pcg32) -> Self {
        Self {
            seed,
            rng,
            phase: GamePhase::NotStarted,
            drops: Vec::new(),
            correct_count: 0,
            wrong_count: 0,
            speed_multiplier: 1.0,
            spawn_interval_ms: DROP_SPAWN_INTERVAL,
            cooldown_end_ms: 0.0,
            last_spawn_ms: 0.0,
            last_frame_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Leave the intro screen. `now` becomes the spawn baseline.
    /// Returns false if the game was already started.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        self.last_spawn_ms = now;
        self.events.push(GameEvent::Started);
        log::info!("Game started at {:.0}ms (seed {})", now, self.seed);
        true
    }

    /// Reset every field to its initial value, keeping the last frame time
    pub fn restart(&mut self, seed: u64) {
        let last_frame_ms = self.last_frame_ms;
        *self = Self::new(seed);
        self.last_frame_ms = last_frame_ms;
        log::info!("Game reset with seed {}", seed);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn in_cooldown(&self) -> bool {
        self.phase == GamePhase::Cooldown
    }

    /// Outcome once the game has ended
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events pending since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
