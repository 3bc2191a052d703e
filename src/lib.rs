//! Math Drops - A falling-equation arithmetic game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (equations, drops, spawn timing, answers)
//! - `platform`: Collaborator traits and the session that drives them
//! - `renderer`: Teardrop geometry and the Canvas 2D renderer
//! - `audio`: Feedback tones and their Web Audio playback
//! - `settings`: Player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Drop defaults
    pub const DROP_RADIUS: f32 = 30.0;
    /// Pixels per tick at speed multiplier 1.0
    pub const BASE_FALL_SPEED: f32 = 0.5;
    /// Horizontal margin so the teardrop and its text stay on the canvas
    pub const SPAWN_MARGIN: f32 = DROP_RADIUS * 1.5;
    /// Spawn height (above the visible area)
    pub const SPAWN_Y: f32 = -DROP_RADIUS * 1.5;

    /// Difficulty ramp, applied on every correct answer
    pub const SPEED_INCREASE_RATE: f32 = 0.05;
    pub const MAX_SPEED: f32 = 2.5;
    pub const DROP_SPAWN_INTERVAL: u32 = 2500; // ms
    pub const MIN_SPAWN_INTERVAL: u32 = 1000; // ms
    pub const SPAWN_DECREASE_RATE: u32 = 100; // ms

    /// Input lock-out after a wrong answer (ms)
    pub const WRONG_ANSWER_COOLDOWN: f64 = 1500.0;

    /// End conditions
    pub const MAX_CORRECT: u32 = 25;
    pub const MAX_WRONG: u32 = 3;
}
