//! Platform abstraction layer
//!
//! The simulation never touches the page. Everything it needs from the outside
//! world is one of the collaborator traits below, and `Session` turns simulation
//! events into calls on them:
//! - Drawing (`Renderer`)
//! - Sound cues (`AudioCue`)
//! - The answer text box (`InputSurface`)
//! - HUD counters (`StatsDisplay`)
//! - Intro and game over panels (`GameOverSurface`)

use crate::sim::{self, AnswerOutcome, GameEvent, GameOutcome, GameState, WaterDrop};

/// Draws the current drops, once per frame after the state update
pub trait Renderer {
    fn render(&mut self, drops: &[WaterDrop]);
}

/// Fire-and-forget answer feedback
pub trait AudioCue {
    fn play_correct(&mut self);
    fn play_wrong(&mut self);
}

/// The text box the player types answers into
pub trait InputSurface {
    fn set_input_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
    fn clear_input(&mut self);
}

/// HUD counters
pub trait StatsDisplay {
    fn show_stats(&mut self, correct: u32, wrong: u32, speed_multiplier: f32);
}

/// Intro and end-of-game panels
pub trait GameOverSurface {
    fn show_game_over(&mut self, won: bool, correct: u32, wrong: u32);
    fn hide_game_over(&mut self);
    fn set_intro_visible(&mut self, visible: bool);
}

/// Everything a session needs from its host page
pub trait Frontend: Renderer + AudioCue + InputSurface + StatsDisplay + GameOverSurface {}

impl<T> Frontend for T where T: Renderer + AudioCue + InputSurface + StatsDisplay + GameOverSurface {}

/// HUD speed label, e.g. "1.2x"
pub fn format_speed(speed_multiplier: f32) -> String {
    format!("{:.1}x", speed_multiplier)
}

/// Title and message for the game over panel
pub fn game_over_text(won: bool, correct: u32, wrong: u32) -> (&'static str, String) {
    if won {
        (
            "🎉 Victory! 🎉",
            format!("Congratulations! You answered {} questions correctly!", correct),
        )
    } else {
        (
            "💧 Game Over 💧",
            format!(
                "You got {} correct answers before {} mistakes.",
                correct, wrong
            ),
        )
    }
}

/// A game session bound to a front end
pub struct Session<F: Frontend> {
    state: GameState,
    frontend: F,
}

impl<F: Frontend> Session<F> {
    pub fn new(mut frontend: F, seed: u64) -> Self {
        let state = GameState::new(seed);
        frontend.show_stats(state.correct_count, state.wrong_count, state.speed_multiplier);
        frontend.set_input_enabled(false);
        Self { state, frontend }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Leave the intro screen, using the last frame time as the spawn baseline
    pub fn start(&mut self) -> bool {
        let now = self.state.last_frame_ms;
        let started = self.state.start(now);
        self.dispatch_events();
        started
    }

    /// Run one frame: simulate, react to events, draw
    pub fn frame(&mut self, now: f64) {
        sim::tick(&mut self.state, now);
        self.dispatch_events();
        self.frontend.render(&self.state.drops);
    }

    /// Submit typed text, evaluated at the last frame time
    pub fn submit(&mut self, raw: &str) -> AnswerOutcome {
        let now = self.state.last_frame_ms;
        let outcome = sim::submit(&mut self.state, raw, now);
        self.dispatch_events();
        if !matches!(outcome, AnswerOutcome::Ignored(_)) {
            self.frontend.clear_input();
        }
        outcome
    }

    /// Back to the intro screen with fresh state
    pub fn restart(&mut self, seed: u64) {
        self.state.restart(seed);
        self.push_stats();
        self.frontend.hide_game_over();
        self.frontend.set_intro_visible(true);
        self.frontend.clear_input();
        self.frontend.set_input_enabled(false);
    }

    /// Whether a stray click should return focus to the input box
    pub fn wants_focus(&self) -> bool {
        !self.state.is_over() && !self.state.in_cooldown()
    }

    fn push_stats(&mut self) {
        self.frontend.show_stats(
            self.state.correct_count,
            self.state.wrong_count,
            self.state.speed_multiplier,
        );
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Started => {
                    self.frontend.set_intro_visible(false);
                    self.frontend.set_input_enabled(true);
                    self.frontend.focus_input();
                }
                GameEvent::DropSpawned { .. } => {}
                GameEvent::Correct { .. } => {
                    self.push_stats();
                    self.frontend.play_correct();
                }
                GameEvent::Wrong { .. } => {
                    self.push_stats();
                    self.frontend.play_wrong();
                    self.frontend.set_input_enabled(false);
                    self.frontend.clear_input();
                }
                GameEvent::CooldownEnded => {
                    self.frontend.set_input_enabled(true);
                    self.frontend.focus_input();
                }
                GameEvent::GameOver { outcome } => {
                    self.frontend.show_game_over(
                        outcome == GameOutcome::Won,
                        self.state.correct_count,
                        self.state.wrong_count,
                    );
                }
            }
        }
    }
}
