//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps are passed in, never read from the platform
//! - Seeded RNG only
//! - Drops keep spawn order
//! - No rendering or platform dependencies

pub mod answer;
pub mod drop;
pub mod equation;
pub mod state;
pub mod tick;

pub use answer::{AnswerOutcome, IgnoreReason, parse_answer, submit};
pub use drop::WaterDrop;
pub use equation::{Equation, Operation, generate};
pub use state::{GameEvent, GameOutcome, GamePhase, GameState, WrongCause};
pub use tick::{spawn_drop, tick};
