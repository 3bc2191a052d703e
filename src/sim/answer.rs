//! Answer submission and the correct/wrong transitions
//!
//! A submission clears every drop carrying the typed value. Duplicate answers
//! can be on screen at the same time, so one answer may clear several drops;
//! it still counts as a single correct answer.

use super::state::{GameEvent, GameOutcome, GamePhase, GameState, WrongCause};
use crate::consts::*;

/// Why a submission was dropped without effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotStarted,
    Cooldown,
    GameOver,
    NotANumber,
}

/// Result of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Ignored(IgnoreReason),
    Correct { cleared: usize },
    Wrong,
}

/// Parse player input the way a browser `parseInt` without a radix does:
/// skip leading whitespace, accept an optional sign, then read leading digits.
/// A `0x`/`0X` prefix switches to hexadecimal. Trailing garbage is ignored;
/// no digits at all yields `None`.
pub fn parse_answer(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].chars().fold(0i64, |acc, c| {
        let digit = c.to_digit(radix).map_or(0, i64::from);
        acc.saturating_mul(i64::from(radix)).saturating_add(digit)
    });
    let value = if negative { -magnitude } else { magnitude };
    // Out-of-range input can never match a drop; saturate instead of failing
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Evaluate a submission at time `now`
pub fn submit(state: &mut GameState, raw: &str, now: f64) -> AnswerOutcome {
    match state.phase {
        GamePhase::Running => {}
        GamePhase::NotStarted => return AnswerOutcome::Ignored(IgnoreReason::NotStarted),
        GamePhase::Cooldown => return AnswerOutcome::Ignored(IgnoreReason::Cooldown),
        GamePhase::GameOver(_) => return AnswerOutcome::Ignored(IgnoreReason::GameOver),
    }

    let Some(value) = parse_answer(raw) else {
        return AnswerOutcome::Ignored(IgnoreReason::NotANumber);
    };

    let before = state.drops.len();
    state.drops.retain(|d| d.answer != value);
    let cleared = before - state.drops.len();

    if cleared > 0 {
        log::debug!("Answer {} cleared {} drop(s)", value, cleared);
        handle_correct(state, cleared);
        AnswerOutcome::Correct { cleared }
    } else {
        log::debug!("Answer {} matched nothing", value);
        handle_wrong(state, now, WrongCause::NoMatch { value });
        AnswerOutcome::Wrong
    }
}

/// Correct-answer event: count it and ramp difficulty
pub(crate) fn handle_correct(state: &mut GameState, cleared: usize) {
    state.correct_count += 1;
    state.speed_multiplier = (state.speed_multiplier + SPEED_INCREASE_RATE).min(MAX_SPEED);
    state.spawn_interval_ms = state
        .spawn_interval_ms
        .saturating_sub(SPAWN_DECREASE_RATE)
        .max(MIN_SPAWN_INTERVAL);
    state.push_event(GameEvent::Correct { cleared });

    if state.correct_count >= MAX_CORRECT {
        end_game(state, GameOutcome::Won);
    }
}

/// Wrong-answer event: count it, clear the field and lock input
pub(crate) fn handle_wrong(state: &mut GameState, now: f64, cause: WrongCause) {
    state.wrong_count += 1;
    state.drops.clear();
    state.phase = GamePhase::Cooldown;
    state.cooldown_end_ms = now + WRONG_ANSWER_COOLDOWN;
    state.push_event(GameEvent::Wrong { cause });

    if state.wrong_count >= MAX_WRONG {
        end_game(state, GameOutcome::Lost);
    }
}

fn end_game(state: &mut GameState, outcome: GameOutcome) {
    state.phase = GamePhase::GameOver(outcome);
    state.push_event(GameEvent::GameOver { outcome });
    log::info!(
        "Game over ({:?}): {} correct, {} wrong",
        outcome,
        state.correct_count,
        state.wrong_count
    );
}
