//! Per-frame simulation tick
//!
//! Core game loop step, driven by the frame timestamp in milliseconds.
//! Drops move a fixed distance per tick (scaled by the speed multiplier),
//! not per elapsed millisecond.

use glam::Vec2;
use rand::Rng;

use super::answer::handle_wrong;
use super::drop::WaterDrop;
use super::equation::generate;
use super::state::{GameEvent, GamePhase, GameState, WrongCause};
use crate::consts::*;

/// Advance the game state by one frame at time `now`
pub fn tick(state: &mut GameState, now: f64) {
    state.last_frame_ms = now;

    match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver(_) => return,
        GamePhase::Cooldown => {
            if now < state.cooldown_end_ms {
                return;
            }
            state.phase = GamePhase::Running;
            state.push_event(GameEvent::CooldownEnded);
            log::debug!("Cooldown ended at {:.0}ms", now);
        }
        GamePhase::Running => {}
    }

    // At most one spawn per tick, missed intervals are not made up
    if now - state.last_spawn_ms > f64::from(state.spawn_interval_ms) {
        spawn_drop(state);
        state.last_spawn_ms = now;
    }

    let speed = state.speed_multiplier;
    for drop in &mut state.drops {
        drop.advance(speed);
    }

    // Any number of escaped drops is a single penalty
    if state.drops.iter().any(WaterDrop::is_off_screen) {
        handle_wrong(state, now, WrongCause::MissedDrop);
    }
}

/// Generate an equation and append it as a new drop above the canvas
pub fn spawn_drop(state: &mut GameState) {
    let rng = state.rng_mut();
    let equation = generate(&mut *rng);
    let x = SPAWN_MARGIN + rng.random::<f32>() * (CANVAS_WIDTH - SPAWN_MARGIN * 2.0);

    log::debug!("Spawned '{}' at x={:.1}", equation, x);
    let answer = equation.answer;
    state.drops.push(WaterDrop::new(Vec2::new(x, SPAWN_Y), equation));
    state.push_event(GameEvent::DropSpawned { answer });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::answer::submit;
    use crate::sim::state::GameOutcome;
    use proptest::prelude::*;

    const FRAME: f64 = 1000.0 / 60.0;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start(0.0);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_before_start_only_records_time() {
        let mut state = GameState::new(3);
        tick(&mut state, 10_000.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.last_frame_ms, 10_000.0);
        assert!(state.drops.is_empty());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = started(3);
        tick(&mut state, 2500.0);
        assert!(state.drops.is_empty(), "interval must be strictly exceeded");
        tick(&mut state, 2501.0);
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.last_spawn_ms, 2501.0);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::DropSpawned { .. }]
        ));
    }

    #[test]
    fn test_no_catch_up_spawns() {
        let mut state = started(3);
        // Ten intervals late still gives exactly one drop
        tick(&mut state, 25_000.0);
        assert_eq!(state.drops.len(), 1);
        tick(&mut state, 25_001.0);
        assert_eq!(state.drops.len(), 1);
    }

    #[test]
    fn test_spawned_drop_starts_above_canvas_and_moves() {
        let mut state = started(3);
        tick(&mut state, 3000.0);
        let d = &state.drops[0];
        // Spawned and advanced once in the same tick
        assert!((d.pos.y - (SPAWN_Y + BASE_FALL_SPEED)).abs() < 1e-5);
        tick(&mut state, 3000.0 + FRAME);
        assert!((state.drops[0].pos.y - (SPAWN_Y + 2.0 * BASE_FALL_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn test_speed_multiplier_applies_to_fall() {
        let mut state = started(3);
        state.speed_multiplier = 2.0;
        tick(&mut state, 3000.0);
        assert!((state.drops[0].pos.y - (SPAWN_Y + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_cooldown_blocks_spawning_until_expiry() {
        let mut state = started(3);
        submit(&mut state, "1000", 3000.0);
        assert!(state.in_cooldown());
        state.drain_events();

        // Well past the spawn interval, but still cooling down
        tick(&mut state, 4499.0);
        assert!(state.drops.is_empty());
        assert!(state.in_cooldown());
        assert!(state.events().is_empty());

        // Expiry is inclusive and resumes within the same tick
        tick(&mut state, 4500.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drops.len(), 1);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::CooldownEnded);
        assert!(matches!(events[1], GameEvent::DropSpawned { .. }));
    }

    #[test]
    fn test_multiple_off_screen_drops_one_penalty() {
        let mut state = started(3);
        tick(&mut state, 3000.0);
        spawn_drop(&mut state);
        spawn_drop(&mut state);
        for d in &mut state.drops {
            d.pos.y = CANVAS_HEIGHT + d.radius;
        }
        state.drain_events();

        tick(&mut state, 3001.0);
        assert_eq!(state.wrong_count, 1);
        assert!(state.drops.is_empty());
        assert!(state.in_cooldown());
        assert_eq!(state.cooldown_end_ms, 3001.0 + WRONG_ANSWER_COOLDOWN);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Wrong { cause: WrongCause::MissedDrop }]
        );
    }

    #[test]
    fn test_unanswered_drop_eventually_escapes() {
        let mut state = started(5);
        let mut now = 0.0;
        while state.wrong_count == 0 {
            now += FRAME;
            tick(&mut state, now);
            assert!(now < 120_000.0, "drop never left the screen");
        }
        // (730 + 45) / 0.5 ticks after the first spawn at ~2.5s
        assert!(now > 2500.0 + 1500.0 * FRAME);
    }

    #[test]
    fn test_three_misses_end_the_game() {
        let mut state = started(9);
        let mut now = 0.0;
        while !state.is_over() {
            now += FRAME;
            tick(&mut state, now);
            assert!(now < 600_000.0, "game never ended");
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Lost));
        assert_eq!(state.wrong_count, MAX_WRONG);

        // Terminal: ticks no longer change anything
        let drops = state.drops.len();
        tick(&mut state, now + 10_000.0);
        assert_eq!(state.drops.len(), drops);
        assert!(state.is_over());
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);
        for i in 1..2000 {
            let now = i as f64 * FRAME;
            tick(&mut a, now);
            tick(&mut b, now);
        }
        assert_eq!(a.drops, b.drops);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #[test]
        fn prop_spawn_stays_inside_canvas(seed in any::<u64>()) {
            let mut state = started(seed);
            for _ in 0..32 {
                spawn_drop(&mut state);
            }
            for d in &state.drops {
                prop_assert!(d.pos.x >= SPAWN_MARGIN);
                prop_assert!(d.pos.x <= CANVAS_WIDTH - SPAWN_MARGIN);
                prop_assert_eq!(d.pos.y, SPAWN_Y);
            }
        }

        #[test]
        fn prop_cooldown_never_holds_drops(seed in any::<u64>(), answers in proptest::collection::vec(0i32..150, 1..20)) {
            let mut state = started(seed);
            let mut now = 0.0;
            for raw in answers {
                for _ in 0..90 {
                    now += FRAME;
                    tick(&mut state, now);
                    if state.in_cooldown() {
                        prop_assert!(state.drops.is_empty());
                    }
                }
                submit(&mut state, &raw.to_string(), now);
                if state.in_cooldown() {
                    prop_assert!(state.drops.is_empty());
                }
            }
        }
    }
}
