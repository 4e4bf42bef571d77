//! Per-frame simulation step
//!
//! Input events are queued by the platform layer and applied here at the
//! frame boundary, so the simulation always sees the latest pointer state
//! rather than a timing-sensitive event interleaving. The step itself is:
//! spawn, update mosquitoes, update splats, clean up, decay the swing flag.

use glam::Vec2;

use super::difficulty;
use super::mosquito::Mosquito;
use super::state::GameState;
use super::swing::resolve_swing;
use crate::consts::*;

/// One queued input event.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Pointer sample on the event clock (`at_ms` from the performance timer)
    PointerMove { pos: Vec2, at_ms: f64 },
    /// Swing request at a surface position
    Swing { pos: Vec2 },
    /// Start button: begin a round, or unpause a paused one
    Start,
    /// Space / pause button
    TogglePause,
    /// R key / restart button
    Restart,
}

/// Events drained once per frame, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take the queued events, leaving the queue empty for the next frame.
    pub fn take(&mut self) -> FrameInput {
        FrameInput {
            events: std::mem::take(&mut self.events),
        }
    }
}

/// Per-frame results the adapters care about (audio trigger, HUD refresh,
/// best-score persistence).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOutcome {
    pub swings_accepted: u32,
    pub hits: u32,
    pub best_score_improved: bool,
}

/// Advance the game by one frame of `dt` seconds (clamped to 0.05 s).
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> TickOutcome {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut outcome = TickOutcome::default();

    for event in &input.events {
        match *event {
            InputEvent::PointerMove { pos, at_ms } => state.pointer.apply_move(pos, at_ms),
            InputEvent::Swing { pos } => {
                if !state.running {
                    state.reset_round();
                    state.running = true;
                }
                if state.paused {
                    continue;
                }
                state.pointer.warp(pos);
                let swing = resolve_swing(state, pos);
                if swing.accepted {
                    outcome.swings_accepted += 1;
                    outcome.hits += swing.hits;
                    outcome.best_score_improved |= swing.best_score_improved;
                }
            }
            InputEvent::Start => {
                if !state.running {
                    state.reset_round();
                    state.running = true;
                } else if state.paused {
                    state.paused = false;
                }
            }
            InputEvent::TogglePause => {
                if state.running {
                    state.paused = !state.paused;
                } else {
                    state.reset_round();
                    state.running = true;
                }
            }
            InputEvent::Restart => {
                state.reset_round();
                state.running = true;
                state.paused = false;
            }
        }
    }

    // Pausing freezes the step; the renderer still draws the frozen state
    if !state.running || state.paused {
        return outcome;
    }

    state.time += dt;

    // Spawn scheduler: accumulate rate-scaled time debt, pay it off one
    // interval per spawn until the target population is met. The interval
    // floor keeps this loop finite for any finite dt.
    state.spawn_accumulator += dt * difficulty::spawn_rate_multiplier(state.score);
    let mut alive = state.alive_count();
    let target = difficulty::target_population(state.score);
    let interval = difficulty::spawn_interval(state.score, alive, target);
    let existing = state.mosquitos.len();
    while state.spawn_accumulator >= interval && alive < target {
        state.spawn_accumulator -= interval;
        let m = Mosquito::spawn(&mut state.rng, state.bounds);
        state.mosquitos.push(m);
        alive += 1;
    }

    // Mosquitoes spawned above start simulating next frame
    let bounds = state.bounds;
    for m in state.mosquitos[..existing].iter_mut() {
        m.update(&mut state.rng, dt, bounds);
    }
    for s in state.splats.iter_mut() {
        s.update(dt, bounds);
    }

    // Cleanup: purge the dead and the dried-out, then hard-trim the splat
    // collection oldest-first
    state.mosquitos.retain(|m| m.alive);
    state.splats.retain(|s| !s.is_expired());
    if state.splats.len() > MAX_SPLATS {
        let excess = state.splats.len() - MAX_SPLATS;
        state.splats.drain(..excess);
    }

    if state.swat.is_swinging && state.time - state.swat.last_swing_at > SWING_DURATION {
        state.swat.is_swinging = false;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::splat::Splat;
    use crate::sim::state::Bounds;

    const DT: f32 = 1.0 / 60.0;

    fn started_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Bounds::new(800.0, 600.0));
        state.reset_round();
        state.running = true;
        state
    }

    fn swing_at(pos: Vec2) -> FrameInput {
        FrameInput {
            events: vec![InputEvent::Swing { pos }],
        }
    }

    #[test]
    fn test_population_converges_to_floor() {
        // Ten simulated seconds at score 0, no swings: population settles at
        // the floor of 6 and never exceeds it
        let mut state = started_state(1);
        let idle = FrameInput::default();
        for _ in 0..600 {
            tick(&mut state, &idle, DT);
            assert!(state.alive_count() <= 6);
        }
        assert_eq!(state.alive_count(), 6);
    }

    #[test]
    fn test_scheduler_refills_after_kills() {
        let mut state = started_state(2);
        for m in state.mosquitos.iter_mut().take(4) {
            m.kill();
        }
        let idle = FrameInput::default();
        // Deficit pressure drives the interval down; a few seconds is plenty
        for _ in 0..300 {
            tick(&mut state, &idle, DT);
        }
        assert_eq!(state.alive_count(), 6);
    }

    #[test]
    fn test_dead_are_purged_after_cleanup() {
        let mut state = started_state(3);
        let target = state.mosquitos[0].pos;
        let before = state.mosquitos.len();
        let outcome = tick(&mut state, &swing_at(target), DT);
        assert!(outcome.hits >= 1);
        // The cleanup pass in the same tick removed the corpses
        assert!(state.mosquitos.len() < before + outcome.hits as usize);
        assert!(state.mosquitos.iter().all(|m| m.alive));
    }

    #[test]
    fn test_swing_hit_scores_and_splats() {
        let mut state = started_state(4);
        state.mosquitos.clear();
        let target = Vec2::new(400.0, 300.0);
        let mut m = Mosquito::spawn(&mut state.rng, state.bounds);
        m.pos = target;
        state.mosquitos.push(m);

        let outcome = tick(&mut state, &swing_at(target), DT);
        assert_eq!(outcome.swings_accepted, 1);
        assert_eq!(outcome.hits, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.splats.len(), 1);
        assert!((0.0..=1.0).contains(&state.splats[0].strength));
    }

    #[test]
    fn test_swing_miss_changes_nothing() {
        let mut state = started_state(5);
        state.mosquitos.clear();
        let mut m = Mosquito::spawn(&mut state.rng, state.bounds);
        m.pos = Vec2::new(700.0, 500.0);
        state.mosquitos.push(m);

        let outcome = tick(&mut state, &swing_at(Vec2::new(100.0, 100.0)), DT);
        assert_eq!(outcome.hits, 0);
        assert_eq!(state.score, 0);
        assert!(state.splats.is_empty());
    }

    #[test]
    fn test_cooldown_spans_frames() {
        let mut state = started_state(6);
        state.mosquitos.clear();
        for x in [300.0, 500.0] {
            let mut m = Mosquito::spawn(&mut state.rng, state.bounds);
            m.pos = Vec2::new(x, 300.0);
            state.mosquitos.push(m);
        }

        let first = tick(&mut state, &swing_at(Vec2::new(300.0, 300.0)), DT);
        assert_eq!(first.hits, 1);
        // Next frame is ~17 ms later, far inside the 160 ms window
        let second = tick(&mut state, &swing_at(Vec2::new(500.0, 300.0)), DT);
        assert_eq!(second.swings_accepted, 0);
        assert_eq!(state.score, 1);
        // Let the cooldown lapse, then the second target is fair game
        let idle = FrameInput::default();
        for _ in 0..10 {
            tick(&mut state, &idle, DT);
        }
        let third = tick(&mut state, &swing_at(Vec2::new(500.0, 300.0)), DT);
        assert_eq!(third.swings_accepted, 1);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_splat_cap_trims_oldest() {
        let mut state = started_state(7);
        for i in 0..(MAX_SPLATS + 50) {
            let pos = Vec2::new(i as f32, 0.0);
            let splat = Splat::new(&mut state.rng, pos, 20.0, 0.0, 0.3);
            state.splats.push(splat);
        }
        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.splats.len(), MAX_SPLATS);
        // Oldest entries went first: the survivor set is the newest 200
        assert_eq!(state.splats[0].pos.x, 50.0);
    }

    #[test]
    fn test_expired_splats_are_removed() {
        let mut state = started_state(8);
        let splat = Splat::new(&mut state.rng, Vec2::new(10.0, 10.0), 20.0, 0.0, 0.3);
        state.splats.push(splat);
        state.splats[0].age = SPLAT_MAX_AGE + 1.0;
        tick(&mut state, &FrameInput::default(), DT);
        assert!(state.splats.is_empty());
    }

    #[test]
    fn test_swing_flag_decays() {
        let mut state = started_state(9);
        tick(&mut state, &swing_at(Vec2::new(400.0, 300.0)), DT);
        assert!(state.swat.is_swinging);
        let idle = FrameInput::default();
        // 0.12 s window at 60 fps is 8 frames
        for _ in 0..10 {
            tick(&mut state, &idle, DT);
        }
        assert!(!state.swat.is_swinging);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = started_state(10);
        let positions: Vec<Vec2> = state.mosquitos.iter().map(|m| m.pos).collect();
        let mut input = FrameInput::default();
        input.push(InputEvent::TogglePause);
        tick(&mut state, &input, DT);
        assert!(state.paused);

        let time = state.time;
        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.time, time);
        for (m, p) in state.mosquitos.iter().zip(&positions) {
            assert_eq!(m.pos, *p);
        }

        // Swings are swallowed while paused
        let target = state.mosquitos[0].pos;
        let outcome = tick(&mut state, &swing_at(target), DT);
        assert_eq!(outcome.swings_accepted, 0);
    }

    #[test]
    fn test_restart_clears_the_field() {
        let mut state = started_state(11);
        let target = state.mosquitos[0].pos;
        tick(&mut state, &swing_at(target), DT);
        assert!(state.score >= 1);

        let mut input = FrameInput::default();
        input.push(InputEvent::Restart);
        tick(&mut state, &input, DT);
        assert_eq!(state.score, 0);
        assert!(state.splats.is_empty());
        assert_eq!(state.alive_count(), 6);
    }

    #[test]
    fn test_frame_dt_is_clamped() {
        let mut state = started_state(12);
        tick(&mut state, &FrameInput::default(), 5.0);
        // A five-second stall still only advances one clamped step
        assert!((state.time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        // Same seed and input sequence must reproduce the same world
        let mut a = started_state(99);
        let mut b = started_state(99);
        let script = [
            FrameInput {
                events: vec![InputEvent::PointerMove {
                    pos: Vec2::new(200.0, 200.0),
                    at_ms: 16.0,
                }],
            },
            swing_at(Vec2::new(200.0, 200.0)),
            FrameInput::default(),
            swing_at(Vec2::new(420.0, 310.0)),
            FrameInput::default(),
        ];
        for input in &script {
            for _ in 0..30 {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.mosquitos.len(), b.mosquitos.len());
        assert_eq!(a.splats.len(), b.splats.len());
        for (ma, mb) in a.mosquitos.iter().zip(&b.mosquitos) {
            assert_eq!(ma.pos, mb.pos);
        }
    }

    #[test]
    fn test_spawned_mosquitoes_wait_one_frame() {
        let mut state = started_state(13);
        for m in state.mosquitos.iter_mut() {
            m.kill();
        }
        // Prime enough accumulator debt for an immediate spawn
        state.spawn_accumulator = SPAWN_INTERVAL_MAX;
        tick(&mut state, &FrameInput::default(), DT);
        let fresh: Vec<_> = state
            .mosquitos
            .iter()
            .filter(|m| m.alive)
            .map(|m| m.wing_phase)
            .collect();
        assert!(!fresh.is_empty());
        // Wing phase only advances in update; a spawned-this-frame mosquito
        // has not been stepped yet
        assert!(fresh.iter().all(|&phase| phase == 0.0));
    }
}
