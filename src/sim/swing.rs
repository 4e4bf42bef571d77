//! Swing resolution and pointer tracking
//!
//! A swing is one accepted attempt to kill everything inside the swatter
//! radius, gated by a cooldown on the simulation clock. The pointer keeps an
//! exponentially smoothed velocity estimate so fast swipes smear their splats
//! along the travel direction while stationary taps burst outward.

use glam::Vec2;
use rand::Rng;

use super::difficulty;
use super::splat::Splat;
use super::state::GameState;
use crate::consts::*;

/// Latest pointer position plus a smoothed velocity estimate.
///
/// Samples arrive on the event clock, not the frame clock; only the folded
/// result is visible to the simulation.
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    pub pos: Vec2,
    pub vel: Vec2,
    last_sample_ms: Option<f64>,
}

impl Pointer {
    /// Fold one movement sample into the velocity estimate.
    /// Non-finite coordinates are dropped silently.
    pub fn apply_move(&mut self, pos: Vec2, at_ms: f64) {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        if let Some(last) = self.last_sample_ms {
            let dt = (((at_ms - last) / 1000.0).max(1e-6)) as f32;
            let instantaneous = (pos - self.pos) / dt;
            self.vel = instantaneous * POINTER_SMOOTHING + self.vel * (1.0 - POINTER_SMOOTHING);
        }
        self.pos = pos;
        self.last_sample_ms = Some(at_ms);
    }

    /// Jump to a position without folding a velocity sample; pointer-down
    /// lands exactly where the event says while the smoothed velocity keeps
    /// its history.
    pub fn warp(&mut self, pos: Vec2) {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        self.pos = pos;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Swing gate and animation state.
#[derive(Debug, Clone)]
pub struct Swat {
    /// Set while the transient cursor boost is decaying
    pub is_swinging: bool,
    /// Sim-clock time of the last accepted swing (s)
    pub last_swing_at: f32,
}

impl Default for Swat {
    fn default() -> Self {
        Self {
            is_swinging: false,
            last_swing_at: f32::NEG_INFINITY,
        }
    }
}

/// What a swing request produced; adapters use this to drive audio and HUD.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingOutcome {
    /// False when the cooldown (or a bad coordinate) rejected the request
    pub accepted: bool,
    pub hits: u32,
    pub best_score_improved: bool,
}

/// Resolve one swing request at `pos`.
///
/// Every alive mosquito within the score-derived radius dies and leaves a
/// splat. All hits in a swing resolve against the same radius and position;
/// no mosquito can affect another's test.
pub fn resolve_swing(state: &mut GameState, pos: Vec2) -> SwingOutcome {
    let mut outcome = SwingOutcome::default();
    if !pos.x.is_finite() || !pos.y.is_finite() {
        return outcome;
    }
    if state.time - state.swat.last_swing_at < SWING_COOLDOWN {
        return outcome;
    }
    state.swat.last_swing_at = state.time;
    state.swat.is_swinging = true;
    outcome.accepted = true;

    // Same formula the renderer draws, so the hit area matches the boundary
    let r = difficulty::swat_radius(state.score);
    let r2 = r * r;

    let speed = state.pointer.speed();
    let swipe_orientation = state.pointer.vel.y.atan2(state.pointer.vel.x);
    let strength = (speed / STRENGTH_FULL_SPEED).clamp(0.0, 1.0);

    for m in state.mosquitos.iter_mut() {
        if !m.alive || m.pos.distance_squared(pos) > r2 {
            continue;
        }
        m.kill();
        // Fast swipes smear along the pointer's travel; taps burst outward
        // from the contact point
        let orientation = if speed > SWIPE_SPEED_THRESHOLD {
            swipe_orientation
        } else {
            (m.pos.y - pos.y).atan2(m.pos.x - pos.x)
        };
        let radius = m.radius
            * state
                .rng
                .random_range(SPLAT_RADIUS_SCALE.0..SPLAT_RADIUS_SCALE.1);
        let splat = Splat::new(&mut state.rng, m.pos, radius, orientation, strength);
        state.splats.push(splat);
        outcome.hits += 1;
    }

    if outcome.hits > 0 {
        state.score += outcome.hits;
        if state.score > state.best_score {
            state.best_score = state.score;
            outcome.best_score_improved = true;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Bounds;

    fn test_state() -> GameState {
        let mut state = GameState::new(1234, Bounds::new(800.0, 600.0));
        state.running = true;
        state
    }

    /// Park one alive mosquito at `pos` and return its index.
    fn plant_mosquito(state: &mut GameState, pos: Vec2) -> usize {
        let mut m = crate::sim::Mosquito::spawn(&mut state.rng, state.bounds);
        m.pos = pos;
        state.mosquitos.push(m);
        state.mosquitos.len() - 1
    }

    #[test]
    fn test_direct_hit_kills_and_splats() {
        let mut state = test_state();
        let target = Vec2::new(400.0, 300.0);
        plant_mosquito(&mut state, target);

        let outcome = resolve_swing(&mut state, target);
        assert!(outcome.accepted);
        assert_eq!(outcome.hits, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.splats.len(), 1);
        let splat = &state.splats[0];
        assert!((0.0..=1.0).contains(&splat.strength));
        assert_eq!(splat.pos, target);
    }

    #[test]
    fn test_empty_swing_changes_nothing() {
        let mut state = test_state();
        plant_mosquito(&mut state, Vec2::new(700.0, 500.0));

        let outcome = resolve_swing(&mut state, Vec2::new(100.0, 100.0));
        assert!(outcome.accepted);
        assert_eq!(outcome.hits, 0);
        assert_eq!(state.score, 0);
        assert!(state.splats.is_empty());
        assert!(state.mosquitos[0].alive);
    }

    #[test]
    fn test_cooldown_rejects_second_swing() {
        let mut state = test_state();
        let target = Vec2::new(400.0, 300.0);
        plant_mosquito(&mut state, target);
        plant_mosquito(&mut state, Vec2::new(600.0, 300.0));

        assert!(resolve_swing(&mut state, target).accepted);
        assert_eq!(state.score, 1);

        // 100 ms later: still inside the 160 ms window
        state.time += 0.1;
        let second = resolve_swing(&mut state, Vec2::new(600.0, 300.0));
        assert!(!second.accepted);
        assert_eq!(second.hits, 0);
        assert_eq!(state.score, 1);
        assert!(state.mosquitos[1].alive);

        // Past the window the gate opens again
        state.time += 0.07;
        assert!(resolve_swing(&mut state, Vec2::new(600.0, 300.0)).accepted);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_dead_mosquitoes_are_ignored() {
        let mut state = test_state();
        let target = Vec2::new(400.0, 300.0);
        let idx = plant_mosquito(&mut state, target);
        state.mosquitos[idx].kill();

        let outcome = resolve_swing(&mut state, target);
        assert!(outcome.accepted);
        assert_eq!(outcome.hits, 0);
        assert!(state.splats.is_empty());
    }

    #[test]
    fn test_swipe_orientation_follows_pointer_velocity() {
        let mut state = test_state();
        let target = Vec2::new(400.0, 300.0);
        plant_mosquito(&mut state, target);
        // Fast rightward swipe, well over the 220 px/s threshold
        state.pointer.vel = Vec2::new(800.0, 0.0);
        state.pointer.pos = target;

        resolve_swing(&mut state, target);
        let splat = &state.splats[0];
        assert!(splat.orientation.abs() < 1e-4);
        assert!(splat.strength > 0.0);
    }

    #[test]
    fn test_tap_orientation_points_outward() {
        let mut state = test_state();
        // Mosquito directly above the swing point; slow pointer
        let swing_at = Vec2::new(400.0, 300.0);
        plant_mosquito(&mut state, Vec2::new(400.0, 320.0));

        resolve_swing(&mut state, swing_at);
        let splat = &state.splats[0];
        // atan2(+20, 0) = pi/2
        assert!((splat.orientation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(splat.strength, 0.0);
    }

    #[test]
    fn test_nan_swing_is_a_noop() {
        let mut state = test_state();
        plant_mosquito(&mut state, Vec2::new(400.0, 300.0));
        let outcome = resolve_swing(&mut state, Vec2::new(f32::NAN, 300.0));
        assert!(!outcome.accepted);
        assert_eq!(state.score, 0);
        // The gate was not consumed: an immediate valid swing still lands
        assert!(resolve_swing(&mut state, Vec2::new(400.0, 300.0)).accepted);
    }

    #[test]
    fn test_pointer_smoothing_converges() {
        let mut p = Pointer::default();
        p.apply_move(Vec2::new(0.0, 0.0), 0.0);
        // 10 px every 10 ms = 1000 px/s, sustained
        for i in 1..=50 {
            p.apply_move(Vec2::new(i as f32 * 10.0, 0.0), i as f64 * 10.0);
        }
        assert!((p.speed() - 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_pointer_ignores_nan_samples() {
        let mut p = Pointer::default();
        p.apply_move(Vec2::new(5.0, 5.0), 0.0);
        p.apply_move(Vec2::new(f32::NAN, 10.0), 16.0);
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_best_score_updates_on_improvement() {
        let mut state = test_state();
        state.best_score = 1;
        let target = Vec2::new(400.0, 300.0);
        plant_mosquito(&mut state, target);
        plant_mosquito(&mut state, Vec2::new(405.0, 300.0));

        let outcome = resolve_swing(&mut state, target);
        assert_eq!(outcome.hits, 2);
        assert!(outcome.best_score_improved);
        assert_eq!(state.best_score, 2);
    }
}
