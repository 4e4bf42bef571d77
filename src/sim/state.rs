//! Simulation context
//!
//! The explicit state threaded by reference through the scheduler, the swing
//! resolver, and the frame tick. No hidden globals: everything the game
//! mutates lives here, including the seeded RNG, so a run is reproducible
//! from its seed and input sequence.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::mosquito::Mosquito;
use super::splat::Splat;
use super::swing::{Pointer, Swat};
use crate::consts::*;

/// Simulation surface size, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for logging/reproduction
    pub seed: u64,
    pub rng: Pcg32,
    pub running: bool,
    pub paused: bool,
    /// Hit counter for the current round
    pub score: u32,
    /// Best score across rounds; persisted externally
    pub best_score: u32,
    pub mosquitos: Vec<Mosquito>,
    pub splats: Vec<Splat>,
    /// Time debt toward the next spawn (s, rate-scaled)
    pub spawn_accumulator: f32,
    pub pointer: Pointer,
    pub swat: Swat,
    pub bounds: Bounds,
    /// Simulation clock: seconds accumulated while running and unpaused
    pub time: f32,
}

impl GameState {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            running: false,
            paused: false,
            score: 0,
            best_score: 0,
            mosquitos: Vec::new(),
            splats: Vec::new(),
            spawn_accumulator: 0.0,
            pointer: Pointer::default(),
            swat: Swat::default(),
            bounds,
            time: 0.0,
        }
    }

    /// Start a fresh round: zero score, cleared field, minimum population
    /// spawned immediately.
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.mosquitos.clear();
        self.splats.clear();
        self.spawn_accumulator = 0.0;
        for _ in 0..MIN_POPULATION {
            let m = Mosquito::spawn(&mut self.rng, self.bounds);
            self.mosquitos.push(m);
        }
        log::info!("round reset, {} mosquitoes spawned", MIN_POPULATION);
    }

    pub fn alive_count(&self) -> usize {
        self.mosquitos.iter().filter(|m| m.alive).count()
    }

    /// Track a surface resize. Entities re-clamp on their next update.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(5, Bounds::new(800.0, 600.0));
        assert!(!state.running);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert!(state.mosquitos.is_empty());
        assert!(state.splats.is_empty());
    }

    #[test]
    fn test_reset_round_spawns_floor_population() {
        let mut state = GameState::new(5, Bounds::new(800.0, 600.0));
        state.score = 17;
        state.reset_round();
        assert_eq!(state.score, 0);
        assert_eq!(state.alive_count(), MIN_POPULATION);
        assert_eq!(state.spawn_accumulator, 0.0);
    }

    #[test]
    fn test_same_seed_spawns_identically() {
        let mut a = GameState::new(99, Bounds::new(800.0, 600.0));
        let mut b = GameState::new(99, Bounds::new(800.0, 600.0));
        a.reset_round();
        b.reset_round();
        for (ma, mb) in a.mosquitos.iter().zip(&b.mosquitos) {
            assert_eq!(ma.pos, mb.pos);
            assert_eq!(ma.heading, mb.heading);
        }
    }
}
