//! Difficulty curves
//!
//! Pure functions of the current score. Nothing here holds state; the spawn
//! scheduler and swing resolver evaluate these every frame, so pacing tracks
//! the score continuously instead of stepping through discrete levels.

use crate::consts::*;

/// Swatter hit radius for a given score.
///
/// Linear + square-root + log blend: early rounds grow gently, late rounds
/// keep growing without exploding. The renderer draws the same radius, so
/// the hit area and the visible boundary always agree.
pub fn swat_radius(score: u32) -> f32 {
    let s = score as f32;
    SWAT_BASE_RADIUS + 0.22 * s + 2.2 * s.sqrt() + 4.0 * (s + 2.0).log2()
}

/// Desired number of simultaneously alive mosquitoes, floor of 6.
pub fn target_population(score: u32) -> usize {
    let s = score as f32;
    (MIN_POPULATION as f32 + 0.8 * s + 2.0 * s.sqrt()).round() as usize
}

/// Seconds of accumulator debt required per spawn.
///
/// The base interval shrinks linearly over the first 80 points; a population
/// deficit shaves off up to another 85% so bursts of kills are refilled
/// quickly. Clamped so the spawn loop stays finite and refills never feel
/// instant.
pub fn spawn_interval(score: u32, alive: usize, target: usize) -> f32 {
    let s = score as f32;
    let base = 1.2 - 1.1 * (s / 80.0).clamp(0.0, 1.0);
    let deficit = target.saturating_sub(alive) as f32 / target.max(1) as f32;
    let pressure = deficit.clamp(0.0, 1.0);
    (base * (1.0 - 0.85 * pressure)).clamp(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX)
}

/// How fast the spawn accumulator fills relative to wall time, capped at 9x.
pub fn spawn_rate_multiplier(score: u32) -> f32 {
    1.0 + (score as f32 / 50.0).min(8.0)
}
