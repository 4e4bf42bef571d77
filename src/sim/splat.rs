//! Splat decals
//!
//! Each kill leaves one splat. All of its geometry (blot polygon, streaks,
//! specks, drip seeds) is rolled once at construction and kept as immutable
//! descriptors; afterwards only the age and the drip particles change. The
//! renderer maps `age / max_age` onto opacity, wet at 0 and dry at 1.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::*;

/// One curved streak flung out along the impact direction.
#[derive(Debug, Clone, Copy)]
pub struct Streak {
    /// Absolute direction (radians)
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    /// Bend applied to the control point of the quadratic curve
    pub curve: f32,
    /// Shift of the start point along the streak direction
    pub start_offset: f32,
}

/// A small satellite droplet, local to the splat origin.
#[derive(Debug, Clone, Copy)]
pub struct Speck {
    pub offset: Vec2,
    pub radius: f32,
}

/// A falling drip with its own lifetime. Position is in surface space.
#[derive(Debug, Clone, Copy)]
pub struct Drip {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: f32,
    pub max_age: f32,
}

impl Drip {
    /// Fraction of this drip's life remaining, 1 fresh to 0 spent.
    pub fn fade(&self) -> f32 {
        1.0 - (self.age / self.max_age).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Splat {
    pub pos: Vec2,
    /// Base radius of the blot (px)
    pub radius: f32,
    /// Impact direction (radians)
    pub orientation: f32,
    /// Normalized impact intensity in [0, 1]
    pub strength: f32,
    /// Small random rotation applied on top of the orientation when drawn
    pub rotation_jitter: f32,
    /// Reach of the directional smear, derived from strength
    pub smear_length: f32,
    pub smear_width: f32,
    pub age: f32,
    pub max_age: f32,
    /// Closed polygon approximating the organic blot, local to `pos`
    pub blot: Vec<Vec2>,
    pub streaks: Vec<Streak>,
    pub specks: Vec<Speck>,
    pub drips: Vec<Drip>,
}

impl Splat {
    pub fn new<R: Rng>(
        rng: &mut R,
        pos: Vec2,
        radius: f32,
        orientation: f32,
        strength: f32,
    ) -> Self {
        let strength = strength.clamp(0.0, 1.0);
        let smear_length = radius * (1.2 + 2.0 * strength);
        let smear_width = radius * (0.6 + 0.3 * strength);

        // Drips seed just below the impact with a downward-biased velocity
        let drip_count = (2.0 + rng.random_range(0.0..3.0) + strength * 3.0).round() as usize;
        let drips = (0..drip_count)
            .map(|_| {
                let dx = rng.random_range(-radius * 0.4..radius * 0.4);
                Drip {
                    pos: Vec2::new(
                        pos.x + dx,
                        pos.y + radius * 0.55 + rng.random_range(-2.0..4.0),
                    ),
                    vel: Vec2::new(
                        rng.random_range(-10.0..10.0),
                        rng.random_range(10.0..40.0) + strength * 120.0,
                    ),
                    radius: radius * rng.random_range(0.12..0.22),
                    age: 0.0,
                    max_age: 5.0 + rng.random_range(0.0..4.0),
                }
            })
            .collect();

        // Organic base blot: perturbed circle, flattened opposite the impact
        // direction to suggest forward smearing
        let point_count = (16.0f32 + rng.random_range(0.0..8.0)).floor() as usize;
        let back = orientation + PI;
        let flatten = 0.1 + 0.18 * strength;
        let blot = (0..point_count)
            .map(|i| {
                let ang = i as f32 / point_count as f32 * TAU;
                let base = radius * (0.55 + 0.25 * strength);
                let jitter = radius * rng.random_range(-0.18..0.22);
                let r = (base + jitter) * (1.0 - flatten * (ang - back).cos());
                Vec2::new(ang.cos() * r, ang.sin() * r)
            })
            .collect();

        let streak_count = 3 + rng.random_range(0..3usize);
        let streaks = (0..streak_count)
            .map(|_| Streak {
                angle: orientation + rng.random_range(-0.35..0.35),
                length: smear_length * (0.55 + rng.random_range(0.0..0.6)),
                width: radius * (0.16 + 0.22 * rng.random_range(0.0..1.0) * (0.5 + strength)),
                curve: rng.random_range(-0.35..0.35),
                start_offset: rng.random_range(-radius * 0.25..radius * 0.25),
            })
            .collect();

        // Specks scatter in the hemisphere behind the impact
        let speck_count =
            (10.0 + rng.random_range(0.0..12.0) + strength * 8.0).floor() as usize;
        let specks = (0..speck_count)
            .map(|_| {
                let ang = back + rng.random_range(-0.7..0.7) * 0.6;
                let d = radius * (0.5 + rng.random_range(0.0..1.8));
                Speck {
                    offset: Vec2::new(ang.cos() * d, ang.sin() * d * 0.65),
                    radius: radius * (0.05 + rng.random_range(0.0..0.12)),
                }
            })
            .collect();

        Self {
            pos,
            radius,
            orientation,
            strength,
            rotation_jitter: rng.random_range(-0.2..0.2),
            smear_length,
            smear_width,
            age: 0.0,
            max_age: SPLAT_MAX_AGE,
            blot,
            streaks,
            specks,
            drips,
        }
    }

    /// Age the splat and integrate its drips.
    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.age += dt;
        for drip in &mut self.drips {
            if drip.age >= drip.max_age {
                continue;
            }
            drip.vel.y += DRIP_GRAVITY * dt;
            drip.pos += drip.vel * dt;
            drip.vel.x *= 0.995;
            drip.age += dt;
            // Freeze once far below the surface; saves work, nothing more
            if drip.pos.y > bounds.h + DRIP_OFFSCREEN_MARGIN {
                drip.age = drip.max_age;
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }

    /// Fade progress: 0 at impact ("wet"), 1 at expiry ("dry").
    pub fn fade(&self) -> f32 {
        (self.age / self.max_age).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn make_splat(strength: f32) -> Splat {
        let mut rng = Pcg32::seed_from_u64(42);
        Splat::new(&mut rng, Vec2::new(100.0, 100.0), 30.0, 0.3, strength)
    }

    #[test]
    fn test_strength_is_clamped() {
        assert_eq!(make_splat(5.0).strength, 1.0);
        assert_eq!(make_splat(-1.0).strength, 0.0);
    }

    #[test]
    fn test_geometry_counts() {
        for seed in 0..50u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let s = Splat::new(&mut rng, Vec2::ZERO, 25.0, 1.0, 0.5);
            assert!(s.blot.len() >= 16 && s.blot.len() < 24);
            assert!(s.streaks.len() >= 3 && s.streaks.len() <= 5);
            assert!(s.specks.len() >= 10);
            assert!(s.drips.len() >= 2 && s.drips.len() <= 9);
        }
    }

    #[test]
    fn test_stronger_impacts_throw_more_specks() {
        // floor(10 + U(0,12) + 8*strength): disjoint-ish count ranges
        for seed in 0..50u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let weak = Splat::new(&mut rng, Vec2::ZERO, 25.0, 0.0, 0.0);
            let mut rng = Pcg32::seed_from_u64(seed);
            let strong = Splat::new(&mut rng, Vec2::ZERO, 25.0, 0.0, 1.0);
            assert!(weak.specks.len() <= 21);
            assert!(strong.specks.len() >= 18);
        }
    }

    #[test]
    fn test_expiry_threshold() {
        let mut s = make_splat(0.5);
        s.age = SPLAT_MAX_AGE - 0.001;
        assert!(!s.is_expired());
        s.age = SPLAT_MAX_AGE;
        assert!(s.is_expired());
        assert_eq!(s.fade(), 1.0);
    }

    #[test]
    fn test_drips_fall_under_gravity() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut s = make_splat(0.5);
        let before: Vec<f32> = s.drips.iter().map(|d| d.pos.y).collect();
        s.update(0.1, bounds);
        for (drip, y0) in s.drips.iter().zip(before) {
            assert!(drip.pos.y > y0);
            assert!(drip.age > 0.0);
        }
    }

    #[test]
    fn test_drip_freezes_below_cutoff() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut s = make_splat(0.5);
        s.drips[0].pos.y = bounds.h + DRIP_OFFSCREEN_MARGIN + 1.0;
        s.update(0.016, bounds);
        let frozen = s.drips[0];
        assert!(frozen.age >= frozen.max_age);
        let pos = frozen.pos;
        s.update(0.016, bounds);
        assert_eq!(s.drips[0].pos, pos);
    }

    #[test]
    fn test_age_accumulates_past_expiry_without_drip_updates() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut s = make_splat(0.2);
        for _ in 0..700 {
            s.update(0.016, bounds);
        }
        assert!(s.is_expired());
        // Every drip ran out of its own lifetime (max 9 s) well before 11 s
        assert!(s.drips.iter().all(|d| d.age >= d.max_age));
    }
}
