//! Mosquito entity
//!
//! An autonomous wanderer: fixed forward speed, heading perturbed on a
//! jittered timer, soft bounce off the surface edges. Motion parameters are
//! sampled once at spawn and never reassigned.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Mosquito {
    pub pos: Vec2,
    /// Travel direction (radians)
    pub heading: f32,
    /// Forward speed (px/s), fixed at spawn
    pub speed: f32,
    /// Body radius (px), fixed at spawn
    pub radius: f32,
    pub alive: bool,
    /// Countdown until the next heading perturbation (s)
    jitter_timer: f32,
    /// Wing flap phase (radians), cosmetic only
    pub wing_phase: f32,
    /// Flap rate (flaps/s), fixed at spawn
    wing_flap_hz: f32,
}

impl Mosquito {
    /// Spawn at a uniform in-bounds position with a uniform heading.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        let x_hi = (bounds.w - SPAWN_MARGIN).max(SPAWN_MARGIN);
        let y_hi = (bounds.h - SPAWN_MARGIN).max(SPAWN_MARGIN);
        Self {
            pos: Vec2::new(
                rng.random_range(SPAWN_MARGIN..=x_hi),
                rng.random_range(SPAWN_MARGIN..=y_hi),
            ),
            heading: rng.random_range(0.0..TAU),
            speed: rng.random_range(MOSQUITO_SPEED.0..MOSQUITO_SPEED.1),
            radius: rng.random_range(MOSQUITO_RADIUS.0..MOSQUITO_RADIUS.1),
            alive: true,
            jitter_timer: rng.random_range(JITTER_INITIAL.0..JITTER_INITIAL.1),
            wing_phase: 0.0,
            wing_flap_hz: rng.random_range(MOSQUITO_FLAP_HZ.0..MOSQUITO_FLAP_HZ.1),
        }
    }

    /// Advance one frame: jitter the heading, move, bounce, flap.
    /// No-op when dead.
    pub fn update<R: Rng>(&mut self, rng: &mut R, dt: f32, bounds: Bounds) {
        if !self.alive {
            return;
        }

        self.jitter_timer -= dt;
        if self.jitter_timer <= 0.0 {
            self.jitter_timer = rng.random_range(JITTER_INTERVAL.0..JITTER_INTERVAL.1);
            let turn = rng.random_range(-FRAC_PI_2..FRAC_PI_2);
            self.heading += turn * JITTER_BLEND;
        }

        self.pos += Vec2::from_angle(self.heading) * self.speed * dt;

        // Soft bounce: clamp to the edge and mirror the heading, one axis at
        // a time (both can fire in a corner)
        let pad = self.radius + BOUNDS_PAD;
        if self.pos.x < pad {
            self.pos.x = pad;
            self.heading = PI - self.heading;
        } else if self.pos.x > bounds.w - pad {
            self.pos.x = bounds.w - pad;
            self.heading = PI - self.heading;
        }
        if self.pos.y < pad {
            self.pos.y = pad;
            self.heading = -self.heading;
        } else if self.pos.y > bounds.h - pad {
            self.pos.y = bounds.h - pad;
            self.heading = -self.heading;
        }

        self.wing_phase += dt * self.wing_flap_hz * TAU;
    }

    /// Mark dead. Safe to call on an already-dead mosquito.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
