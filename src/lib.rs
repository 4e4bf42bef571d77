//! Komari - a mosquito-swatting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, swings, splats)
//! - `renderer`: Canvas2D rendering pass
//! - `audio`: Procedural slap sound via Web Audio
//! - `settings`: Persisted swatter preferences
//! - `best_score`: Persisted best score scalar

pub mod audio;
pub mod best_score;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SwatterShape};

/// Game configuration constants
pub mod consts {
    /// Upper clamp on per-frame elapsed time to avoid runaway steps after stalls
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Minimum gap between accepted swings (seconds)
    pub const SWING_COOLDOWN: f32 = 0.16;
    /// Window over which the visual swing boost decays (seconds)
    pub const SWING_DURATION: f32 = 0.12;
    /// Transient cursor radius boost at the moment of a swing
    pub const SWING_BOOST_PX: f32 = 12.0;

    /// Swatter radius at score 0; difficulty growth is added on top
    pub const SWAT_BASE_RADIUS: f32 = 36.0;
    /// Pointer speed above which a kill smears along the swipe direction
    pub const SWIPE_SPEED_THRESHOLD: f32 = 220.0;
    /// Pointer speed mapped to full splat strength
    pub const STRENGTH_FULL_SPEED: f32 = 1400.0;
    /// Exponential smoothing factor for pointer velocity samples
    pub const POINTER_SMOOTHING: f32 = 0.4;

    /// Mosquito forward speed range (px/s)
    pub const MOSQUITO_SPEED: (f32, f32) = (60.0, 160.0);
    /// Mosquito body radius range (px)
    pub const MOSQUITO_RADIUS: (f32, f32) = (9.0, 12.0);
    /// Wing flap rate range (flaps per second)
    pub const MOSQUITO_FLAP_HZ: (f32, f32) = (18.0, 28.0);
    /// First jitter delay range (seconds)
    pub const JITTER_INITIAL: (f32, f32) = (0.15, 0.8);
    /// Jitter delay range after each turn (seconds)
    pub const JITTER_INTERVAL: (f32, f32) = (0.2, 0.9);
    /// Fraction of the sampled turn actually applied to the heading
    pub const JITTER_BLEND: f32 = 0.35;
    /// Inset from the surface edge when spawning
    pub const SPAWN_MARGIN: f32 = 24.0;
    /// Extra padding beyond the body radius for boundary reflection
    pub const BOUNDS_PAD: f32 = 4.0;

    /// Alive-population floor regardless of score
    pub const MIN_POPULATION: usize = 6;
    /// Spawn interval clamp (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.04;
    pub const SPAWN_INTERVAL_MAX: f32 = 1.2;

    /// Splat base radius as a multiple of the mosquito body radius
    pub const SPLAT_RADIUS_SCALE: (f32, f32) = (2.6, 3.6);
    /// Splat lifetime (seconds)
    pub const SPLAT_MAX_AGE: f32 = 8.0;
    /// Hard cap on retained splats (oldest evicted first)
    pub const MAX_SPLATS: usize = 200;
    /// Downward acceleration applied to drip particles (px/s²)
    pub const DRIP_GRAVITY: f32 = 600.0;
    /// Distance below the surface at which drips stop updating
    pub const DRIP_OFFSCREEN_MARGIN: f32 = 200.0;
}
