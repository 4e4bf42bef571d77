//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only (a `Pcg32` owned by the game state)
//! - Frame steps driven by an externally supplied `dt`
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod mosquito;
pub mod splat;
pub mod state;
pub mod swing;
pub mod tick;

pub use mosquito::Mosquito;
pub use splat::{Drip, Speck, Splat, Streak};
pub use state::{Bounds, GameState};
pub use swing::{Pointer, Swat, SwingOutcome, resolve_swing};
pub use tick::{FrameInput, InputEvent, TickOutcome, tick};
