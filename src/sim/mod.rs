//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies (events describe side effects)

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use spawn::Spawner;
pub use state::{
    Bomb, FloatingText, GameEvent, GamePhase, GameState, Gem, Player, PowerUp, PowerUpKind,
    Scrolling,
};
pub use tick::tick;
