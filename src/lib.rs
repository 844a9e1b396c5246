//! Sky Dash - a side-scrolling tap-to-fly arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `shop`: Persistent currency, face unlocks and equip
//! - `renderer`: Scene building and 2D canvas drawing
//! - `platform`: Browser/native platform abstraction (key-value storage)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use shop::{Profile, ShopError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of unlockable faces
    pub const SKIN_COUNT: usize = 9;
    /// Face prices in gems, indexed by zero-based face slot
    pub const PRICES: [u32; SKIN_COUNT] = [1000, 700, 600, 550, 450, 0, 350, 250, 150];
    /// Zero-based slot that is always owned
    pub const FREE_SKIN_INDEX: usize = 5;
    /// Equipped face on a fresh profile (one-based)
    pub const DEFAULT_FACE: u8 = FREE_SKIN_INDEX as u8 + 1;

    /// LocalStorage keys
    pub const GEMS_KEY: &str = "gems";
    pub const UNLOCK_KEY: &str = "unlock";
    pub const FACE_KEY: &str = "face";
    pub const SETTINGS_KEY: &str = "sky_dash_settings";

    /// "Not enough gems" popup duration (ms)
    pub const POPUP_MS: i32 = 1500;

    /// HUD health bar geometry
    pub const HEALTH_BAR_POS: (f32, f32) = (20.0, 20.0);
    pub const HEALTH_BAR_SIZE: (f32, f32) = (240.0, 22.0);
    /// HUD gem icon size and offsets from the right edge
    pub const GEM_ICON_SIZE: f32 = 60.0;
    pub const GEM_ICON_RIGHT_INSET: f32 = 150.0;
    pub const GEM_COUNT_RIGHT_INSET: f32 = 80.0;
}
