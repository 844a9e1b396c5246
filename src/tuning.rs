//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON override can rebalance a run
//! without touching simulation code. Units are pixels and frames.

use serde::{Deserialize, Serialize};

/// Three vertical spawn lanes: a fixed top offset, the viewport middle and
/// a fixed inset from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    pub top: f32,
    pub bottom_inset: f32,
}

impl LaneSet {
    /// Lane y-coordinates for a viewport of the given height
    pub fn lanes(&self, height: f32) -> [f32; 3] {
        [self.top, height / 2.0, height - self.bottom_inset]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub lift: f32,
    pub player_start_x: f32,
    pub player_size: f32,
    /// Fraction of scroll speed added to x each frame until the cap
    pub forward_drift: f32,
    /// Forward cap as a fraction of viewport width
    pub forward_cap: f32,
    pub max_health: i32,

    // === Scroll ===
    pub base_speed: f32,
    /// Speed gained per frame of PLAY
    pub speed_ramp: f32,
    /// Background moves at this fraction of scroll speed
    pub background_parallax: f32,

    // === Bombs ===
    pub bomb_interval: u32,
    pub bomb_batch_max: u32,
    pub bomb_stagger: f32,
    pub bomb_size: f32,
    pub bomb_damage: i32,
    pub bomb_lanes: LaneSet,

    // === Gems ===
    pub gem_interval: u32,
    pub gem_size: f32,
    pub gem_values: Vec<u32>,
    /// Gems spawn with y in [0, height - inset)
    pub gem_bottom_inset: f32,

    // === Power-ups ===
    pub power_up_interval: u32,
    pub power_up_size: f32,
    pub power_up_lanes: LaneSet,
    pub shield_duration: u32,

    // === Floating text ===
    pub floating_text_life: u32,
    pub floating_text_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            lift: -10.0,
            player_start_x: 100.0,
            player_size: 60.0,
            forward_drift: 0.01,
            forward_cap: 1.0 / 3.0,
            max_health: 50,

            base_speed: 4.0,
            speed_ramp: 0.0008,
            background_parallax: 0.5,

            bomb_interval: 180,
            bomb_batch_max: 4,
            bomb_stagger: 90.0,
            bomb_size: 80.0,
            bomb_damage: 25,
            bomb_lanes: LaneSet {
                top: 60.0,
                bottom_inset: 160.0,
            },

            gem_interval: 360,
            gem_size: 50.0,
            gem_values: vec![10, 15, 20, 25],
            gem_bottom_inset: 120.0,

            power_up_interval: 480,
            power_up_size: 55.0,
            power_up_lanes: LaneSet {
                top: 70.0,
                bottom_inset: 140.0,
            },
            shield_duration: 480,

            floating_text_life: 120,
            floating_text_drift: 0.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Scroll speed after `distance` frames of PLAY. Linear and uncapped.
    #[inline]
    pub fn speed_for_distance(&self, distance: u64) -> f32 {
        self.base_speed + distance as f32 * self.speed_ramp
    }
}
