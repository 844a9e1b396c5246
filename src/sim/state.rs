//! Game state and core simulation types
//!
//! Everything a frame update reads or writes lives in [`GameState`]; the
//! persistent [`Profile`] rides along so gem pickups credit it directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawn::Spawner;
use crate::platform::{KeyValueStore, StorageError};
use crate::shop::{Profile, ShopError};
use crate::tuning::Tuning;

/// Top-level screen/state of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title menu (initial)
    Menu,
    /// Active gameplay
    Playing,
    /// Face shop panel
    Shop,
    /// Round ended
    GameOver,
}

/// Things that happened during a command or frame, for audio and UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    /// Unshielded bomb hit; health after damage
    BombHit { health: i32 },
    GemCollected { value: u32 },
    ShieldCollected,
    HealthCollected,
    GameOver,
}

/// Shared interface of everything that scrolls in from the right
pub trait Scrolling {
    fn bounds(&self) -> Rect;
    /// Move left by `dx` pixels
    fn scroll(&mut self, dx: f32);
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/frame, positive is down)
    pub vel_y: f32,
    /// Cosmetic face (one-based)
    pub face: u8,
}

impl Player {
    pub fn new(tuning: &Tuning, viewport: Vec2, face: u8) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, viewport.y / 2.0),
            size: Vec2::splat(tuning.player_size),
            vel_y: 0.0,
            face,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bomb {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Gem {
    pub pos: Vec2,
    pub size: f32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Health,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
}

impl Scrolling for Bomb {
    fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

impl Scrolling for Gem {
    fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

impl Scrolling for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// Cosmetic "+N" text that drifts up and fades out
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    /// Frames left before removal
    pub life: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Drawing surface size (width, height)
    pub viewport: Vec2,
    pub phase: GamePhase,
    /// Set once a round has ended; the next start begins a fresh round
    pub round_over: bool,
    /// Frames spent in PLAY this round
    pub distance: u64,
    /// Current scroll speed (px/frame)
    pub speed: f32,
    /// Background scroll offset, in (-width, 0]
    pub background_x: f32,
    pub player: Player,
    pub health: i32,
    /// Frames of shield left (0 = unshielded)
    pub shield_ticks: u32,
    pub bombs: Vec<Bomb>,
    pub gems: Vec<Gem>,
    pub power_ups: Vec<PowerUp>,
    pub floating_texts: Vec<FloatingText>,
    pub bomb_spawner: Spawner,
    pub gem_spawner: Spawner,
    pub power_up_spawner: Spawner,
    /// Persistent currency/unlocks/equipped face
    pub profile: Profile,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu
    pub fn new(seed: u64, viewport: Vec2, profile: Profile, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: GamePhase::Menu,
            round_over: false,
            distance: 0,
            speed: tuning.base_speed,
            background_x: 0.0,
            player: Player::new(&tuning, viewport, profile.face),
            health: tuning.max_health,
            shield_ticks: 0,
            bombs: Vec::new(),
            gems: Vec::new(),
            power_ups: Vec::new(),
            floating_texts: Vec::new(),
            bomb_spawner: Spawner::new(tuning.bomb_interval),
            gem_spawner: Spawner::new(tuning.gem_interval),
            power_up_spawner: Spawner::new(tuning.power_up_interval),
            profile,
            tuning,
            events: Vec::new(),
        }
    }

    /// Reset all round state back to a fresh menu. The profile, tuning,
    /// viewport and RNG stream carry over.
    pub fn restart(&mut self) {
        let tuning = &self.tuning;
        self.phase = GamePhase::Menu;
        self.round_over = false;
        self.distance = 0;
        self.speed = tuning.base_speed;
        self.background_x = 0.0;
        self.player = Player::new(tuning, self.viewport, self.profile.face);
        self.health = tuning.max_health;
        self.shield_ticks = 0;
        self.bombs.clear();
        self.gems.clear();
        self.power_ups.clear();
        self.floating_texts.clear();
        self.bomb_spawner.reset();
        self.gem_spawner.reset();
        self.power_up_spawner.reset();
        self.events.clear();
        log::info!("Round reset");
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Update the drawing surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    // === Commands ===

    /// MENU -> PLAY. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        if self.round_over {
            self.restart();
        }
        self.phase = GamePhase::Playing;
        log::info!("Round started");
        true
    }

    /// MENU/OVER -> SHOP. Returns whether the phase changed.
    pub fn open_shop(&mut self) -> bool {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.phase = GamePhase::Shop;
                log::info!("Shop opened");
                true
            }
            _ => false,
        }
    }

    /// SHOP -> MENU. Returns whether the phase changed.
    pub fn close_shop(&mut self) -> bool {
        if self.phase != GamePhase::Shop {
            return false;
        }
        self.phase = GamePhase::Menu;
        log::info!("Shop closed");
        true
    }

    /// Apply the upward impulse. Only valid while playing; overwrites the
    /// current velocity rather than adding to it.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.vel_y = self.tuning.lift;
        self.events.push(GameEvent::Jump);
        true
    }

    /// PLAY -> OVER. No-op in any other phase, so ending an already ended
    /// round emits nothing.
    pub fn end_round(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.round_over = true;
        self.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} frames (health {}, {} gems banked)",
            self.distance,
            self.health,
            self.profile.gems
        );
    }

    /// Buy a face through the shop
    pub fn buy(&mut self, index: usize, store: &mut impl KeyValueStore) -> Result<(), ShopError> {
        self.profile.buy(index, store)
    }

    /// Equip a face and show it on the player
    pub fn equip(&mut self, index: usize, store: &mut impl KeyValueStore) -> Result<(), ShopError> {
        self.profile.equip(index, store)?;
        self.player.face = self.profile.face;
        Ok(())
    }

    // === Events ===

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write back the gem balance if any pending event changed it. Call
    /// before draining.
    pub fn persist_events(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        if self
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GemCollected { .. }))
        {
            self.profile.save_gems(store)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    fn new_state() -> GameState {
        GameState::new(7, Vec2::new(1280.0, 720.0), Profile::default(), Tuning::default())
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.health, 50);
        assert_eq!(state.player.pos, Vec2::new(100.0, 360.0));
        assert_eq!(state.player.size, Vec2::new(60.0, 60.0));
        assert_eq!(state.player.face, 6);
        assert!((state.speed - 4.0).abs() < 1e-6);
        assert!(!state.is_shielded());
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = new_state();

        // Shop round trip from the menu
        assert!(state.open_shop());
        assert_eq!(state.phase, GamePhase::Shop);
        assert!(!state.start());
        assert!(state.close_shop());
        assert_eq!(state.phase, GamePhase::Menu);

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.open_shop());
        assert!(!state.close_shop());

        state.end_round();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.start());
        assert!(state.open_shop());
        assert!(state.close_shop());
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_end_round_is_idempotent() {
        let mut state = new_state();
        state.start();
        state.end_round();
        state.end_round();
        state.end_round();
        let over_events = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::GameOver)
            .count();
        assert_eq!(over_events, 1);
    }

    #[test]
    fn test_end_round_outside_play_is_ignored() {
        let mut state = new_state();
        state.end_round();
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut state = new_state();
        assert!(!state.jump());
        assert_eq!(state.player.vel_y, 0.0);

        state.start();
        state.player.vel_y = 7.5;
        assert!(state.jump());
        assert_eq!(state.player.vel_y, -10.0);
        // No stacking
        assert!(state.jump());
        assert_eq!(state.player.vel_y, -10.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jump, GameEvent::Jump]);
    }

    #[test]
    fn test_start_after_game_over_begins_fresh_round() {
        let mut state = new_state();
        state.profile.gems = 40;
        state.start();
        state.health = 0;
        state.distance = 900;
        state.bombs.push(Bomb {
            pos: Vec2::new(500.0, 60.0),
            size: 80.0,
        });
        state.end_round();

        state.open_shop();
        state.close_shop();
        assert!(state.start());
        assert_eq!(state.health, 50);
        assert_eq!(state.distance, 0);
        assert!(state.bombs.is_empty());
        assert!(!state.round_over);
        // Persistent data survives
        assert_eq!(state.profile.gems, 40);
    }

    #[test]
    fn test_equip_updates_player_face() {
        let mut store = MemoryStore::new();
        let mut state = new_state();
        state.profile.gems = 250;
        state.buy(7, &mut store).unwrap();
        state.equip(7, &mut store).unwrap();
        assert_eq!(state.player.face, 8);
        assert_eq!(state.profile.gems, 0);
    }

    #[test]
    fn test_scrolling_moves_left() {
        let mut gem = Gem {
            pos: Vec2::new(300.0, 40.0),
            size: 50.0,
            value: 15,
        };
        gem.scroll(4.5);
        assert_eq!(gem.bounds(), Rect::new(295.5, 40.0, 50.0, 50.0));
    }
}
