//! Timer-driven entity spawning
//!
//! Each entity kind has its own frame counter. When a counter passes its
//! interval it resets and new entities appear just past the right edge.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Bomb, GameState, Gem, PowerUp, PowerUpKind};

/// Frame counter that fires once every `interval + 1` frames
#[derive(Debug, Clone)]
pub struct Spawner {
    timer: u32,
    interval: u32,
}

impl Spawner {
    pub fn new(interval: u32) -> Self {
        Self { timer: 0, interval }
    }

    /// Count one frame. Returns true (and resets) once the counter exceeds
    /// the interval.
    pub fn advance(&mut self) -> bool {
        self.timer += 1;
        if self.timer > self.interval {
            self.timer = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }

    #[cfg(test)]
    fn timer(&self) -> u32 {
        self.timer
    }
}

fn pick_lane(rng: &mut impl Rng, lanes: &[f32; 3]) -> f32 {
    lanes[rng.random_range(0..lanes.len())]
}

/// Spawn a batch of bombs, each in its own random lane and staggered
/// horizontally. Returns the batch size.
pub fn spawn_bombs(state: &mut GameState) -> usize {
    let tuning = &state.tuning;
    let lanes = tuning.bomb_lanes.lanes(state.viewport.y);
    let count = state.rng.random_range(1..=tuning.bomb_batch_max.max(1));

    for i in 0..count {
        let y = pick_lane(&mut state.rng, &lanes);
        state.bombs.push(Bomb {
            pos: Vec2::new(state.viewport.x + i as f32 * tuning.bomb_stagger, y),
            size: tuning.bomb_size,
        });
    }

    log::debug!("Spawned {} bombs", count);
    count as usize
}

/// Spawn one gem at a random height with a random value
pub fn spawn_gem(state: &mut GameState) {
    let tuning = &state.tuning;
    let y = state.rng.random::<f32>() * (state.viewport.y - tuning.gem_bottom_inset);
    let value = tuning
        .gem_values
        .choose(&mut state.rng)
        .copied()
        .unwrap_or_default();

    state.gems.push(Gem {
        pos: Vec2::new(state.viewport.x, y),
        size: tuning.gem_size,
        value,
    });
    log::debug!("Spawned gem worth {}", value);
}

/// Spawn one power-up in a random lane; shield or health on a coin flip
pub fn spawn_power_up(state: &mut GameState) {
    let tuning = &state.tuning;
    let lanes = tuning.power_up_lanes.lanes(state.viewport.y);
    let y = pick_lane(&mut state.rng, &lanes);
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::Shield
    } else {
        PowerUpKind::Health
    };

    state.power_ups.push(PowerUp {
        pos: Vec2::new(state.viewport.x, y),
        size: tuning.power_up_size,
        kind,
    });
    log::debug!("Spawned {:?} power-up", kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::Profile;
    use crate::tuning::Tuning;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Vec2::new(1280.0, 720.0), Profile::default(), Tuning::default())
    }

    #[test]
    fn test_spawner_fires_after_interval() {
        let mut spawner = Spawner::new(180);
        for _ in 0..180 {
            assert!(!spawner.advance());
        }
        assert!(spawner.advance());
        assert_eq!(spawner.timer(), 0);
        // And again a full period later
        let fired = (0..181).filter(|_| spawner.advance()).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_bomb_batches() {
        for seed in 0..50 {
            let mut state = new_state(seed);
            let count = spawn_bombs(&mut state);
            assert!((1..=4).contains(&count));
            assert_eq!(state.bombs.len(), count);

            for (i, bomb) in state.bombs.iter().enumerate() {
                assert_eq!(bomb.pos.x, 1280.0 + i as f32 * 90.0);
                assert!([60.0, 360.0, 560.0].contains(&bomb.pos.y));
                assert_eq!(bomb.size, 80.0);
            }
        }
    }

    #[test]
    fn test_bomb_batch_sizes_cover_range() {
        let mut state = new_state(3);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[spawn_bombs(&mut state)] = true;
        }
        assert_eq!(seen, [false, true, true, true, true]);
    }

    #[test]
    fn test_gem_spawn() {
        let mut state = new_state(11);
        for _ in 0..100 {
            spawn_gem(&mut state);
        }
        for gem in &state.gems {
            assert_eq!(gem.pos.x, 1280.0);
            assert!(gem.pos.y >= 0.0 && gem.pos.y < 600.0);
            assert!([10, 15, 20, 25].contains(&gem.value));
        }
    }

    #[test]
    fn test_power_up_spawn() {
        let mut state = new_state(5);
        for _ in 0..100 {
            spawn_power_up(&mut state);
        }
        for p in &state.power_ups {
            assert_eq!(p.pos.x, 1280.0);
            assert!([70.0, 360.0, 580.0].contains(&p.pos.y));
        }
        let shields = state
            .power_ups
            .iter()
            .filter(|p| p.kind == PowerUpKind::Shield)
            .count();
        assert!(shields > 0 && shields < 100);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = new_state(42);
        let mut b = new_state(42);
        for _ in 0..10 {
            spawn_bombs(&mut a);
            spawn_bombs(&mut b);
        }
        let ys_a: Vec<f32> = a.bombs.iter().map(|b| b.pos.y).collect();
        let ys_b: Vec<f32> = b.bombs.iter().map(|b| b.pos.y).collect();
        assert_eq!(ys_a, ys_b);
    }
}
