//! Per-frame simulation step
//!
//! One call per display refresh. Order within a frame:
//! speed ramp -> background scroll -> (PLAY only) player physics -> bombs ->
//! shield countdown -> gems -> power-ups -> floating text. A frame that ends
//! the round stops at that point.

use super::collision::{Rect, overlaps};
use super::spawn::{spawn_bombs, spawn_gem, spawn_power_up};
use super::state::{FloatingText, GameEvent, GamePhase, GameState, PowerUpKind, Scrolling};

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    if state.phase == GamePhase::Playing {
        state.distance += 1;
        state.speed = state.tuning.speed_for_distance(state.distance);
    }

    scroll_background(state);

    if state.phase != GamePhase::Playing {
        return;
    }

    step_player(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    update_bombs(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    tick_shield(state);
    update_gems(state);
    update_power_ups(state);
    update_floating_texts(state);
}

/// Background scrolls in every phase, at a fraction of the scroll speed
fn scroll_background(state: &mut GameState) {
    state.background_x -= state.speed * state.tuning.background_parallax;
    if state.background_x <= -state.viewport.x {
        state.background_x = 0.0;
    }
}

/// Gravity, forward drift and the viewport bounds check
fn step_player(state: &mut GameState) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    let cap = state.viewport.x * tuning.forward_cap;
    player.pos.x = (player.pos.x + state.speed * tuning.forward_drift).min(cap);

    let bounds = player.bounds();
    if bounds.top() < 0.0 || bounds.bottom() > state.viewport.y {
        log::info!("Player left the screen at y={:.1}", bounds.top());
        state.end_round();
    }
}

/// Scroll every entity left by `speed`, dropping the ones that left the
/// screen and returning the ones that touched the player. Removal order is
/// not preserved.
fn sweep<T: Scrolling>(items: &mut Vec<T>, speed: f32, player: &Rect) -> Vec<T> {
    let mut hits = Vec::new();
    let mut i = 0;
    while i < items.len() {
        items[i].scroll(speed);
        let bounds = items[i].bounds();
        if overlaps(player, &bounds) {
            hits.push(items.swap_remove(i));
        } else if bounds.right() < 0.0 {
            items.swap_remove(i);
        } else {
            i += 1;
        }
    }
    hits
}

fn update_bombs(state: &mut GameState) {
    if state.bomb_spawner.advance() {
        spawn_bombs(state);
    }

    let player = state.player.bounds();
    let hits = sweep(&mut state.bombs, state.speed, &player);
    for _ in hits {
        // Damage stops once the round is over
        if state.phase != GamePhase::Playing {
            break;
        }
        if state.is_shielded() {
            log::debug!("Bomb absorbed by shield");
            continue;
        }
        state.health -= state.tuning.bomb_damage;
        state.push_event(GameEvent::BombHit {
            health: state.health,
        });
        if state.health <= 0 {
            state.end_round();
        }
    }
}

fn tick_shield(state: &mut GameState) {
    if state.shield_ticks > 0 {
        state.shield_ticks -= 1;
        if state.shield_ticks == 0 {
            log::debug!("Shield expired");
        }
    }
}

fn update_gems(state: &mut GameState) {
    if state.gem_spawner.advance() {
        spawn_gem(state);
    }

    let player = state.player.bounds();
    let hits = sweep(&mut state.gems, state.speed, &player);
    for gem in hits {
        state.profile.credit(gem.value);
        state.floating_texts.push(FloatingText {
            pos: gem.pos,
            text: format!("+{}", gem.value),
            life: state.tuning.floating_text_life,
        });
        state.push_event(GameEvent::GemCollected { value: gem.value });
        log::debug!("Gem +{} (balance {})", gem.value, state.profile.gems);
    }
}

fn update_power_ups(state: &mut GameState) {
    if state.power_up_spawner.advance() {
        spawn_power_up(state);
    }

    let player = state.player.bounds();
    let hits = sweep(&mut state.power_ups, state.speed, &player);
    for power_up in hits {
        match power_up.kind {
            PowerUpKind::Shield => {
                state.shield_ticks = state.tuning.shield_duration;
                state.push_event(GameEvent::ShieldCollected);
            }
            PowerUpKind::Health => {
                state.health = state.tuning.max_health;
                state.push_event(GameEvent::HealthCollected);
            }
        }
        log::debug!("Picked up {:?}", power_up.kind);
    }
}

fn update_floating_texts(state: &mut GameState) {
    let drift = state.tuning.floating_text_drift;
    for text in &mut state.floating_texts {
        text.pos.y -= drift;
        text.life = text.life.saturating_sub(1);
    }
    state.floating_texts.retain(|t| t.life > 0);
}
