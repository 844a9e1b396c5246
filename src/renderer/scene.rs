//! Scene building
//!
//! Pure function of the game state, so what ends up on screen is testable
//! without a browser.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, PowerUpKind, Rect};

/// Image assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Bomb,
    Gem,
    ShieldPowerUp,
    HealthPowerUp,
    /// Player face (one-based)
    Face(u8),
}

impl Sprite {
    /// Every sprite the game can draw
    pub fn all() -> Vec<Sprite> {
        let mut sprites = vec![
            Sprite::Background,
            Sprite::Bomb,
            Sprite::Gem,
            Sprite::ShieldPowerUp,
            Sprite::HealthPowerUp,
        ];
        sprites.extend((1..=SKIN_COUNT as u8).map(Sprite::Face));
        sprites
    }

    /// Image URL relative to the page
    pub fn path(&self) -> String {
        match self {
            Sprite::Background => "images/bg.png".to_string(),
            Sprite::Bomb => "images/bomb.png".to_string(),
            Sprite::Gem => "images/gems1.png".to_string(),
            Sprite::ShieldPowerUp => "images/shield1.png".to_string(),
            Sprite::HealthPowerUp => "images/helth1.png".to_string(),
            Sprite::Face(n) => format!("images/face{}.png", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Lime,
    White,
}

impl Color {
    pub fn css(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Lime => "lime",
            Color::White => "white",
        }
    }
}

/// One drawing operation, in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image {
        sprite: Sprite,
        rect: Rect,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    Text {
        text: String,
        /// Baseline start
        pos: Vec2,
        size_px: f32,
        color: Color,
        /// Glow color and blur radius
        glow: Option<(Color, f32)>,
    },
}

/// Build the draw list for one frame.
///
/// The scrolling background is always drawn; gameplay entities and the HUD
/// only while playing.
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let (w, h) = (state.viewport.x, state.viewport.y);
    let mut cmds = Vec::with_capacity(
        8 + state.bombs.len() + state.gems.len() + state.power_ups.len() + state.floating_texts.len(),
    );

    // Two tiles side by side make the seamless loop
    for offset in [0.0, w] {
        cmds.push(DrawCmd::Image {
            sprite: Sprite::Background,
            rect: Rect::new(state.background_x + offset, 0.0, w, h),
        });
    }

    if state.phase != GamePhase::Playing {
        return cmds;
    }

    for bomb in &state.bombs {
        cmds.push(DrawCmd::Image {
            sprite: Sprite::Bomb,
            rect: Rect::square(bomb.pos, bomb.size),
        });
    }
    for gem in &state.gems {
        cmds.push(DrawCmd::Image {
            sprite: Sprite::Gem,
            rect: Rect::square(gem.pos, gem.size),
        });
    }
    for power_up in &state.power_ups {
        let sprite = match power_up.kind {
            PowerUpKind::Shield => Sprite::ShieldPowerUp,
            PowerUpKind::Health => Sprite::HealthPowerUp,
        };
        cmds.push(DrawCmd::Image {
            sprite,
            rect: Rect::square(power_up.pos, power_up.size),
        });
    }

    let player = state.player.bounds();
    cmds.push(DrawCmd::Image {
        sprite: Sprite::Face(state.player.face),
        rect: player,
    });
    if state.is_shielded() {
        cmds.push(DrawCmd::StrokeRect {
            rect: player.inflate(4.0),
            color: Color::White,
            line_width: 4.0,
        });
    }

    for text in &state.floating_texts {
        cmds.push(DrawCmd::Text {
            text: text.text.clone(),
            pos: text.pos,
            size_px: 26.0,
            color: Color::Lime,
            glow: Some((Color::Lime, 15.0)),
        });
    }

    push_hud(state, &mut cmds);
    cmds
}

fn push_hud(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let (bar_x, bar_y) = HEALTH_BAR_POS;
    let (bar_w, bar_h) = HEALTH_BAR_SIZE;
    let fraction = (state.health as f32 / state.tuning.max_health as f32).clamp(0.0, 1.0);

    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(bar_x, bar_y, bar_w, bar_h),
        color: Color::Red,
    });
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(bar_x, bar_y, bar_w * fraction, bar_h),
        color: Color::Lime,
    });

    let w = state.viewport.x;
    cmds.push(DrawCmd::Image {
        sprite: Sprite::Gem,
        rect: Rect::new(w - GEM_ICON_RIGHT_INSET, 10.0, GEM_ICON_SIZE, GEM_ICON_SIZE),
    });
    cmds.push(DrawCmd::Text {
        text: state.profile.gems.to_string(),
        pos: Vec2::new(w - GEM_COUNT_RIGHT_INSET, 50.0),
        size_px: 28.0,
        color: Color::White,
        glow: None,
    });
}
