//! 2D canvas backend

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCmd, Sprite};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasRenderer {
    /// Grab the canvas' 2D context and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut images = HashMap::new();
        for sprite in Sprite::all() {
            let img = HtmlImageElement::new()?;
            img.set_src(&sprite.path());
            images.insert(sprite, img);
        }

        Ok(Self { ctx, images })
    }

    /// Replay a draw list. Images that have not finished loading are skipped.
    pub fn draw(&self, cmds: &[DrawCmd]) {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::Image { sprite, rect } => {
                    if let Some(img) = self.images.get(sprite) {
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        )
                        .ok();
                    }
                }
                DrawCmd::FillRect { rect, color } => {
                    ctx.set_fill_style_str(color.css());
                    ctx.fill_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::StrokeRect {
                    rect,
                    color,
                    line_width,
                } => {
                    ctx.set_stroke_style_str(color.css());
                    ctx.set_line_width(*line_width as f64);
                    ctx.stroke_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::Text {
                    text,
                    pos,
                    size_px,
                    color,
                    glow,
                } => {
                    ctx.set_fill_style_str(color.css());
                    ctx.set_font(&format!("{}px Arial", size_px));
                    if let Some((glow_color, blur)) = glow {
                        ctx.set_shadow_color(glow_color.css());
                        ctx.set_shadow_blur(*blur as f64);
                    }
                    ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
                    ctx.set_shadow_blur(0.0);
                }
            }
        }
    }
}
