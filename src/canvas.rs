use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use crate::constants::{CANVAS_H, CANVAS_W, FONT_FAMILY};
use crate::sprites::{SpriteFrame, SpriteSheet};
use crate::surface::Surface;
use crate::util::Rect;

/// Loaded sprite sheets, shared by every canvas surface of one game.
pub struct SpriteAtlas {
    images: HashMap<SpriteSheet, HtmlImageElement>,
}

impl SpriteAtlas {
    pub fn load() -> Rc<SpriteAtlas> {
        let mut images = HashMap::new();
        for sheet in SpriteSheet::ALL {
            if let Ok(img) = HtmlImageElement::new() {
                img.set_src(sheet.path());
                images.insert(sheet, img);
            }
        }
        Rc::new(SpriteAtlas { images })
    }

    fn get(&self, sheet: SpriteSheet) -> Option<&HtmlImageElement> {
        self.images.get(&sheet).filter(|img| img.natural_width() > 0)
    }
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    atlas: Rc<SpriteAtlas>,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, atlas: Rc<SpriteAtlas>) -> Self {
        Self { ctx, atlas }
    }

    pub fn for_canvas(id: &str, atlas: Rc<SpriteAtlas>) -> Option<Self> {
        let ctx = get_canvas_context(id)?;
        ctx.set_image_smoothing_enabled(false);
        Some(Self::new(ctx, atlas))
    }
}

impl Surface for CanvasSurface {
    fn draw_sprite(&mut self, frame: &SpriteFrame, dst: Rect) {
        // Not loaded yet
        let Some(img) = self.atlas.get(frame.sheet) else {
            return;
        };
        let src = frame.src;
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img, src.x, src.y, src.w, src.h, dst.x, dst.y, dst.w, dst.h,
            );
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: u32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(&format!("{}px {}", font_px, FONT_FAMILY));
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
    }
}

pub fn get_canvas_context(id: &str) -> Option<CanvasRenderingContext2d> {
    let document = web_sys::window()?.document()?;
    let canvas = document.get_element_by_id(id)?;
    let canvas: HtmlCanvasElement = canvas.unchecked_into();
    canvas
        .get_context("2d")
        .ok()?
        .map(|c| c.unchecked_into())
}

/// Maps a client-space point onto the logical playfield. The canvas is
/// CSS-scaled, so use its on-screen rect rather than its pixel size.
pub fn to_canvas_point(id: &str, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let canvas = document.get_element_by_id(id)?;
    let rect = canvas.get_bounding_client_rect();
    Some(scale_point(client_x, client_y, rect.left(), rect.top(), rect.width(), rect.height()))
}

fn scale_point(cx: f64, cy: f64, left: f64, top: f64, w: f64, h: f64) -> (f64, f64) {
    let sx = if w > 0.0 { CANVAS_W / w } else { 1.0 };
    let sy = if h > 0.0 { CANVAS_H / h } else { 1.0 };
    (((cx - left) * sx).floor(), ((cy - top) * sy).floor())
}
