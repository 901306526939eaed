use crate::constants::{BACKGROUND_H, BACKGROUND_SPEED, CANVAS_W};
use crate::sprites::{SpriteFrame, SpriteSheet};
use crate::surface::Surface;
use crate::util::Rect;

const BACKDROP: SpriteFrame =
    SpriteFrame::new(SpriteSheet::Background, 0.0, 0.0, CANVAS_W, BACKGROUND_H);

/// Endlessly scrolling backdrop, drawn as two stacked copies of one image.
#[derive(Debug, Default)]
pub struct Background {
    offset: f64,
    ticks: u32,
}

impl Background {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Scrolls every other tick, wrapping at the image height.
    pub fn scroll(&mut self) {
        if self.ticks % 2 == 0 {
            self.offset += BACKGROUND_SPEED;
            if self.offset >= BACKGROUND_H {
                self.offset -= BACKGROUND_H;
            }
        }
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(&BACKDROP, Rect::new(0.0, self.offset, CANVAS_W, BACKGROUND_H));
        let above = Rect::new(0.0, self.offset - BACKGROUND_H, CANVAS_W, BACKGROUND_H);
        surface.draw_sprite(&BACKDROP, above);
    }
}
