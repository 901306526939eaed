use crate::entity::{Entity, TickContext};
use crate::sprites::{strip, SpriteFrame, SpriteSheet};
use crate::surface::Surface;
use crate::util::{Bounded, Rect};

const FRAME_COUNT: usize = 8;
const TICKS_PER_FRAME: u32 = 3;
const CELL: f64 = 32.0;

pub const SMALL: f64 = 32.0;
pub const LARGE: f64 = 64.0;

/// Short-lived blast drawn centered on where it was spawned.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    ticks: u32,
    frames: Vec<SpriteFrame>,
    removed: bool,
}

impl Explosion {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self {
            x,
            y,
            size,
            ticks: 0,
            frames: strip(SpriteSheet::Explosion, FRAME_COUNT, CELL, CELL),
            removed: false,
        }
    }

    pub fn small(x: f64, y: f64) -> Self {
        Self::new(x, y, SMALL)
    }

    pub fn large(x: f64, y: f64) -> Self {
        Self::new(x, y, LARGE)
    }

    pub fn frame(&self) -> usize {
        (self.ticks / TICKS_PER_FRAME) as usize
    }

    /// Ticks from spawn until the blast clears itself.
    pub const LIFETIME: u32 = FRAME_COUNT as u32 * TICKS_PER_FRAME;

    pub fn tick(&mut self) {
        if self.removed {
            return;
        }
        self.ticks += 1;
        if self.frame() >= FRAME_COUNT {
            self.removed = true;
        }
    }
}

impl Bounded for Explosion {
    fn bounds(&self) -> Rect {
        let half = self.size / 2.0;
        Rect::new(self.x - half, self.y - half, self.size, self.size)
    }
}

impl Entity for Explosion {
    fn advance(&mut self, _ctx: &mut TickContext<'_>) {
        self.tick();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.removed {
            return;
        }
        if let Some(frame) = self.frames.get(self.frame()) {
            surface.draw_sprite(frame, self.bounds());
        }
    }

    fn is_removed(&self) -> bool {
        self.removed
    }

    fn mark_removed(&mut self) {
        self.removed = true;
    }
}
