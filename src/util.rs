use crate::constants::SCORE_CAP;

/// Axis-aligned box in canvas space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Anything with a hitbox.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Closed-interval AABB test: boxes collide unless separated on an axis.
/// Touching edges count as a collision.
pub fn collides<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    !(a.bottom() < b.y || a.y > b.bottom() || a.right() < b.x || a.x > b.right())
}

/// Zero-pads a score to six digits, saturating at 999999.
pub fn format_score(score: u32) -> String {
    format!("{:06}", score.min(SCORE_CAP))
}

/// Inclusive range test used by every bounce rule.
pub fn within(value: f64, max: f64) -> bool {
    value >= 0.0 && value <= max
}
