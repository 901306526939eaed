use rand::rngs::StdRng;
use crate::audio::Audio;
use crate::projectiles::Bullet;
use crate::state::Difficulty;
use crate::surface::Surface;
use crate::util::{Bounded, Rect};

/// Position and velocity shared by everything that moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Kinematics {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    /// Flips both velocity components.
    pub fn reverse(&mut self) {
        self.dx = -self.dx;
        self.dy = -self.dy;
    }

    pub fn rect(&self, w: f64, h: f64) -> Rect {
        Rect::new(self.x, self.y, w, h)
    }
}

/// Optional overrides merged over an archetype's spawn defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spawn {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,
}

impl Spawn {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    pub fn resolve(&self, defaults: Kinematics) -> Kinematics {
        Kinematics {
            x: self.x.unwrap_or(defaults.x),
            y: self.y.unwrap_or(defaults.y),
            dx: self.dx.unwrap_or(defaults.dx),
            dy: self.dy.unwrap_or(defaults.dy),
        }
    }
}

/// Cyclic tick counter driving both sprite frames and tick-keyed behavior.
/// The counter wraps to 0 once it reaches `wrap`, before the frame is read.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    tick: u32,
    period: u32,
    wrap: u32,
    frames: usize,
    frame: usize,
}

impl Animation {
    pub fn new(period: u32, wrap: u32, frames: usize) -> Self {
        Self { tick: 0, period: period.max(1), wrap, frames: frames.max(1), frame: 0 }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn advance(&mut self) {
        if self.tick >= self.wrap {
            self.tick = 0;
        }
        self.frame = (self.tick / self.period) as usize % self.frames;
        self.tick += 1;
    }
}

/// Everything an entity may touch while simulating one tick.
pub struct TickContext<'a> {
    /// Live enemy bullets. Enemies append; the game owns and purges.
    pub bullets: &'a mut Vec<Bullet>,
    pub difficulty: Difficulty,
    pub rng: &'a mut StdRng,
    pub audio: &'a mut dyn Audio,
}

pub trait Entity: Bounded {
    fn advance(&mut self, ctx: &mut TickContext<'_>);
    fn draw(&self, surface: &mut dyn Surface);
    fn is_removed(&self) -> bool;
    fn mark_removed(&mut self);

    /// One fused simulate-and-draw step, run once per entity per tick.
    fn step(&mut self, ctx: &mut TickContext<'_>, surface: &mut dyn Surface) {
        self.advance(ctx);
        self.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_adds_velocity_exactly() {
        let mut k = Kinematics::new(10.5, -3.0, 2.25, -0.5);
        k.advance();
        assert_eq!((k.x, k.y), (12.75, -3.5));
        k.advance();
        assert_eq!((k.x, k.y), (15.0, -4.0));
    }

    #[test]
    fn reverse_flips_both_axes() {
        let mut k = Kinematics::new(0.0, 0.0, 2.0, -3.0);
        k.reverse();
        assert_eq!((k.dx, k.dy), (-2.0, 3.0));
    }

    #[test]
    fn spawn_overrides_only_given_fields() {
        let defaults = Kinematics::new(1.0, 2.0, 3.0, 4.0);
        let k = Spawn { x: Some(20.0), ..Default::default() }.resolve(defaults);
        assert_eq!(k, Kinematics::new(20.0, 2.0, 3.0, 4.0));
        let k = Spawn::at(320.0, -400.0).resolve(defaults);
        assert_eq!(k, Kinematics::new(320.0, -400.0, 3.0, 4.0));
    }

    #[test]
    fn animation_walks_frames_and_wraps() {
        let mut anim = Animation::new(10, 80, 8);
        let mut seen = Vec::new();
        for _ in 0..90 {
            anim.advance();
            seen.push(anim.frame());
        }
        assert_eq!(seen[0], 0);
        assert_eq!(seen[9], 0);
        assert_eq!(seen[10], 1);
        assert_eq!(seen[79], 7);
        // wrapped back to the first frame
        assert_eq!(seen[80], 0);
        assert_eq!(anim.tick(), 10);
    }

    #[test]
    fn frame_index_uses_modulo_of_table() {
        // wrap longer than the table: frames repeat
        let mut anim = Animation::new(1, 100, 3);
        let frames: Vec<usize> = (0..7).map(|_| { anim.advance(); anim.frame() }).collect();
        assert_eq!(frames, vec![0, 1, 2, 0, 1, 2, 0]);
    }
}
