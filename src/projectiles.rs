use crate::constants::{BULLET_OVERSCAN, CANVAS_H, CANVAS_W};
use crate::entity::{Entity, Kinematics, TickContext};
use crate::sprites::{SpriteFrame, ENEMY_BULLET, PLAYER_BULLET};
use crate::surface::Surface;
use crate::util::{Bounded, Rect};

/// The kind decides owner side, hitbox and motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    PlayerBasic,
    EnemyBasic,
}

impl BulletKind {
    fn hitbox(&self) -> (f64, f64) {
        match self {
            BulletKind::PlayerBasic => (20.0, 40.0),
            BulletKind::EnemyBasic => (19.0, 19.0),
        }
    }

    fn sprite(&self) -> SpriteFrame {
        match self {
            BulletKind::PlayerBasic => PLAYER_BULLET,
            BulletKind::EnemyBasic => ENEMY_BULLET,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Kinematics,
    kind: BulletKind,
    steps: u32,
    removed: bool,
}

impl Bullet {
    pub fn new(kind: BulletKind, body: Kinematics) -> Self {
        Self { body, kind, steps: 0, removed: false }
    }

    pub fn player(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self::new(BulletKind::PlayerBasic, Kinematics::new(x, y, dx, dy))
    }

    pub fn enemy(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self::new(BulletKind::EnemyBasic, Kinematics::new(x, y, dx, dy))
    }

    pub fn kind(&self) -> BulletKind {
        self.kind
    }

    /// Moves one step and self-destructs outside the playfield.
    pub fn fly(&mut self) {
        match self.kind {
            BulletKind::PlayerBasic => {
                // Sideways drift only every third step gives a narrow spread
                if self.steps % 3 == 0 {
                    self.body.x += self.body.dx;
                }
                self.body.y += self.body.dy;
            }
            BulletKind::EnemyBasic => self.body.advance(),
        }
        self.steps += 1;

        let b = &self.body;
        if b.x < -BULLET_OVERSCAN || b.x > CANVAS_W || b.y < 0.0 || b.y > CANVAS_H {
            self.removed = true;
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        let (w, h) = self.kind.hitbox();
        self.body.rect(w, h)
    }
}

impl Entity for Bullet {
    fn advance(&mut self, _ctx: &mut TickContext<'_>) {
        self.fly();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(&self.kind.sprite(), self.bounds());
    }

    fn is_removed(&self) -> bool {
        self.removed
    }

    fn mark_removed(&mut self) {
        self.removed = true;
    }
}
