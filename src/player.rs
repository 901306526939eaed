use crate::audio::AudioCue;
use crate::constants::{
    CANVAS_H, CANVAS_W, PLAYER_BULLET_SPEED, PLAYER_FIRE_PERIOD, PLAYER_H, PLAYER_MAX_HP,
    PLAYER_SPEED, PLAYER_W,
};
use crate::entity::{Animation, Entity, Kinematics, TickContext};
use crate::projectiles::Bullet;
use crate::sprites::{ping_pong, SpriteFrame, SpriteSheet};
use crate::surface::Surface;
use crate::util::{Bounded, Rect};

// Horizontal component of each shot in the volley
const VOLLEY: [f64; 3] = [0.0, -1.0, 1.0];

/// The ship under the pointer. Owns its own outgoing bullets.
pub struct Player {
    pub body: Kinematics,
    pub hp: i32,
    /// Ticks of invulnerability left.
    pub iframe: u32,
    pub bullets: Vec<Bullet>,
    target: (f64, f64),
    ticks: u32,
    anim: Animation,
    frames: Vec<SpriteFrame>,
    removed: bool,
}

impl Player {
    pub fn new() -> Self {
        let x = CANVAS_W / 2.0 - PLAYER_W / 2.0;
        let y = CANVAS_H - 100.0;
        Self {
            body: Kinematics::new(x, y, 0.0, 0.0),
            hp: PLAYER_MAX_HP,
            iframe: 0,
            bullets: Vec::new(),
            target: (x, y),
            ticks: 0,
            anim: Animation::new(10, 80, 8),
            frames: ping_pong(SpriteSheet::Player, 4, PLAYER_W, PLAYER_H),
            removed: false,
        }
    }

    /// Aims the ship's center at a canvas point.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = (x - PLAYER_W / 2.0, y - PLAYER_H / 2.0);
    }

    pub fn is_vulnerable(&self) -> bool {
        self.iframe == 0 && !self.removed
    }

    /// Takes one point of damage and starts an invulnerability window.
    /// Returns true if this hit was fatal.
    pub fn damage(&mut self, iframes: u32) -> bool {
        self.hp -= 1;
        self.iframe = iframes;
        if self.hp <= 0 {
            self.removed = true;
            return true;
        }
        false
    }

    fn fire(&mut self, ctx: &mut TickContext<'_>) {
        let x = self.body.x + PLAYER_W / 2.0 - 10.0;
        let y = self.body.y - 20.0;
        for dx in VOLLEY {
            self.bullets.push(Bullet::player(x, y, dx, -PLAYER_BULLET_SPEED));
        }
        ctx.audio.play(AudioCue::PlayerShot);
    }

    pub fn purge_bullets(&mut self) {
        self.bullets.retain(|b| !b.is_removed());
    }
}

fn approach(from: f64, to: f64, max: f64) -> f64 {
    let next = from + (to - from).clamp(-PLAYER_SPEED, PLAYER_SPEED);
    next.clamp(0.0, max)
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.body.rect(PLAYER_W, PLAYER_H)
    }
}

impl Entity for Player {
    fn advance(&mut self, ctx: &mut TickContext<'_>) {
        if self.removed {
            return;
        }
        self.body.x = approach(self.body.x, self.target.0, CANVAS_W - PLAYER_W);
        self.body.y = approach(self.body.y, self.target.1, CANVAS_H - PLAYER_H);

        if self.ticks % PLAYER_FIRE_PERIOD == 0 {
            self.fire(ctx);
        }
        self.ticks = self.ticks.wrapping_add(1);
        self.iframe = self.iframe.saturating_sub(1);
        self.anim.advance();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.removed {
            return;
        }
        // Blink while invulnerable
        if self.iframe > 0 && (self.iframe / 3) % 2 == 1 {
            return;
        }
        if let Some(frame) = self.frames.get(self.anim.frame()) {
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
