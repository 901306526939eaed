use rand::rngs::StdRng;
use rand::Rng;
use crate::audio::AudioCue;
use crate::constants::{CANVAS_H, CANVAS_W, POINTS_PER_HP};
use crate::entity::{Animation, Entity, Kinematics, Spawn, TickContext};
use crate::projectiles::Bullet;
use crate::sprites::{ping_pong, SpriteFrame, SpriteSheet};
use crate::state::Difficulty;
use crate::surface::Surface;
use crate::util::{within, Bounded, Rect};

// Descent speed while an enemy is still above its engage line
const ENTRY_SPEED: f64 = 2.0;

const GRUNT_FIRE_PERIOD: u32 = 40;
const SAUCER_FIRE_TICK: u32 = 70;
const SAUCER_HOLD: (u32, u32) = (65, 100);
const OCULUS_WINDOW: (u32, u32) = (24, 60);
const OCULUS_FIRE_EVERY: u32 = 3;

/// Twelve directions, fired all at once by the Saucer and one per shot by
/// the Oculus.
pub const RADIAL: [(f64, f64); 12] = [
    (0.0, 5.0),
    (0.0, -5.0),
    (5.0, 0.0),
    (-5.0, 0.0),
    (-2.0, 4.0),
    (2.0, 4.0),
    (-2.0, -4.0),
    (2.0, -4.0),
    (4.0, 2.0),
    (4.0, -2.0),
    (-4.0, -2.0),
    (-4.0, 2.0),
];

const SPREAD_EASY: [(f64, f64); 1] = [(0.0, 5.0)];
const SPREAD_NORMAL: [(f64, f64); 3] = [(0.0, 5.0), (-3.0, 4.0), (3.0, 4.0)];
const SPREAD_HARD: [(f64, f64); 5] = [(0.0, 5.0), (-3.0, 4.0), (3.0, 4.0), (-1.0, 4.0), (1.0, 4.0)];

/// Grunt burst for the active difficulty.
pub fn grunt_spread(difficulty: Difficulty) -> &'static [(f64, f64)] {
    match difficulty {
        Difficulty::Easy => &SPREAD_EASY,
        Difficulty::Normal => &SPREAD_NORMAL,
        Difficulty::Hard => &SPREAD_HARD,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Suicider,
    Grunt,
    Saucer,
    Oculus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Livery {
    Red,
    Blue,
}

/// Per-archetype state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyKind {
    Suicider,
    /// Descends to `bound_y`, then patrols sideways.
    Grunt { bound_y: f64 },
    Saucer(Livery),
    Oculus,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Kinematics,
    pub hp: i32,
    max_hp: i32,
    kind: EnemyKind,
    w: f64,
    h: f64,
    anim: Animation,
    frames: Vec<SpriteFrame>,
    removed: bool,
}

impl Enemy {
    fn build(
        kind: EnemyKind,
        body: Kinematics,
        hp: i32,
        (w, h): (f64, f64),
        anim: Animation,
        frames: Vec<SpriteFrame>,
    ) -> Self {
        Self { body, hp, max_hp: hp, kind, w, h, anim, frames, removed: false }
    }

    pub fn suicider(spawn: Spawn, rng: &mut StdRng) -> Self {
        let defaults = Kinematics::new(rng.gen_range(0..300) as f64, -40.0, 0.0, 2.0);
        Self::build(
            EnemyKind::Suicider,
            spawn.resolve(defaults),
            5,
            (16.0, 38.0),
            Animation::new(10, 80, 8),
            ping_pong(SpriteSheet::Suicider, 4, 16.0, 38.0),
        )
    }

    pub fn grunt(spawn: Spawn, rng: &mut StdRng) -> Self {
        let x = ((rng.gen::<f64>() * CANVAS_W).floor() - 50.0).abs();
        let bound_y = rng.gen_range(0..6) as f64 * 20.0 + 20.0;
        Self::build(
            EnemyKind::Grunt { bound_y },
            spawn.resolve(Kinematics::new(x, -100.0, 2.0, 0.0)),
            10,
            (48.0, 72.0),
            Animation::new(10, 80, 8),
            ping_pong(SpriteSheet::Grunt, 4, 32.0, 48.0),
        )
    }

    pub fn saucer(spawn: Spawn, livery: Livery) -> Self {
        let sheet = match livery {
            Livery::Red => SpriteSheet::SaucerRed,
            Livery::Blue => SpriteSheet::SaucerBlue,
        };
        Self::build(
            EnemyKind::Saucer(livery),
            spawn.resolve(Kinematics::new((CANVAS_W / 2.0 - 60.0).floor(), -100.0, 0.0, 3.0)),
            36,
            (96.0, 90.0),
            Animation::new(10, 140, 14),
            ping_pong(sheet, 7, 96.0, 90.0),
        )
    }

    pub fn oculus(spawn: Spawn, rng: &mut StdRng) -> Self {
        let w = 72.0;
        let x = rng.gen_range(0.0..=CANVAS_W - w).floor();
        Self::build(
            EnemyKind::Oculus,
            spawn.resolve(Kinematics::new(x, -100.0, 3.0, 3.0)),
            68,
            (w, 120.0),
            Animation::new(10, 80, 8),
            ping_pong(SpriteSheet::Oculus, 4, 48.0, 80.0),
        )
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn archetype(&self) -> Archetype {
        match self.kind {
            EnemyKind::Suicider => Archetype::Suicider,
            EnemyKind::Grunt { .. } => Archetype::Grunt,
            EnemyKind::Saucer(_) => Archetype::Saucer,
            EnemyKind::Oculus => Archetype::Oculus,
        }
    }

    /// Points for destroying this ship.
    pub fn kill_score(&self) -> u32 {
        self.max_hp as u32 * POINTS_PER_HP
    }

    /// Only ships whose lower edge has entered the screen can be shot.
    pub fn is_targetable(&self) -> bool {
        self.body.y + self.h >= 0.0
    }

    /// Takes one point of damage. Returns true on the hit that destroys it.
    pub fn hit(&mut self) -> bool {
        if self.removed {
            return false;
        }
        self.hp -= 1;
        if self.hp <= 0 {
            self.removed = true;
            return true;
        }
        false
    }

    fn muzzle_center(&self) -> (f64, f64) {
        (
            self.body.x + (self.w / 2.0).floor() - 10.0,
            self.body.y + (self.h / 2.0).floor() - 10.0,
        )
    }

    fn fire(&self, ctx: &mut TickContext<'_>, origin: (f64, f64), vectors: &[(f64, f64)]) {
        ctx.audio.play(AudioCue::EnemyShot);
        for &(dx, dy) in vectors {
            ctx.bullets.push(Bullet::enemy(origin.0, origin.1, dx, dy));
        }
    }

    fn advance_grunt(&mut self, ctx: &mut TickContext<'_>, tick: u32, bound_y: f64) {
        if self.body.y < bound_y {
            self.body.y += ENTRY_SPEED;
            return;
        }
        if tick % GRUNT_FIRE_PERIOD == 0 && ctx.rng.gen_bool(0.5) {
            let origin = (self.body.x + (self.w / 2.0).floor() - 10.0, self.body.y + self.h - 20.0);
            let spread = grunt_spread(ctx.difficulty);
            self.fire(ctx, origin, spread);
        }
        let next = self.body.x + self.body.dx;
        if within(next, CANVAS_W - self.w) {
            self.body.x = next;
        } else {
            self.body.reverse();
        }
    }

    fn advance_saucer(&mut self, ctx: &mut TickContext<'_>, tick: u32) {
        if tick == SAUCER_FIRE_TICK {
            self.fire(ctx, self.muzzle_center(), &RADIAL);
        }
        if self.body.y < 0.0 {
            self.body.y += ENTRY_SPEED;
        } else if tick > SAUCER_HOLD.0 && tick < SAUCER_HOLD.1 {
            // holding still after the ring
        } else {
            let next = self.body.y + self.body.dy;
            if within(next, CANVAS_H - self.h) {
                self.body.y = next;
            } else {
                self.body.reverse();
            }
        }
    }

    fn advance_oculus(&mut self, ctx: &mut TickContext<'_>, tick: u32) {
        if self.body.y < 0.0 {
            self.body.y += ENTRY_SPEED;
        } else if (OCULUS_WINDOW.0..OCULUS_WINDOW.1).contains(&tick) {
            if tick % OCULUS_FIRE_EVERY == 0 {
                let idx = ((tick - OCULUS_WINDOW.0) / OCULUS_FIRE_EVERY) as usize;
                if let Some(v) = RADIAL.get(idx) {
                    self.fire(ctx, self.muzzle_center(), std::slice::from_ref(v));
                }
            }
        } else {
            let next_y = self.body.y + self.body.dy;
            if within(next_y, CANVAS_H - self.h) {
                self.body.y = next_y;
            } else {
                self.body.dy = -self.body.dy;
            }
            let next_x = self.body.x + self.body.dx;
            if within(next_x, CANVAS_W - self.w) {
                self.body.x = next_x;
            } else {
                self.body.dx = -self.body.dx;
            }
        }
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        self.body.rect(self.w, self.h)
    }
}

impl Entity for Enemy {
    fn advance(&mut self, ctx: &mut TickContext<'_>) {
        if self.removed {
            return;
        }
        let tick = self.anim.tick();
        match self.kind {
            EnemyKind::Suicider => {
                self.body.advance();
                // Escaped past the bottom edge: gone, but no points
                if self.body.y > CANVAS_H {
                    self.removed = true;
                }
            }
            EnemyKind::Grunt { bound_y } => self.advance_grunt(ctx, tick, bound_y),
            EnemyKind::Saucer(_) => self.advance_saucer(ctx, tick),
            EnemyKind::Oculus => self.advance_oculus(ctx, tick),
        }
        self.anim.advance();
    }

    fn draw(&self, surface: &mut dyn Surface) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::audio::recording::RecordingAudio;

    struct Harness {
        bullets: Vec<Bullet>,
        rng: StdRng,
        audio: RecordingAudio,
        difficulty: Difficulty,
    }

    impl Harness {
        fn new(difficulty: Difficulty) -> Self {
            Self {
                bullets: Vec::new(),
                rng: StdRng::seed_from_u64(7),
                audio: RecordingAudio::default(),
                difficulty,
            }
        }

        fn tick(&mut self, enemy: &mut Enemy) {
            let mut ctx = TickContext {
                bullets: &mut self.bullets,
                difficulty: self.difficulty,
                rng: &mut self.rng,
                audio: &mut self.audio,
            };
            enemy.advance(&mut ctx);
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn archetype_defaults() {
        let mut rng = rng();
        let s = Enemy::suicider(Spawn::default(), &mut rng);
        assert_eq!((s.hp, s.bounds().w, s.bounds().h), (5, 16.0, 38.0));
        assert!(s.body.x >= 0.0 && s.body.x < 300.0);

        let g = Enemy::grunt(Spawn::default(), &mut rng);
        assert_eq!((g.hp, g.body.y, g.body.dx), (10, -100.0, 2.0));
        match g.kind() {
            EnemyKind::Grunt { bound_y } => {
                assert!((20.0..=120.0).contains(&bound_y));
                assert_eq!(bound_y % 20.0, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }

        let sa = Enemy::saucer(Spawn::default(), Livery::Red);
        assert_eq!((sa.hp, sa.body.x, sa.body.dy), (36, 120.0, 3.0));

        let o = Enemy::oculus(Spawn::default(), &mut rng);
        assert_eq!(o.hp, 68);
        assert!(o.body.x >= 0.0 && o.body.x <= CANVAS_W - 72.0);
    }

    #[test]
    fn spawn_overrides_defaults() {
        let s = Enemy::saucer(Spawn::at(244.0, -400.0), Livery::Blue);
        assert_eq!((s.body.x, s.body.y), (244.0, -400.0));
        assert_eq!(s.kind(), EnemyKind::Saucer(Livery::Blue));
    }

    #[test]
    fn hp_drops_by_one_and_dies_exactly_at_zero() {
        let mut g = Enemy::grunt(Spawn::default(), &mut rng());
        for expected in (1..10).rev() {
            assert!(!g.hit());
            assert_eq!(g.hp, expected);
            assert!(!g.is_removed());
        }
        assert!(g.hit());
        assert_eq!(g.hp, 0);
        assert!(g.is_removed());
        // already dead: no further damage or second kill
        assert!(!g.hit());
        assert_eq!(g.hp, 0);
    }

    #[test]
    fn suicider_descends_and_never_fires() {
        let mut h = Harness::new(Difficulty::Hard);
        let mut s = Enemy::suicider(Spawn::at(50.0, 0.0), &mut rng());
        for _ in 0..100 {
            h.tick(&mut s);
        }
        assert_eq!((s.body.x, s.body.y), (50.0, 200.0));
        assert!(h.bullets.is_empty());
    }

    #[test]
    fn suicider_leaving_screen_is_removed() {
        let mut h = Harness::new(Difficulty::Normal);
        let mut s = Enemy::suicider(Spawn::at(50.0, 639.0), &mut rng());
        h.tick(&mut s);
        assert!(s.is_removed());
    }

    #[test]
    fn grunt_enters_then_patrols_and_bounces() {
        let mut h = Harness::new(Difficulty::Normal);
        let mut g = Enemy::grunt(Spawn::at(311.0, 200.0), &mut rng());
        // already below any bound: patrols immediately
        h.tick(&mut g);
        assert_eq!(g.body.x, 311.0);
        assert_eq!(g.body.dx, -2.0);
        h.tick(&mut g);
        assert_eq!(g.body.x, 309.0);
        assert_eq!(g.body.y, 200.0);

        let mut entering = Enemy::grunt(Spawn::at(100.0, -100.0), &mut rng());
        h.tick(&mut entering);
        assert_eq!((entering.body.x, entering.body.y), (100.0, -98.0));
    }

    #[test]
    fn grunt_bursts_match_difficulty() {
        let bursts = [(Difficulty::Easy, 1), (Difficulty::Normal, 3), (Difficulty::Hard, 5)];
        for (difficulty, burst) in bursts {
            let mut h = Harness::new(difficulty);
            let mut g = Enemy::grunt(Spawn::at(100.0, 200.0), &mut rng());
            let mut bursts = 0;
            for _ in 0..2000 {
                let before = h.bullets.len();
                h.tick(&mut g);
                let fired = h.bullets.len() - before;
                assert!(fired == 0 || fired == burst, "{:?} fired {}", difficulty, fired);
                if fired > 0 {
                    bursts += 1;
                }
            }
            assert!(bursts > 0);
            assert_eq!(h.audio.count(AudioCue::EnemyShot), bursts);
        }
    }

    #[test]
    fn saucer_rings_then_holds() {
        let mut h = Harness::new(Difficulty::Normal);
        let mut s = Enemy::saucer(Spawn::at(120.0, 0.0), Livery::Red);
        let mut ys = Vec::new();
        for _ in 0..70 {
            h.tick(&mut s);
            ys.push(s.body.y);
        }
        assert!(h.bullets.is_empty());
        h.tick(&mut s);
        assert_eq!(h.bullets.len(), 12);
        let vectors: Vec<(f64, f64)> = h.bullets.iter().map(|b| (b.body.dx, b.body.dy)).collect();
        assert_eq!(vectors, RADIAL.to_vec());
        // ring fired from the saucer's center
        assert_eq!(h.bullets[0].body.x, 120.0 + 48.0 - 10.0);

        // ticks 0..=65 move, 66..=99 hold
        assert_eq!(ys[0], 3.0);
        let held = ys[65];
        assert_eq!(held, 66.0 * 3.0);
        for _ in 71..100 {
            h.tick(&mut s);
            assert_eq!(s.body.y, held);
        }
        h.tick(&mut s);
        assert_eq!(s.body.y, held + 3.0);
    }

    #[test]
    fn saucer_reverses_at_floor() {
        let mut h = Harness::new(Difficulty::Normal);
        let floor = CANVAS_H - 90.0;
        let mut s = Enemy::saucer(Spawn::at(120.0, floor - 1.0), Livery::Red);
        h.tick(&mut s);
        assert_eq!(s.body.y, floor - 1.0);
        assert_eq!(s.body.dy, -3.0);
        h.tick(&mut s);
        assert_eq!(s.body.y, floor - 4.0);
    }

    #[test]
    fn oculus_cycles_one_direction_per_shot() {
        let mut h = Harness::new(Difficulty::Normal);
        let mut o = Enemy::oculus(Spawn::at(100.0, 0.0), &mut rng());
        for _ in 0..24 {
            h.tick(&mut o);
        }
        assert!(h.bullets.is_empty());
        let parked = (o.body.x, o.body.y);
        for _ in 24..60 {
            h.tick(&mut o);
            assert_eq!((o.body.x, o.body.y), parked);
        }
        assert_eq!(h.bullets.len(), 12);
        let vectors: Vec<(f64, f64)> = h.bullets.iter().map(|b| (b.body.dx, b.body.dy)).collect();
        assert_eq!(vectors, RADIAL.to_vec());
        assert_eq!(h.audio.count(AudioCue::EnemyShot), 12);
    }

    #[test]
    fn oculus_bounces_each_axis_independently() {
        let mut h = Harness::new(Difficulty::Normal);
        let right = CANVAS_W - 72.0;
        let mut o = Enemy::oculus(Spawn::at(right, 10.0), &mut rng());
        h.tick(&mut o);
        // x would overshoot: flips dx, stays put; y keeps moving
        assert_eq!(o.body.x, right);
        assert_eq!(o.body.dx, -3.0);
        assert_eq!(o.body.y, 13.0);
        assert_eq!(o.body.dy, 3.0);
        h.tick(&mut o);
        assert_eq!(o.body.x, right - 3.0);
    }

    #[test]
    fn kill_score_scales_with_toughness() {
        let mut rng = rng();
        assert_eq!(Enemy::suicider(Spawn::default(), &mut rng).kill_score(), 25);
        assert_eq!(Enemy::grunt(Spawn::default(), &mut rng).kill_score(), 50);
        assert_eq!(Enemy::saucer(Spawn::default(), Livery::Red).kill_score(), 180);
        assert_eq!(Enemy::oculus(Spawn::default(), &mut rng).kill_score(), 340);
    }
}
