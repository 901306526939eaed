use std::cell::RefCell;
use std::rc::Rc;
use rand::rngs::StdRng;
use crate::audio::{Audio, AudioCue};
use crate::console;
use crate::constants::{CANVAS_H, CANVAS_W, IFRAMES_AFTER_BULLET, IFRAMES_AFTER_RAM};
use crate::effects::Explosion;
use crate::enemies::Enemy;
use crate::entity::{Entity, TickContext};
use crate::hud::Hud;
use crate::input::KeyInput;
use crate::menus;
use crate::network::{Leaderboard, LeaderboardRequest, RequestKind, ScoreMailbox};
use crate::player::Player;
use crate::projectiles::Bullet;
use crate::spawner::{plan_wave, spawn_wave};
use crate::starfield::Background;
use crate::state::{
    qualifies, Difficulty, Direction, LeaderboardView, MenuSelection, MenuState, ScoreEntry, Scores,
};
use crate::storage::HighScoreStore;
use crate::surface::{Layers, Surface};
use crate::util::{collides, Rect};

pub type SharedGame = Rc<RefCell<Game>>;

/// Owns every live entity plus the menu state machine that decides what a
/// frame does.
pub struct Game {
    pub state: MenuState,
    pub selection: MenuSelection,
    pub difficulty: Difficulty,
    pub scores: Scores,
    pub paused: bool,
    tick: u32,
    player: Player,
    enemies: Vec<Enemy>,
    /// Enemy bullets in flight.
    bullets: Vec<Bullet>,
    explosions: Vec<Explosion>,
    background: Background,
    hud: Hud,
    entry: ScoreEntry,
    board: LeaderboardView,
    generation: u64,
    mailbox: ScoreMailbox,
    rng: StdRng,
    audio: Box<dyn Audio>,
    store: Box<dyn HighScoreStore>,
    leaderboard: Box<dyn Leaderboard>,
    audio_unlocked: bool,
}

impl Game {
    pub fn new(
        audio: Box<dyn Audio>,
        store: Box<dyn HighScoreStore>,
        leaderboard: Box<dyn Leaderboard>,
        mailbox: ScoreMailbox,
        rng: StdRng,
    ) -> Self {
        let high = store.high_score();
        Self {
            state: MenuState::Main,
            selection: MenuSelection::Engage,
            difficulty: Difficulty::Normal,
            scores: Scores { score: 0, high },
            paused: false,
            tick: 0,
            player: Player::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            explosions: Vec::new(),
            background: Background::new(),
            hud: Hud::new(),
            entry: ScoreEntry::AwaitingScores,
            board: LeaderboardView::Hidden,
            generation: 0,
            mailbox,
            rng,
            audio,
            store,
            leaderboard,
            audio_unlocked: false,
        }
    }

    pub fn shared(self) -> SharedGame {
        Rc::new(RefCell::new(self))
    }

    /// Initials entry turns every letter key into text.
    pub fn is_entering_initials(&self) -> bool {
        self.state == MenuState::ScoreInput && matches!(self.entry, ScoreEntry::Entering(_))
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        self.audio_unlocked = true;
        muted
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    // --- Input ---

    pub fn handle_key(&mut self, input: KeyInput) {
        match input {
            KeyInput::Confirm => {
                if !self.audio_unlocked {
                    self.audio.set_muted(false);
                    self.audio_unlocked = true;
                }
                self.confirm();
            }
            KeyInput::MenuUp => self.navigate(Direction::Up),
            KeyInput::MenuDown => self.navigate(Direction::Down),
            KeyInput::Pause => {
                if self.state == MenuState::Game || self.paused {
                    self.paused = !self.paused;
                    console::log(if self.paused { "Paused" } else { "Resumed" });
                }
            }
            KeyInput::Reset => {
                if self.state == MenuState::Game {
                    self.start_run();
                }
            }
            KeyInput::Erase => {
                if self.state == MenuState::ScoreInput {
                    self.entry.pop();
                }
            }
            KeyInput::Letter(c) => {
                if self.state == MenuState::ScoreInput {
                    self.entry.push(c);
                }
            }
        }
    }

    /// Click at a canvas-space Y coordinate.
    pub fn handle_click(&mut self, y: f64) {
        match self.state {
            MenuState::GameOver => self.return_to_menu(),
            MenuState::Main => {
                if let Some(entry) = menus::main_menu_entry_at(y) {
                    if entry == self.selection {
                        self.confirm();
                    } else {
                        self.selection = entry;
                    }
                }
            }
            MenuState::Options => {
                if let Some(level) = menus::options_entry_at(y) {
                    if level == self.difficulty {
                        self.confirm();
                    } else {
                        self.difficulty = level;
                    }
                }
            }
            _ => {}
        }
    }

    pub fn handle_pointer(&mut self, x: f64, y: f64) {
        if self.state == MenuState::Game {
            self.player.set_target(x, y);
        }
    }

    fn confirm(&mut self) {
        match self.state {
            MenuState::Main => match self.selection {
                MenuSelection::Engage => self.start_run(),
                MenuSelection::Options => self.state = MenuState::Options,
            },
            MenuState::Options => self.state = MenuState::Main,
            MenuState::GameOver => self.return_to_menu(),
            MenuState::ScoreInput => {
                if let ScoreEntry::Entering(initials) = &self.entry {
                    if !initials.is_empty() {
                        let request = LeaderboardRequest::Submit {
                            initials: initials.clone(),
                            score: self.scores.score,
                            difficulty: self.difficulty,
                        };
                        self.issue(request);
                    }
                }
            }
            MenuState::Game | MenuState::Connecting => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        match (self.state, direction) {
            (MenuState::Main, Direction::Up) => self.selection = MenuSelection::Engage,
            (MenuState::Main, Direction::Down) => self.selection = MenuSelection::Options,
            (MenuState::Options, Direction::Up) => self.difficulty = self.difficulty.easier(),
            (MenuState::Options, Direction::Down) => self.difficulty = self.difficulty.harder(),
            _ => {}
        }
    }

    fn return_to_menu(&mut self) {
        self.state = MenuState::Main;
        self.board = LeaderboardView::Hidden;
    }

    // --- Run lifecycle ---

    fn start_run(&mut self) {
        self.player = Player::new();
        self.scores.score = 0;
        self.enemies.clear();
        self.bullets.clear();
        self.explosions.clear();
        self.entry = ScoreEntry::AwaitingScores;
        self.board = LeaderboardView::Hidden;
        self.hud = Hud::new();
        self.paused = false;
        self.state = MenuState::Game;
        console::log(&format!("Game started ({})", self.difficulty.label()));
        self.spawn_next_wave();
    }

    fn spawn_next_wave(&mut self) {
        let plan = plan_wave(self.scores.score, &mut self.rng);
        console::log(&format!("Wave at score {}: {:?}", self.scores.score, plan));
        let wave = spawn_wave(&plan, &mut self.rng);
        self.enemies.extend(wave);
    }

    /// Drops dead enemies and explosions, then refills an empty field.
    fn cleanup(&mut self) {
        self.enemies.retain(|e| !e.is_removed());
        self.explosions.retain(|e| !e.is_removed());
        if self.enemies.is_empty() {
            self.spawn_next_wave();
        }
    }

    fn issue(&mut self, request: LeaderboardRequest) {
        self.generation += 1;
        self.state = MenuState::Connecting;
        self.leaderboard.request(request, self.generation, self.mailbox.clone());
    }

    fn poll_mailbox(&mut self) {
        let reply = self.mailbox.borrow_mut().take();
        let reply = match reply {
            Some(r) => r,
            None => return,
        };
        if reply.generation != self.generation {
            console::warn(&format!("Dropping stale leaderboard reply #{}", reply.generation));
            return;
        }
        match (reply.kind, reply.scores) {
            (_, None) => {
                self.board = LeaderboardView::ConnectionError;
                self.state = MenuState::GameOver;
            }
            (RequestKind::Fetch, Some(rows)) => {
                if qualifies(self.scores.score, &rows) {
                    self.entry = ScoreEntry::Entering(String::new());
                    self.state = MenuState::ScoreInput;
                } else {
                    self.board = LeaderboardView::Scores(rows);
                    self.state = MenuState::GameOver;
                }
            }
            (RequestKind::Submit, Some(rows)) => {
                self.board = LeaderboardView::Scores(rows);
                self.state = MenuState::GameOver;
            }
        }
    }

    // --- Frame ---

    /// One paced frame. Does nothing while paused.
    pub fn frame(&mut self, layers: &mut Layers<'_>) {
        if self.paused {
            return;
        }
        self.tick = self.tick.wrapping_add(1);

        // Transitions that happen without input
        match self.state {
            MenuState::ScoreInput if self.entry == ScoreEntry::AwaitingScores => {
                let request = LeaderboardRequest::Fetch { difficulty: self.difficulty };
                self.issue(request);
            }
            MenuState::Connecting => self.poll_mailbox(),
            _ => {}
        }

        self.background.scroll();
        self.background.draw(layers.background);
        layers.game.clear_rect(Rect::new(0.0, 0.0, CANVAS_W, CANVAS_H));

        match self.state {
            MenuState::Game => self.run_game(layers),
            MenuState::Main => menus::draw_title(layers.game, self.selection),
            MenuState::Options => menus::draw_options(layers.game, self.difficulty),
            MenuState::GameOver => menus::draw_game_over(layers.game, &self.board),
            MenuState::Connecting => menus::draw_connecting(layers.game, self.tick),
            MenuState::ScoreInput => {
                if let ScoreEntry::Entering(initials) = &self.entry {
                    menus::draw_initials_entry(layers.game, initials, self.scores.score);
                }
            }
        }
    }

    fn run_game(&mut self, layers: &mut Layers<'_>) {
        let mut player_died = self.step_enemies(layers.game);
        player_died |= self.step_enemy_bullets(layers.game);
        if !player_died {
            self.step_player(layers.game);
        }
        self.step_explosions(layers.game);
        self.cleanup();

        let hp = self.player.hp;
        self.hud.render(layers.ui, &mut self.scores, hp, self.store.as_mut());

        if player_died {
            console::log(&format!("Player destroyed at score {}", self.scores.score));
            self.hud.clear(layers.ui);
            self.entry = ScoreEntry::AwaitingScores;
            self.state = MenuState::ScoreInput;
        }
    }

    /// Moves every ship and checks for rams. Returns true if the player died.
    fn step_enemies(&mut self, surface: &mut dyn Surface) -> bool {
        let mut died = false;
        let mut ctx = TickContext {
            bullets: &mut self.bullets,
            difficulty: self.difficulty,
            rng: &mut self.rng,
            audio: self.audio.as_mut(),
        };
        for enemy in self.enemies.iter_mut() {
            enemy.step(&mut ctx, surface);
            if enemy.is_removed() || !self.player.is_vulnerable() {
                continue;
            }
            if collides(&*enemy, &self.player) {
                ctx.audio.play(AudioCue::Explosion);
                let at = (self.player.body.x + 5.0, self.player.body.y - 10.0);
                self.explosions.push(Explosion::large(at.0, at.1));
                died |= self.player.damage(IFRAMES_AFTER_RAM);
            }
        }
        died
    }

    /// Moves enemy bullets and checks them against the player.
    fn step_enemy_bullets(&mut self, surface: &mut dyn Surface) -> bool {
        let mut died = false;
        let mut live = std::mem::take(&mut self.bullets);
        let mut spawned = Vec::new();
        {
            let mut ctx = TickContext {
                bullets: &mut spawned,
                difficulty: self.difficulty,
                rng: &mut self.rng,
                audio: self.audio.as_mut(),
            };
            for bullet in live.iter_mut() {
                bullet.step(&mut ctx, surface);
                if bullet.is_removed() || !self.player.is_vulnerable() {
                    continue;
                }
                if collides(&*bullet, &self.player) {
                    let (x, y) = (bullet.body.x, bullet.body.y);
                    ctx.audio.play(AudioCue::Hit);
                    self.explosions.push(Explosion::small(x, y));
                    bullet.mark_removed();
                    if self.player.damage(IFRAMES_AFTER_BULLET) {
                        ctx.audio.play(AudioCue::Explosion);
                        self.explosions.push(Explosion::large(x, y));
                        died = true;
                    }
                }
            }
        }
        live.append(&mut spawned);
        live.retain(|b| !b.is_removed());
        self.bullets = live;
        died
    }

    /// Moves the player, then flies its bullets into the enemy line.
    fn step_player(&mut self, surface: &mut dyn Surface) {
        let mut ctx = TickContext {
            bullets: &mut self.bullets,
            difficulty: self.difficulty,
            rng: &mut self.rng,
            audio: self.audio.as_mut(),
        };
        self.player.step(&mut ctx, surface);

        for bullet in self.player.bullets.iter_mut() {
            bullet.step(&mut ctx, surface);
            for enemy in self.enemies.iter_mut() {
                if bullet.is_removed() {
                    break;
                }
                if enemy.is_removed() || !enemy.is_targetable() || !collides(&*enemy, &*bullet) {
                    continue;
                }
                let (x, y) = (bullet.body.x, bullet.body.y - 20.0);
                ctx.audio.play(AudioCue::Hit);
                self.explosions.push(Explosion::small(x, y));
                bullet.mark_removed();
                if enemy.hit() {
                    self.scores.score += enemy.kill_score();
                    ctx.audio.play(AudioCue::Explosion);
                    self.explosions.push(Explosion::large(x, y));
                }
            }
        }
        self.player.purge_bullets();
    }

    fn step_explosions(&mut self, surface: &mut dyn Surface) {
        let mut ctx = TickContext {
            bullets: &mut self.bullets,
            difficulty: self.difficulty,
            rng: &mut self.rng,
            audio: self.audio.as_mut(),
        };
        for explosion in self.explosions.iter_mut() {
            explosion.step(&mut ctx, surface);
        }
    }
}
