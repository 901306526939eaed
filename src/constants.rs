// Playfield (logical canvas pixels)
pub const CANVAS_W: f64 = 360.0;
pub const CANVAS_H: f64 = 640.0;

// Bullets may drift this far past the left edge before they are dropped
pub const BULLET_OVERSCAN: f64 = 20.0;

// Timing
pub const DEFAULT_FPS: u32 = 60;
pub const REQUEST_TIMEOUT_MS: u32 = 5000;
pub const DEFAULT_LEADERBOARD_URL: &str = "http://localhost:5000";

// Player
pub const PLAYER_MAX_HP: i32 = 10;
pub const PLAYER_W: f64 = 32.0;
pub const PLAYER_H: f64 = 48.0;
pub const PLAYER_SPEED: f64 = 6.0;
pub const PLAYER_FIRE_PERIOD: u32 = 12;
pub const PLAYER_BULLET_SPEED: f64 = 8.0;
pub const IFRAMES_AFTER_BULLET: u32 = 30;
pub const IFRAMES_AFTER_RAM: u32 = 10;

// Scoring
pub const POINTS_PER_HP: u32 = 5;
pub const SCORE_CAP: u32 = 999_999;
pub const LEADERBOARD_SIZE: usize = 10;
pub const MAX_INITIALS: usize = 3;

// Background scroll
pub const BACKGROUND_SPEED: f64 = 2.0;
pub const BACKGROUND_H: f64 = 640.0;

// Fonts / colors
pub const FONT_FAMILY: &str = "arcadeclassicregular";
pub const TITLE_COLOR: &str = "#ff9e4f";
pub const TEXT_COLOR: &str = "white";
pub const HP_COLOR: &str = "red";

// Canvas element ids
pub const BG_CANVAS_ID: &str = "background-canvas";
pub const GAME_CANVAS_ID: &str = "game-canvas";
pub const UI_CANVAS_ID: &str = "ui-canvas";
pub const HIGH_SCORE_KEY: &str = "hiScore";
