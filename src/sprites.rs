use crate::util::Rect;

/// Every image the game draws from. The canvas layer maps these to loaded
/// `HtmlImageElement`s; the simulation only ever names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Background,
    Beams,
    Player,
    Suicider,
    Grunt,
    SaucerRed,
    SaucerBlue,
    Oculus,
    Explosion,
}

impl SpriteSheet {
    pub const ALL: [SpriteSheet; 9] = [
        SpriteSheet::Background,
        SpriteSheet::Beams,
        SpriteSheet::Player,
        SpriteSheet::Suicider,
        SpriteSheet::Grunt,
        SpriteSheet::SaucerRed,
        SpriteSheet::SaucerBlue,
        SpriteSheet::Oculus,
        SpriteSheet::Explosion,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SpriteSheet::Background => "assets/images/background.png",
            SpriteSheet::Beams => "assets/images/beams.png",
            SpriteSheet::Player => "assets/images/player.png",
            SpriteSheet::Suicider => "assets/images/enemy_suicider.png",
            SpriteSheet::Grunt => "assets/images/enemy_grunt.png",
            SpriteSheet::SaucerRed => "assets/images/enemy_saucer_red.png",
            SpriteSheet::SaucerBlue => "assets/images/enemy_saucer_blue.png",
            SpriteSheet::Oculus => "assets/images/enemy_oculus.png",
            SpriteSheet::Explosion => "assets/images/explosion.png",
        }
    }
}

/// A source rectangle on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub sheet: SpriteSheet,
    pub src: Rect,
}

impl SpriteFrame {
    pub const fn new(sheet: SpriteSheet, sx: f64, sy: f64, sw: f64, sh: f64) -> Self {
        Self { sheet, src: Rect { x: sx, y: sy, w: sw, h: sh } }
    }
}

pub const PLAYER_BULLET: SpriteFrame =
    SpriteFrame::new(SpriteSheet::Beams, 140.0, 318.0, 45.0, 77.0);
pub const ENEMY_BULLET: SpriteFrame = SpriteFrame::new(SpriteSheet::Beams, 36.0, 115.0, 19.0, 19.0);

/// Horizontal strip of `count` cells, played forward then backward.
pub fn ping_pong(sheet: SpriteSheet, count: usize, w: f64, h: f64) -> Vec<SpriteFrame> {
    let forward = (0..count).map(|i| SpriteFrame::new(sheet, i as f64 * w, 0.0, w, h));
    let backward = (0..count).rev().map(|i| SpriteFrame::new(sheet, i as f64 * w, 0.0, w, h));
    forward.chain(backward).collect()
}

/// Horizontal strip played once, left to right.
pub fn strip(sheet: SpriteSheet, count: usize, w: f64, h: f64) -> Vec<SpriteFrame> {
    (0..count).map(|i| SpriteFrame::new(sheet, i as f64 * w, 0.0, w, h)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_pong_mirrors() {
        let frames = ping_pong(SpriteSheet::Grunt, 4, 32.0, 48.0);
        let xs: Vec<f64> = frames.iter().map(|f| f.src.x).collect();
        assert_eq!(xs, vec![0.0, 32.0, 64.0, 96.0, 96.0, 64.0, 32.0, 0.0]);
    }

    #[test]
    fn strip_runs_once() {
        let frames = strip(SpriteSheet::Explosion, 3, 32.0, 32.0);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].src.x, 64.0);
    }
}
