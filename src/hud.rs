use crate::constants::{CANVAS_W, HP_COLOR, TEXT_COLOR};
use crate::state::Scores;
use crate::storage::HighScoreStore;
use crate::surface::Surface;
use crate::util::{format_score, Rect};

const REDRAW_EVERY: u32 = 4;
const STRIP_H: f64 = 50.0;
const FONT_PX: u32 = 24;
const HP_SEGMENT: f64 = 8.0;

/// Score and health strip along the top of the UI layer.
#[derive(Debug, Default)]
pub struct Hud {
    ticks: u32,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraws every fourth call. A new best score is written through to
    /// the store on every call, drawn or not.
    pub fn render(
        &mut self,
        ui: &mut dyn Surface,
        scores: &mut Scores,
        hp: i32,
        store: &mut dyn HighScoreStore,
    ) {
        if scores.score > scores.high {
            scores.high = scores.score;
            store.set_high_score(scores.high);
        }
        if self.ticks % REDRAW_EVERY == 0 {
            ui.clear_rect(Rect::new(0.0, 0.0, CANVAS_W, STRIP_H));
            let score = format!("SCORE: {}", format_score(scores.score));
            ui.fill_text(&score, 140.0, 30.0, FONT_PX, TEXT_COLOR);
            let high = format!("HI: {}", format_score(scores.high));
            ui.fill_text(&high, 320.0, 30.0, FONT_PX, TEXT_COLOR);

            ui.fill_text("HP", 10.0, 30.0, FONT_PX, TEXT_COLOR);
            ui.stroke_rect(Rect::new(45.0, 14.0, 81.0, 18.0), TEXT_COLOR);
            ui.fill_rect(Rect::new(45.0, 15.0, hp.max(0) as f64 * HP_SEGMENT, 16.0), HP_COLOR);

            if self.ticks > 300 {
                self.ticks = 0;
            }
        }
        self.ticks += 1;
    }

    /// Wipes the strip, e.g. when leaving a run.
    pub fn clear(&mut self, ui: &mut dyn Surface) {
        ui.clear_rect(Rect::new(0.0, 0.0, CANVAS_W, STRIP_H));
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use crate::surface::recording::{DrawCall, RecordingSurface};

    #[test]
    fn draws_score_high_and_health() {
        let mut hud = Hud::new();
        let mut ui = RecordingSurface::default();
        let mut scores = Scores { score: 75, high: 120 };
        let mut store = MemoryStore::default();
        hud.render(&mut ui, &mut scores, 7, &mut store);
        assert!(ui.has_text("SCORE: 000075"));
        assert!(ui.has_text("HI: 000120"));
        assert!(ui.calls.contains(&DrawCall::Fill(Rect::new(45.0, 15.0, 56.0, 16.0))));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn redraws_every_fourth_tick() {
        let mut hud = Hud::new();
        let mut ui = RecordingSurface::default();
        let mut scores = Scores::default();
        let mut store = MemoryStore::default();
        for _ in 0..8 {
            hud.render(&mut ui, &mut scores, 10, &mut store);
        }
        let clears = ui.calls.iter().filter(|c| matches!(c, DrawCall::Clear(_))).count();
        assert_eq!(clears, 2);
    }

    #[test]
    fn new_best_is_persisted() {
        let mut hud = Hud::new();
        let mut ui = RecordingSurface::default();
        let mut scores = Scores { score: 300, high: 120 };
        let mut store = MemoryStore { value: 120, writes: 0 };
        hud.render(&mut ui, &mut scores, 10, &mut store);
        assert_eq!(scores.high, 300);
        assert_eq!(store.value, 300);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn new_best_is_persisted_between_redraws() {
        let mut hud = Hud::new();
        let mut ui = RecordingSurface::default();
        let mut scores = Scores { score: 0, high: 40 };
        let mut store = MemoryStore { value: 40, writes: 0 };
        hud.render(&mut ui, &mut scores, 10, &mut store);
        ui.calls.clear();

        scores.score = 500;
        hud.render(&mut ui, &mut scores, 10, &mut store);
        // tick 1: nothing drawn, best still stored
        assert!(ui.calls.is_empty());
        assert_eq!(scores.high, 500);
        assert_eq!(store.value, 500);
        assert_eq!(store.writes, 1);
    }
}
