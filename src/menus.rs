use crate::constants::{TEXT_COLOR, TITLE_COLOR};
use crate::protocol::ScoreRecord;
use crate::state::{Difficulty, LeaderboardView, MenuSelection};
use crate::surface::Surface;
use crate::util::format_score;

// Inclusive canvas-Y bands for pointer selection
const ENGAGE_BAND: (f64, f64) = (320.0, 360.0);
const OPTIONS_BAND: (f64, f64) = (375.0, 415.0);
const EASY_BAND: (f64, f64) = (275.0, 315.0);
const NORMAL_BAND: (f64, f64) = (325.0, 365.0);
const HARD_BAND: (f64, f64) = (375.0, 415.0);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn in_band(y: f64, (lo, hi): (f64, f64)) -> bool {
    y >= lo && y <= hi
}

/// Which main-menu entry sits under a click, if any.
pub fn main_menu_entry_at(y: f64) -> Option<MenuSelection> {
    if in_band(y, ENGAGE_BAND) {
        Some(MenuSelection::Engage)
    } else if in_band(y, OPTIONS_BAND) {
        Some(MenuSelection::Options)
    } else {
        None
    }
}

/// Which difficulty sits under a click, if any.
pub fn options_entry_at(y: f64) -> Option<Difficulty> {
    if in_band(y, EASY_BAND) {
        Some(Difficulty::Easy)
    } else if in_band(y, NORMAL_BAND) {
        Some(Difficulty::Normal)
    } else if in_band(y, HARD_BAND) {
        Some(Difficulty::Hard)
    } else {
        None
    }
}

fn marked(label: &str, selected: bool) -> String {
    if selected {
        format!("{}<", label)
    } else {
        label.to_string()
    }
}

pub fn draw_title(surface: &mut dyn Surface, selection: MenuSelection) {
    surface.fill_text("PlasmaForce", 40.0, 200.0, 48, TITLE_COLOR);
    surface.fill_text("V2", 160.0, 240.0, 48, TITLE_COLOR);
    let engage = marked("Engage", selection == MenuSelection::Engage);
    surface.fill_text(&engage, 125.0, 350.0, 30, TEXT_COLOR);
    let options = marked("Options", selection == MenuSelection::Options);
    surface.fill_text(&options, 125.0, 400.0, 30, TEXT_COLOR);
}

pub fn draw_options(surface: &mut dyn Surface, difficulty: Difficulty) {
    surface.fill_text("Difficulty", 55.0, 200.0, 50, TEXT_COLOR);
    let levels = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];
    for (i, level) in levels.into_iter().enumerate() {
        let y = 300.0 + i as f64 * 50.0;
        surface.fill_text(&marked(level.label(), level == difficulty), 75.0, y, 30, TEXT_COLOR);
    }
}

pub fn draw_game_over(surface: &mut dyn Surface, view: &LeaderboardView) {
    surface.fill_text("GAME OVER", 70.0, 280.0, 48, TEXT_COLOR);
    match view {
        LeaderboardView::Hidden => {}
        LeaderboardView::ConnectionError => {
            surface.fill_text("CONNECTION ERROR", 45.0, 340.0, 30, TEXT_COLOR);
        }
        LeaderboardView::Scores(rows) => draw_board(surface, rows),
    }
}

fn draw_board(surface: &mut dyn Surface, rows: &[ScoreRecord]) {
    surface.fill_text("TOP SCORES", 100.0, 330.0, 30, TITLE_COLOR);
    if rows.is_empty() {
        surface.fill_text("NO ENTRIES", 110.0, 370.0, 24, TEXT_COLOR);
        return;
    }
    for (i, row) in rows.iter().enumerate() {
        let line = format!("{:>2}  {:<3}  {}", i + 1, row.initials, format_score(row.score));
        surface.fill_text(&line, 70.0, 365.0 + i as f64 * 24.0, 20, TEXT_COLOR);
    }
}

pub fn draw_initials_entry(surface: &mut dyn Surface, initials: &str, score: u32) {
    surface.fill_text("NEW HIGH SCORE", 45.0, 220.0, 36, TITLE_COLOR);
    surface.fill_text(&format_score(score), 120.0, 270.0, 30, TEXT_COLOR);
    surface.fill_text("ENTER INITIALS", 70.0, 330.0, 30, TEXT_COLOR);
    let padded: String = initials.chars().chain(std::iter::repeat('_')).take(3).collect();
    surface.fill_text(&padded, 140.0, 390.0, 48, TEXT_COLOR);
}

/// Spinner glyph for a tick; four frames over every sixty ticks.
pub fn spinner_frame(tick: u32) -> usize {
    ((tick % 60) / 15) as usize
}

pub fn draw_connecting(surface: &mut dyn Surface, tick: u32) {
    surface.fill_text("CONNECTING", 85.0, 260.0, 36, TEXT_COLOR);
    surface.fill_text(SPINNER[spinner_frame(tick)], 170.0, 330.0, 48, TEXT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;

    #[test]
    fn main_menu_bands_are_inclusive() {
        assert_eq!(main_menu_entry_at(320.0), Some(MenuSelection::Engage));
        assert_eq!(main_menu_entry_at(360.0), Some(MenuSelection::Engage));
        assert_eq!(main_menu_entry_at(367.0), None);
        assert_eq!(main_menu_entry_at(375.0), Some(MenuSelection::Options));
        assert_eq!(main_menu_entry_at(415.0), Some(MenuSelection::Options));
        assert_eq!(main_menu_entry_at(416.0), None);
    }

    #[test]
    fn options_bands() {
        assert_eq!(options_entry_at(275.0), Some(Difficulty::Easy));
        assert_eq!(options_entry_at(320.0), None);
        assert_eq!(options_entry_at(365.0), Some(Difficulty::Normal));
        assert_eq!(options_entry_at(400.0), Some(Difficulty::Hard));
    }

    #[test]
    fn spinner_cycles_four_frames() {
        let frames: Vec<usize> =
            [0, 14, 15, 30, 45, 59, 60].iter().map(|t| spinner_frame(*t)).collect();
        assert_eq!(frames, vec![0, 0, 1, 2, 3, 3, 0]);
    }

    #[test]
    fn title_marks_selection() {
        let mut s = RecordingSurface::default();
        draw_title(&mut s, MenuSelection::Options);
        assert!(s.texts().contains(&"Engage"));
        assert!(s.texts().contains(&"Options<"));
    }

    #[test]
    fn game_over_shows_error_or_board() {
        let mut s = RecordingSurface::default();
        draw_game_over(&mut s, &LeaderboardView::ConnectionError);
        assert!(s.has_text("CONNECTION ERROR"));
        assert!(!s.has_text("TOP SCORES"));

        let mut s = RecordingSurface::default();
        let rows = vec![ScoreRecord { initials: "ABC".into(), score: 75 }];
        draw_game_over(&mut s, &LeaderboardView::Scores(rows));
        assert!(s.has_text("TOP SCORES"));
        assert!(s.has_text("ABC"));
        assert!(s.has_text("000075"));
        assert!(!s.has_text("CONNECTION ERROR"));
    }

    #[test]
    fn initials_are_padded() {
        let mut s = RecordingSurface::default();
        draw_initials_entry(&mut s, "A", 90);
        assert!(s.texts().contains(&"A__"));
    }
}
