use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::canvas::CanvasSurface;
use crate::game::SharedGame;
use crate::surface::Layers;

/// Fixed-rate gate over a display-rate callback. Keeps the remainder of each
/// interval so the average rate holds even when callbacks drift.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: f64,
    then: f64,
}

impl FramePacer {
    /// `interval` is the frame period in milliseconds.
    pub fn new(interval: f64, now: f64) -> Self {
        Self { interval, then: now }
    }

    /// True when a frame is due at `now`.
    pub fn ready(&mut self, now: f64) -> bool {
        let elapsed = now - self.then;
        if elapsed > self.interval {
            self.then = now - (elapsed % self.interval);
            return true;
        }
        false
    }
}

/// The three layers a frame draws into.
pub struct CanvasLayers {
    pub background: CanvasSurface,
    pub game: CanvasSurface,
    pub ui: CanvasSurface,
}

pub fn start_game_loop(game: SharedGame, mut canvases: CanvasLayers, interval: f64) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    // Seeded from the first callback so both sides share the rAF time base
    let mut pacer: Option<FramePacer> = None;

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let pacer = pacer.get_or_insert_with(|| FramePacer::new(interval, timestamp));
        if pacer.ready(timestamp) {
            let mut layers = Layers {
                background: &mut canvases.background,
                game: &mut canvases.game,
                ui: &mut canvases.ui,
            };
            game.borrow_mut().frame(&mut layers);
        }

        // Request next frame
        if let (Some(window), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_a_full_interval() {
        let mut pacer = FramePacer::new(20.0, 0.0);
        assert!(!pacer.ready(10.0));
        assert!(!pacer.ready(20.0));
        assert!(pacer.ready(21.0));
    }

    #[test]
    fn carries_the_remainder() {
        let mut pacer = FramePacer::new(20.0, 0.0);
        // 25ms late: next deadline is measured from 20, not 25
        assert!(pacer.ready(25.0));
        assert!(!pacer.ready(40.0));
        assert!(pacer.ready(40.5));
    }

    #[test]
    fn long_stall_runs_one_frame() {
        let mut pacer = FramePacer::new(20.0, 0.0);
        assert!(pacer.ready(1005.0));
        assert!(!pacer.ready(1010.0));
        assert!(pacer.ready(1021.0));
    }

    #[test]
    fn first_timestamp_sets_the_base() {
        // rAF time starts near page load, far from zero
        let mut pacer = FramePacer::new(20.0, 1_700_000.0);
        assert!(!pacer.ready(1_700_010.0));
        assert!(pacer.ready(1_700_021.0));
    }
}
