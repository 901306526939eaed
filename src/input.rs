use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};
use crate::canvas::to_canvas_point;
use crate::constants::UI_CANVAS_ID;
use crate::game::SharedGame;

/// A key press after translation, independent of the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Confirm,
    MenuUp,
    MenuDown,
    Pause,
    Reset,
    Erase,
    Letter(char),
}

impl KeyInput {
    /// Maps a `KeyboardEvent.key` value. While initials are being typed,
    /// every letter and digit is text rather than a command.
    pub fn from_key(key: &str, entering_initials: bool) -> Option<KeyInput> {
        match key {
            "Enter" => return Some(KeyInput::Confirm),
            "Backspace" => return Some(KeyInput::Erase),
            "ArrowUp" => return Some(KeyInput::MenuUp),
            "ArrowDown" => return Some(KeyInput::MenuDown),
            _ => {}
        }
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
            _ => return None,
        };
        if entering_initials {
            return Some(KeyInput::Letter(c));
        }
        Some(match c {
            'W' => KeyInput::MenuUp,
            'S' => KeyInput::MenuDown,
            'P' => KeyInput::Pause,
            'R' => KeyInput::Reset,
            other => KeyInput::Letter(other),
        })
    }
}

/// Wires keyboard, mouse and touch listeners on the document.
pub fn setup_input(game: SharedGame) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    // Key down
    let game_kd = game.clone();
    let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        let entering = game_kd.borrow().is_entering_initials();
        if let Some(input) = KeyInput::from_key(&e.key(), entering) {
            // Keep Backspace from navigating and arrows from scrolling
            if matches!(input, KeyInput::Erase | KeyInput::MenuUp | KeyInput::MenuDown) {
                e.prevent_default();
            }
            game_kd.borrow_mut().handle_key(input);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    // Mouse up selects menu entries
    let game_mu = game.clone();
    let mouseup = Closure::wrap(Box::new(move |e: MouseEvent| {
        let (cx, cy) = (e.client_x() as f64, e.client_y() as f64);
        if let Some((_, y)) = to_canvas_point(UI_CANVAS_ID, cx, cy) {
            game_mu.borrow_mut().handle_click(y);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = document.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref());
    mouseup.forget();

    // Mouse move steers the ship
    let game_mm = game.clone();
    let mousemove = Closure::wrap(Box::new(move |e: MouseEvent| {
        let (cx, cy) = (e.client_x() as f64, e.client_y() as f64);
        if let Some((x, y)) = to_canvas_point(UI_CANVAS_ID, cx, cy) {
            game_mm.borrow_mut().handle_pointer(x, y);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = document
        .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref());
    mousemove.forget();

    // Touch move steers too; stop the page from scrolling underneath
    let game_tm = game.clone();
    let touchmove = Closure::wrap(Box::new(move |e: TouchEvent| {
        e.prevent_default();
        if let Some(touch) = e.touches().get(0) {
            let (cx, cy) = (touch.client_x() as f64, touch.client_y() as f64);
            if let Some((x, y)) = to_canvas_point(UI_CANVAS_ID, cx, cy) {
                game_tm.borrow_mut().handle_pointer(x, y);
            }
        }
    }) as Box<dyn FnMut(TouchEvent)>);
    let mut opts = web_sys::AddEventListenerOptions::new();
    opts.set_passive(false);
    let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove", touchmove.as_ref().unchecked_ref(), &opts,
    );
    touchmove.forget();
}
