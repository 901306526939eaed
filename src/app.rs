use leptos::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::audio::HtmlAudio;
use crate::canvas::{CanvasSurface, SpriteAtlas};
use crate::config::GameConfig;
use crate::console;
use crate::constants::{BG_CANVAS_ID, GAME_CANVAS_ID, UI_CANVAS_ID};
use crate::game::{Game, SharedGame};
use crate::game_loop::{self, CanvasLayers};
use crate::input;
use crate::network::{new_mailbox, HttpLeaderboard};
use crate::storage::LocalStorage;

fn mute_label(muted: bool) -> &'static str {
    if muted { "SOUND OFF" } else { "SOUND ON" }
}

#[component]
pub fn App() -> impl IntoView {
    let config = GameConfig::from_location();
    console::log(&format!(
        "PlasmaForce starting: {} fps, scores at {}",
        config.fps, config.leaderboard_url
    ));

    let game: SharedGame = Game::new(
        Box::new(HtmlAudio::new()),
        Box::new(LocalStorage::new()),
        Box::new(HttpLeaderboard::new(&config.leaderboard_url, config.request_timeout_ms)),
        new_mailbox(),
        StdRng::from_entropy(),
    )
    .shared();

    let muted = RwSignal::new(game.borrow().is_muted());

    // Enter on the title screen can unmute too; keep the button honest
    let game_sync = game.clone();
    let sync_interval = gloo_timers::callback::Interval::new(250, move || {
        let now = game_sync.borrow().is_muted();
        if muted.get_untracked() != now {
            muted.set(now);
        }
    });
    std::mem::forget(sync_interval);

    view! {
        <GameView game=game.clone() interval=config.frame_interval() />
        <MuteButton game=game muted=muted />
    }
}

#[component]
fn GameView(game: SharedGame, interval: f64) -> impl IntoView {
    let game_for_mount = send_wrapper::SendWrapper::new(game);

    // Setup canvases once mounted
    Effect::new(move |_| {
        let game = (*game_for_mount).clone();
        let atlas = SpriteAtlas::load();
        let layers = (
            CanvasSurface::for_canvas(BG_CANVAS_ID, atlas.clone()),
            CanvasSurface::for_canvas(GAME_CANVAS_ID, atlas.clone()),
            CanvasSurface::for_canvas(UI_CANVAS_ID, atlas),
        );
        match layers {
            (Some(background), Some(game_layer), Some(ui)) => {
                input::setup_input(game.clone());
                let canvases = CanvasLayers { background, game: game_layer, ui };
                game_loop::start_game_loop(game, canvases, interval);
            }
            _ => console::error("PlasmaForce: canvas layers missing, not starting"),
        }
    });

    view! {
        <div id="c-container">
            <canvas id=BG_CANVAS_ID width="360" height="640"></canvas>
            <canvas id=GAME_CANVAS_ID width="360" height="640"></canvas>
            <canvas id=UI_CANVAS_ID width="360" height="640"></canvas>
        </div>
    }
}

#[component]
fn MuteButton(game: SharedGame, muted: RwSignal<bool>) -> impl IntoView {
    let game_for_click = send_wrapper::SendWrapper::new(game);

    view! {
        <button id="mute-control"
            on:click=move |_| {
                let now = game_for_click.borrow_mut().toggle_mute();
                muted.set(now);
            }
        >
            {move || mute_label(muted.get())}
        </button>
    }
}
