mod app;
mod audio;
mod canvas;
mod config;
mod console;
mod constants;
mod effects;
mod enemies;
mod entity;
mod game;
mod game_loop;
mod hud;
mod input;
mod menus;
mod network;
mod player;
mod projectiles;
mod protocol;
mod spawner;
mod sprites;
mod starfield;
mod state;
mod storage;
mod surface;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
