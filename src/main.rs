//! Card game web UI entry point (wasm32, `web` feature).

fn main() {
    dioxus::launch(card_game_frontend::app::App);
}
