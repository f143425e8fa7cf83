//! Game interface page component.
//!
//! The live table itself is driven by the backend over its own channel; this
//! page shows who is seated and links back to the lobby.

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::app::components::Layout;
use crate::app::Route;

#[component]
pub fn GameInterface(room_id: String) -> Element {
    let api = use_context::<ApiClient>();

    let mut room = use_resource({
        let room_id = room_id.clone();
        move || {
            let api = api.clone();
            let room_id = room_id.clone();
            async move { api.room_info(&room_id).await.ok() }
        }
    });

    let players = room
        .read()
        .clone()
        .flatten()
        .map(|info| info.users)
        .unwrap_or_default();

    rsx! {
        Layout {
            title: format!("Game {room_id}"),
            nav_active: "dashboard".to_string(),

            h1 { "Game in room {room_id}" }

            article {
                header { "Scoreboard" }
                if players.is_empty() {
                    p { aria_busy: "true", "Waiting for players..." }
                } else {
                    ul {
                        for player in players {
                            li { key: "{player.username}", "{player.username} ({player.points} pts)" }
                        }
                    }
                }
                footer { class: "controls",
                    button { class: "secondary", onclick: move |_| room.restart(), "Refresh" }
                    Link { to: Route::Room { room_id: room_id.clone() }, "Back to room" }
                }
            }
        }
    }
}
