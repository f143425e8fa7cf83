//! Inspect a room and remove players from it.

use dioxus::prelude::*;

use crate::api::models::{RoomInfo, RoomPlayer};
use crate::api::ApiClient;
use crate::app::components::Layout;

#[component]
pub fn RoomManagementView() -> Element {
    let api = use_context::<ApiClient>();
    let mut room_id = use_signal(String::new);
    let mut room = use_signal(|| None::<RoomInfo>);
    let mut error = use_signal(|| None::<String>);

    let lookup = {
        let api = api.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let id = room_id().trim().to_uppercase();
            if id.is_empty() {
                return;
            }
            let api = api.clone();
            spawn(async move {
                match api.room_info(&id).await {
                    Ok(info) => {
                        error.set(None);
                        room.set(Some(info));
                    }
                    Err(e) => {
                        room.set(None);
                        error.set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    let kick = use_callback(move |(id, username): (String, String)| {
        let api = api.clone();
        spawn(async move {
            if let Err(e) = api.leave_room(&id, &username).await {
                error.set(Some(e.to_string()));
                return;
            }
            tracing::info!(room_id = %id, %username, "removed player from room");
            match api.room_info(&id).await {
                Ok(info) => room.set(Some(info)),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    rsx! {
        Layout {
            title: "Room Management".to_string(),
            nav_active: "admin".to_string(),

            h1 { "Room Management" }
            form { role: "search", onsubmit: lookup,
                input {
                    r#type: "search",
                    placeholder: "Room ID",
                    value: "{room_id}",
                    oninput: move |e| room_id.set(e.value()),
                }
                button { r#type: "submit", "Look up" }
            }

            if let Some(msg) = error() {
                p { class: "status-err", "{msg}" }
            }

            if let Some(info) = room() {
                article {
                    header { "Room {info.room_id}" }
                    if info.users.is_empty() {
                        p { "The room is empty." }
                    }
                    for player in info.users.clone() {
                        PlayerRow {
                            key: "{player.username}",
                            room_id: info.room_id.clone(),
                            player: player.clone(),
                            on_remove: kick,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PlayerRow(
    room_id: String,
    player: RoomPlayer,
    on_remove: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        div { class: "controls",
            span { "{player.username}" }
            small { if player.ready { "ready" } else { "not ready" } }
            button {
                class: "contrast outline",
                onclick: move |_| on_remove.call((room_id.clone(), player.username.clone())),
                "Remove"
            }
        }
    }
}
