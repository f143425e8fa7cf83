//! Room lobby page component.

use dioxus::prelude::*;

use crate::api::{ApiClient, DEFAULT_GAME_MODE};
use crate::app::components::Layout;
use crate::app::session::use_session;
use crate::app::Route;

use super::dashboard::SignInRequired;

/// Room lobby: players, their ready state, leave and start.
#[component]
pub fn Room(room_id: String) -> Element {
    let api = use_context::<ApiClient>();
    let session = use_session();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);

    let mut room = use_resource({
        let api = api.clone();
        let room_id = room_id.clone();
        move || {
            let api = api.clone();
            let room_id = room_id.clone();
            async move { api.room_info(&room_id).await.map_err(|e| e.to_string()) }
        }
    });

    let Some(username) = session.username() else {
        return rsx! { SignInRequired {} };
    };

    let leave = {
        let api = api.clone();
        let room_id = room_id.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let room_id = room_id.clone();
            let username = username.clone();
            spawn(async move {
                match api.leave_room(&room_id, &username).await {
                    Ok(_) => {
                        nav.push(Route::Dashboard {});
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let start = {
        let room_id = room_id.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let room_id = room_id.clone();
            spawn(async move {
                match api.start_game(&room_id, Some(DEFAULT_GAME_MODE)).await {
                    Ok(_) => {
                        nav.push(Route::GameInterface { room_id });
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let content = match room.read().clone() {
        None => rsx! {
            article { aria_busy: "true", "Loading room..." }
        },
        Some(Err(e)) => rsx! {
            article { p { class: "status-err", "{e}" } }
        },
        Some(Ok(info)) => {
            let all_ready = info.all_ready();
            let player_count = info.users.len();
            rsx! {
                article {
                    header { "Players ({player_count})" }
                    table {
                        thead {
                            tr {
                                th { "Player" }
                                th { "Points" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for player in info.users {
                                tr { key: "{player.username}",
                                    td { "{player.username}" }
                                    td { "{player.points}" }
                                    td {
                                        span {
                                            class: if player.ready { "status-ok" } else { "status-err" },
                                            if player.ready { "Ready" } else { "Not ready" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    // Ready flags are set over the game socket; the backend starts regardless
                    if !all_ready {
                        p { small { "Not every player is ready yet." } }
                    }
                    footer { class: "controls",
                        button { onclick: move |_| room.restart(), class: "secondary", "Refresh" }
                        button { onclick: start, "Start game" }
                        button { onclick: leave, class: "contrast", "Leave room" }
                    }
                }
            }
        }
    };

    rsx! {
        Layout {
            title: format!("Room {room_id}"),
            nav_active: "dashboard".to_string(),

            h1 { "Room {room_id}" }
            {content}

            if let Some(msg) = error() {
                p { class: "status-err", "{msg}" }
            }
        }
    }
}
