//! Dashboard page component.
//!
//! Lets the signed-in user open a new room or join one by ID.

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::app::components::Layout;
use crate::app::session::use_session;
use crate::app::Route;

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    let api = use_context::<ApiClient>();
    let session = use_session();
    let nav = navigator();

    let mut join_id = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let Some(username) = session.username() else {
        return rsx! { SignInRequired {} };
    };

    let create = {
        let api = api.clone();
        let username = username.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            let username = username.clone();
            spawn(async move {
                match api.create_room(&username).await {
                    Ok(resp) => {
                        nav.push(Route::Room {
                            room_id: resp.room_id,
                        });
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let join = move |evt: FormEvent| {
        evt.prevent_default();
        let room_id = join_id().trim().to_uppercase();
        if room_id.is_empty() {
            return;
        }
        let api = api.clone();
        let username = username.clone();
        spawn(async move {
            match api.join_room(&room_id, &username).await {
                Ok(resp) => {
                    nav.push(Route::Room {
                        room_id: resp.room_id,
                    });
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        Layout {
            title: "Dashboard".to_string(),
            nav_active: "dashboard".to_string(),

            h1 { "Dashboard" }

            div { class: "room-grid",
                article {
                    header { "New room" }
                    p { "Open a room and invite other players with its ID." }
                    button { onclick: create, "Create room" }
                }
                article {
                    header { "Join a room" }
                    form { onsubmit: join,
                        input {
                            r#type: "text",
                            placeholder: "Room ID",
                            value: "{join_id}",
                            oninput: move |e| join_id.set(e.value()),
                        }
                        button { r#type: "submit", "Join" }
                    }
                }
            }

            if let Some(msg) = error() {
                p { class: "status-err", "{msg}" }
            }
        }
    }
}

/// Shown by views that need a signed-in user.
#[component]
pub fn SignInRequired() -> Element {
    rsx! {
        Layout {
            title: "Sign in".to_string(),
            nav_active: String::new(),
            article {
                p { "You need to sign in first." }
                Link { to: Route::Auth {}, "Go to sign in" }
            }
        }
    }
}
