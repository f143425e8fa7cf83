//! Browse a player's game log, filtered by result.

use dioxus::prelude::*;

use crate::api::models::{GameRecord, GameResult};
use crate::api::ApiClient;
use crate::app::components::Layout;
use crate::app::pages::RecordsTable;

#[component]
pub fn GameLogsView() -> Element {
    let api = use_context::<ApiClient>();
    let mut username = use_signal(String::new);
    let mut filter = use_signal(|| None::<GameResult>);
    let mut logs = use_signal(|| None::<Result<Vec<GameRecord>, String>>);

    let load = move |evt: FormEvent| {
        evt.prevent_default();
        let name = username().trim().to_string();
        if name.is_empty() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            let records = api
                .user_records(&name)
                .await
                .map(|user| user.game_records)
                .map_err(|e| e.to_string());
            logs.set(Some(records));
        });
    };

    let content = match logs() {
        None => rsx! {},
        Some(Err(e)) => rsx! { p { class: "status-err", "{e}" } },
        Some(Ok(records)) => {
            let shown: Vec<GameRecord> = records
                .into_iter()
                .filter(|r| filter().map_or(true, |f| r.result == f))
                .collect();
            rsx! { RecordsTable { records: shown } }
        }
    };

    rsx! {
        Layout {
            title: "Game Logs".to_string(),
            nav_active: "admin".to_string(),

            h1 { "Game Logs" }
            form { role: "search", onsubmit: load,
                input {
                    r#type: "search",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                button { r#type: "submit", "Load" }
            }
            select {
                onchange: move |e| {
                    filter.set(match e.value().as_str() {
                        "win" => Some(GameResult::Win),
                        "loss" => Some(GameResult::Loss),
                        "draw" => Some(GameResult::Draw),
                        _ => None,
                    })
                },
                option { value: "all", "All results" }
                option { value: "win", "Wins" }
                option { value: "loss", "Losses" }
                option { value: "draw", "Draws" }
            }
            {content}
        }
    }
}
