//! Look up a player's account summary.

use dioxus::prelude::*;

use crate::api::models::{GameResult, UserRecords};
use crate::api::ApiClient;
use crate::app::components::Layout;

#[component]
pub fn UserQueryView() -> Element {
    let api = use_context::<ApiClient>();
    let mut query = use_signal(String::new);
    let mut result = use_signal(|| None::<Result<UserRecords, String>>);

    let search = move |evt: FormEvent| {
        evt.prevent_default();
        let username = query().trim().to_string();
        if username.is_empty() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            let found = api.user_records(&username).await.map_err(|e| e.to_string());
            result.set(Some(found));
        });
    };

    let found = match result() {
        None => rsx! {},
        Some(Err(e)) => rsx! { p { class: "status-err", "{e}" } },
        Some(Ok(user)) => rsx! { UserSummary { user } },
    };

    rsx! {
        Layout {
            title: "User Query".to_string(),
            nav_active: "admin".to_string(),

            h1 { "User Query" }
            form { role: "search", onsubmit: search,
                input {
                    r#type: "search",
                    placeholder: "Username",
                    value: "{query}",
                    oninput: move |e| query.set(e.value()),
                }
                button { r#type: "submit", "Search" }
            }

            {found}
        }
    }
}

#[component]
fn UserSummary(user: UserRecords) -> Element {
    let games = user.game_records.len();
    let count = |wanted: GameResult| {
        user.game_records
            .iter()
            .filter(|r| r.result == wanted)
            .count()
    };
    let (wins, losses, draws) = (
        count(GameResult::Win),
        count(GameResult::Loss),
        count(GameResult::Draw),
    );

    rsx! {
        article {
            header { "{user.username}" }
            dl {
                dt { "User ID" }
                dd { "{user.id}" }
                dt { "Points" }
                dd { "{user.points}" }
                dt { "Games" }
                dd { "{games} ({wins} W / {losses} L / {draws} D)" }
            }
        }
    }
}
