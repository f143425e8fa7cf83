//! Game records page component.

use dioxus::prelude::*;

use crate::api::models::{GameRecord, GameResult};
use crate::api::ApiClient;
use crate::app::components::Layout;
use crate::app::session::use_session;

use super::dashboard::SignInRequired;

/// The signed-in user's points and match history.
#[component]
pub fn GameRecords() -> Element {
    let api = use_context::<ApiClient>();
    let session = use_session();

    let records = use_resource(move || {
        let api = api.clone();
        let username = session.username();
        async move {
            match username {
                Some(name) => Some(api.user_records(&name).await.map_err(|e| e.to_string())),
                None => None,
            }
        }
    });

    if !session.is_signed_in() {
        return rsx! { SignInRequired {} };
    }

    let content = match records.read().clone() {
        None | Some(None) => rsx! {
            article { aria_busy: "true", "Loading records..." }
        },
        Some(Some(Err(e))) => rsx! {
            article { p { class: "status-err", "{e}" } }
        },
        Some(Some(Ok(user))) => rsx! {
            article {
                p { strong { "Points:" } " {user.points}" }
                RecordsTable { records: user.game_records }
            }
        },
    };

    rsx! {
        Layout {
            title: "Records".to_string(),
            nav_active: "records".to_string(),

            h1 { "Game Records" }
            {content}
        }
    }
}

/// Table of finished games, newest first as the backend sends them.
#[component]
pub fn RecordsTable(records: Vec<GameRecord>) -> Element {
    if records.is_empty() {
        return rsx! { p { "No games played yet." } };
    }

    rsx! {
        table {
            thead {
                tr {
                    th { "Time" }
                    th { "Room" }
                    th { "Opponents" }
                    th { "Result" }
                    th { "Score" }
                }
            }
            tbody {
                for record in records {
                    RecordRow { key: "{record.id}", record: record.clone() }
                }
            }
        }
    }
}

#[component]
fn RecordRow(record: GameRecord) -> Element {
    let time = record.game_time.format("%Y-%m-%d %H:%M").to_string();
    let opponents = record.opponent_list().join(", ");
    let result_class = match record.result {
        GameResult::Win => "result-win",
        GameResult::Loss => "result-loss",
        GameResult::Draw => "",
    };
    let result = record.result.label();
    let score = format!("{:+}", record.score_change);

    rsx! {
        tr {
            td { "{time}" }
            td { "{record.room_id}" }
            td { "{opponents}" }
            td { class: result_class, "{result}" }
            td { "{score}" }
        }
    }
}
