//! Navigation bar.

use dioxus::prelude::*;

use crate::app::session::use_session;
use crate::app::Route;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "dashboard", "records")
    pub active: String,
}

/// Top navigation with the signed-in user and an admin dropdown.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let mut session = use_session();
    let nav = navigator();

    let link_class = |page: &str| {
        if props.active == page {
            "contrast"
        } else {
            "secondary"
        }
    };

    rsx! {
        nav {
            ul {
                li { strong { "Card Game" } }
            }
            ul {
                li { Link { to: Route::Dashboard {}, class: link_class("dashboard"), "Dashboard" } }
                li { Link { to: Route::GameRecords {}, class: link_class("records"), "Records" } }
                li {
                    details { class: "dropdown",
                        summary { class: link_class("admin"), "Admin" }
                        ul {
                            li { Link { to: Route::AdminUserQuery {}, "Users" } }
                            li { Link { to: Route::AdminRoomManagement {}, "Rooms" } }
                            li { Link { to: Route::AdminGameLogs {}, "Game Logs" } }
                        }
                    }
                }
                if let Some(name) = session.username() {
                    li { small { "{name}" } }
                    li {
                        button {
                            class: "secondary outline",
                            onclick: move |_| {
                                session.sign_out();
                                nav.push(Route::Auth {});
                            },
                            "Sign out"
                        }
                    }
                }
            }
        }
    }
}
