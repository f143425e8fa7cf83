//! Admin pages.
//!
//! The route components here only hand off to [`LazyView`]; the real views are
//! mounted once the module loader resolves them.

use dioxus::prelude::*;

use crate::app::components::LazyView;
use crate::app::lazy::AdminView;

mod game_logs;
mod room_management;
mod user_query;

pub use game_logs::GameLogsView;
pub use room_management::RoomManagementView;
pub use user_query::UserQueryView;

#[component]
pub fn AdminUserQuery() -> Element {
    rsx! { LazyView { view: AdminView::UserQuery } }
}

#[component]
pub fn AdminRoomManagement() -> Element {
    rsx! { LazyView { view: AdminView::RoomManagement } }
}

#[component]
pub fn AdminGameLogs() -> Element {
    rsx! { LazyView { view: AdminView::GameLogs } }
}
