//! Suspending wrapper for lazily loaded admin views.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::lazy::{AdminView, LoadError, ModuleLoader};
use crate::app::pages::admin::{GameLogsView, RoomManagementView, UserQueryView};

/// Resolve `view` through the [`ModuleLoader`] and mount it once loaded.
///
/// Nothing from the admin view renders until the load settles.
#[component]
pub fn LazyView(view: AdminView) -> Element {
    let loader = use_context::<ModuleLoader>();

    // Each admin route mounts its own LazyView, so `view` is fixed per instance
    let module = use_resource(move || {
        let loader = loader.clone();
        async move { loader.resolve(view).await }
    });

    let state = module.read().clone();
    match state {
        None => rsx! {
            Layout {
                title: view.title().to_string(),
                nav_active: "admin".to_string(),
                article { aria_busy: "true", "Loading {view}..." }
            }
        },
        Some(Ok(module)) => match module.view {
            AdminView::UserQuery => rsx! { UserQueryView {} },
            AdminView::RoomManagement => rsx! { RoomManagementView {} },
            AdminView::GameLogs => rsx! { GameLogsView {} },
        },
        Some(Err(LoadError::Superseded(_))) => rsx! {},
        Some(Err(e)) => rsx! {
            Layout {
                title: view.title().to_string(),
                nav_active: "admin".to_string(),
                article {
                    p { class: "status-err", "{e}" }
                }
            }
        },
    }
}
