//! Dioxus application entry point.
//!
//! This module provides the root App component, the route table and the
//! context values (API client, admin module loader, session) every view reads.

use dioxus::prelude::*;

use crate::api::{ApiClient, ApiConfig};

pub mod components;
pub mod lazy;
pub mod pages;
pub mod session;

use lazy::{AdminView, ModuleLoader};
use pages::{
    AdminGameLogs, AdminRoomManagement, AdminUserQuery, Auth, Dashboard, GameInterface,
    GameRecords, NotFound, Room,
};
use session::use_session_provider;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Built once per page session; views get them from context
    use_context_provider(|| ApiClient::new(&ApiConfig::from_build_env()));
    use_context_provider(ModuleLoader::default);
    use_session_provider();

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
    #[route("/")]
    Auth {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/room/:room_id")]
    Room { room_id: String },
    #[route("/game/:room_id")]
    GameInterface { room_id: String },
    #[route("/records")]
    GameRecords {},
    #[route("/admin/users")]
    AdminUserQuery {},
    #[route("/admin/rooms")]
    AdminRoomManagement {},
    #[route("/admin/records")]
    AdminGameLogs {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// How a route's view is brought in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Load {
    Eager,
    /// Resolved through [`ModuleLoader`] on first navigation
    Lazy,
}

/// Static description of one route binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: &'static str,
    /// Path parameters are handed to the view as props
    pub props: bool,
    pub load: Load,
}

const fn entry(path: &'static str, name: &'static str, props: bool, load: Load) -> RouteEntry {
    RouteEntry {
        path,
        name,
        props,
        load,
    }
}

/// Every binding in [`Route`], in match order. The catch-all comes last.
pub const ROUTE_TABLE: &[RouteEntry] = &[
    entry("/", "Auth", false, Load::Eager),
    entry("/dashboard", "Dashboard", false, Load::Eager),
    entry("/room/:room_id", "Room", true, Load::Eager),
    entry("/game/:room_id", "GameInterface", true, Load::Eager),
    entry("/records", "GameRecords", false, Load::Eager),
    entry("/admin/users", "AdminUserQuery", false, Load::Lazy),
    entry("/admin/rooms", "AdminRoomManagement", false, Load::Lazy),
    entry("/admin/records", "AdminGameLogs", false, Load::Lazy),
    entry("/:..segments", "NotFound", true, Load::Eager),
];

impl Route {
    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    pub fn load(&self) -> Load {
        self.entry().load
    }

    pub fn entry(&self) -> &'static RouteEntry {
        let index = match self {
            Route::Auth {} => 0,
            Route::Dashboard {} => 1,
            Route::Room { .. } => 2,
            Route::GameInterface { .. } => 3,
            Route::GameRecords {} => 4,
            Route::AdminUserQuery {} => 5,
            Route::AdminRoomManagement {} => 6,
            Route::AdminGameLogs {} => 7,
            Route::NotFound { .. } => 8,
        };
        &ROUTE_TABLE[index]
    }

    /// Room captured from `/room/:room_id` or `/game/:room_id`.
    pub fn room_id(&self) -> Option<&str> {
        match self {
            Route::Room { room_id } | Route::GameInterface { room_id } => Some(room_id),
            _ => None,
        }
    }

    pub fn admin_view(&self) -> Option<AdminView> {
        match self {
            Route::AdminUserQuery {} => Some(AdminView::UserQuery),
            Route::AdminRoomManagement {} => Some(AdminView::RoomManagement),
            Route::AdminGameLogs {} => Some(AdminView::GameLogs),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound { .. })
    }
}

/// Bring the admin module loader in line with the route just entered.
///
/// Entering an eager route abandons any admin load still in flight; admin
/// routes leave their own load running.
pub fn on_route_change(loader: &ModuleLoader, route: &Route) {
    tracing::trace!(route = route.name(), "route resolved");
    if route.load() == Load::Eager {
        loader.cancel_pending();
    }
}

/// Route-level layout shared by every view.
#[component]
fn Shell() -> Element {
    let route = use_route::<Route>();
    let loader = use_context::<ModuleLoader>();

    use_effect(use_reactive((&route,), move |(route,)| on_route_change(&loader, &route)));

    rsx! {
        Outlet::<Route> {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{self, LocalBoxFuture};
    use lazy::{LoadError, ModuleSource, ViewModule};
    use std::collections::HashSet;
    use std::str::FromStr;

    fn resolve(path: &str) -> Route {
        Route::from_str(path).unwrap_or_else(|e| panic!("{path} did not resolve: {e}"))
    }

    #[test]
    fn test_literal_paths_resolve_to_named_views() {
        let cases = [
            ("/", "Auth"),
            ("/dashboard", "Dashboard"),
            ("/records", "GameRecords"),
            ("/admin/users", "AdminUserQuery"),
            ("/admin/rooms", "AdminRoomManagement"),
            ("/admin/records", "AdminGameLogs"),
        ];
        for (path, name) in cases {
            assert_eq!(resolve(path).name(), name, "{path}");
        }
    }

    #[test]
    fn test_room_id_is_passed_through() {
        assert_eq!(
            resolve("/room/42"),
            Route::Room {
                room_id: "42".to_string()
            }
        );
        assert_eq!(
            resolve("/game/42"),
            Route::GameInterface {
                room_id: "42".to_string()
            }
        );
        assert_eq!(resolve("/game/42").room_id(), Some("42"));
    }

    #[test]
    fn test_room_id_is_not_coerced() {
        assert_eq!(resolve("/room/abc-1").room_id(), Some("abc-1"));
        assert_eq!(resolve("/room/007").room_id(), Some("007"));
        assert_eq!(resolve("/dashboard").room_id(), None);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let route = resolve("/nonexistent");
        assert!(route.is_not_found());
        assert_eq!(route.name(), "NotFound");
        assert_eq!(
            route,
            Route::NotFound {
                segments: vec!["nonexistent".to_string()]
            }
        );
        assert!(resolve("/admin/unknown/deeper").is_not_found());
    }

    #[test]
    fn test_admin_routes_are_lazy() {
        for path in ["/admin/users", "/admin/rooms", "/admin/records"] {
            let route = resolve(path);
            assert_eq!(route.load(), Load::Lazy, "{path}");
            assert!(route.admin_view().is_some());
        }
        assert_eq!(resolve("/room/1").load(), Load::Eager);
        assert_eq!(resolve("/room/1").admin_view(), None);
    }

    #[test]
    fn test_admin_views_map_one_to_one() {
        let views: HashSet<_> = ["/admin/users", "/admin/rooms", "/admin/records"]
            .into_iter()
            .filter_map(|p| resolve(p).admin_view())
            .collect();
        assert_eq!(views.len(), AdminView::ALL.len());
    }

    #[test]
    fn test_route_table_patterns_are_unique() {
        let paths: HashSet<_> = ROUTE_TABLE.iter().map(|e| e.path).collect();
        let names: HashSet<_> = ROUTE_TABLE.iter().map(|e| e.name).collect();
        assert_eq!(paths.len(), ROUTE_TABLE.len());
        assert_eq!(names.len(), ROUTE_TABLE.len());
    }

    #[test]
    fn test_route_table_matches_router() {
        for entry in ROUTE_TABLE {
            let path = entry
                .path
                .replace(":room_id", "R1")
                .replace(":..segments", "somewhere/else");
            let route = resolve(&path);
            assert_eq!(route.entry(), entry, "{path}");
            assert_eq!(route.to_string(), path);
        }
    }

    /// Admin source that never settles on its own.
    struct StalledModules;

    impl ModuleSource for StalledModules {
        fn load(&self, _: AdminView) -> LocalBoxFuture<'static, Result<ViewModule, LoadError>> {
            Box::pin(future::pending())
        }
    }

    #[test]
    fn test_eager_route_cancels_pending_admin_load() {
        tokio_test::block_on(async {
            let loader = ModuleLoader::new(StalledModules);
            let mut load = Box::pin(loader.resolve(AdminView::RoomManagement));
            assert!(futures::poll!(load.as_mut()).is_pending());

            // Admin routes leave the loader alone
            on_route_change(&loader, &resolve("/admin/rooms"));
            on_route_change(&loader, &resolve("/admin/users"));
            assert!(loader.is_pending());
            assert!(futures::poll!(load.as_mut()).is_pending());

            on_route_change(&loader, &resolve("/dashboard"));
            assert!(!loader.is_pending());
            assert_eq!(load.await, Err(LoadError::Superseded(AdminView::RoomManagement)));
        });
    }

    #[test]
    fn test_not_found_route_cancels_pending_admin_load() {
        tokio_test::block_on(async {
            let loader = ModuleLoader::new(StalledModules);
            let mut load = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(load.as_mut()).is_pending());

            on_route_change(&loader, &resolve("/admin/nowhere"));
            assert!(load.await.is_err());
            assert_eq!(loader.cached(AdminView::GameLogs), None);
        });
    }

    #[test]
    fn test_only_parameterized_routes_pass_props() {
        for entry in ROUTE_TABLE {
            assert_eq!(entry.props, entry.path.contains(':'), "{}", entry.path);
        }
    }
}
