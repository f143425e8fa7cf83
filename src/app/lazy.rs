//! Deferred loading of the admin views.
//!
//! Admin pages are resolved on first navigation through a [`ModuleSource`].
//! [`ModuleLoader`] caches resolved modules and aborts a pending load when
//! the user navigates elsewhere before it settles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use futures::future::{self, AbortHandle, Abortable, Aborted, LocalBoxFuture};
use tracing::{debug, warn};

/// The lazily loaded admin views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminView {
    UserQuery,
    RoomManagement,
    GameLogs,
}

impl AdminView {
    pub const ALL: [AdminView; 3] = [
        AdminView::UserQuery,
        AdminView::RoomManagement,
        AdminView::GameLogs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AdminView::UserQuery => "User Query",
            AdminView::RoomManagement => "Room Management",
            AdminView::GameLogs => "Game Logs",
        }
    }
}

impl fmt::Display for AdminView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A resolved admin view, ready to mount.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModule {
    pub view: AdminView,
    pub title: String,
}

impl ViewModule {
    pub fn new(view: AdminView) -> Self {
        Self {
            view,
            title: view.title().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load {view} view: {reason}")]
    Failed { view: AdminView, reason: String },

    /// Navigation moved on before the load settled.
    #[error("loading {0} view was cancelled by navigation")]
    Superseded(AdminView),
}

/// Where admin view modules come from.
pub trait ModuleSource {
    fn load(&self, view: AdminView) -> LocalBoxFuture<'static, Result<ViewModule, LoadError>>;
}

/// Modules compiled into the main bundle; resolves on the next poll.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledModules;

impl ModuleSource for BundledModules {
    fn load(&self, view: AdminView) -> LocalBoxFuture<'static, Result<ViewModule, LoadError>> {
        Box::pin(future::ready(Ok(ViewModule::new(view))))
    }
}

#[derive(Default)]
struct LoaderState {
    cache: HashMap<AdminView, ViewModule>,
    /// Every load still in flight, oldest first
    pending: Vec<PendingLoad>,
    next_ticket: u64,
}

struct PendingLoad {
    view: AdminView,
    ticket: u64,
    abort: AbortHandle,
}

/// Caching, cancellable resolver for admin view modules.
///
/// Lives in the Dioxus context of the app root, so it is single-threaded and
/// shared by `Rc`.
#[derive(Clone)]
pub struct ModuleLoader {
    source: Rc<dyn ModuleSource>,
    state: Rc<RefCell<LoaderState>>,
}

impl ModuleLoader {
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self {
            source: Rc::new(source),
            state: Rc::new(RefCell::new(LoaderState::default())),
        }
    }

    /// Already-resolved module for `view`, if any.
    pub fn cached(&self, view: AdminView) -> Option<ViewModule> {
        self.state.borrow().cache.get(&view).cloned()
    }

    pub fn is_pending(&self) -> bool {
        !self.state.borrow().pending.is_empty()
    }

    /// Resolve `view`, loading it on first use.
    ///
    /// Starting a load for a different view aborts every load in flight for
    /// other views. Loads of the same view run side by side.
    pub async fn resolve(&self, view: AdminView) -> Result<ViewModule, LoadError> {
        if let Some(module) = self.cached(view) {
            return Ok(module);
        }

        let (abort, registration) = AbortHandle::new_pair();
        let ticket = {
            let mut state = self.state.borrow_mut();
            state.next_ticket += 1;
            let ticket = state.next_ticket;
            state.pending.retain(|previous| {
                if previous.view == view {
                    return true;
                }
                debug!(from = %previous.view, to = %view, "superseding admin view load");
                previous.abort.abort();
                false
            });
            state.pending.push(PendingLoad {
                view,
                ticket,
                abort,
            });
            ticket
        };

        debug!(%view, "loading admin view module");
        let result = Abortable::new(self.source.load(view), registration).await;

        let mut state = self.state.borrow_mut();
        state.pending.retain(|p| p.ticket != ticket);

        match result {
            Ok(Ok(module)) => {
                state.cache.insert(view, module.clone());
                Ok(module)
            }
            Ok(Err(e)) => {
                warn!(%view, error = %e, "admin view module failed to load");
                Err(e)
            }
            Err(Aborted) => Err(LoadError::Superseded(view)),
        }
    }

    /// Abort every load in flight. Called when navigating to an eager route.
    pub fn cancel_pending(&self) {
        let pending = std::mem::take(&mut self.state.borrow_mut().pending);
        for load in pending {
            debug!(view = %load.view, "cancelling admin view load");
            load.abort.abort();
        }
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new(BundledModules)
    }
}

impl PartialEq for ModuleLoader {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::Cell;

    /// Source whose loads complete only when the test says so.
    #[derive(Default)]
    struct GatedSource {
        gates: RefCell<HashMap<AdminView, Vec<Gate>>>,
        calls: Rc<Cell<usize>>,
    }

    type Gate = oneshot::Sender<Result<ViewModule, LoadError>>;

    impl GatedSource {
        /// Complete every outstanding load of `view` with `result`.
        fn settle(&self, view: AdminView, result: Result<ViewModule, LoadError>) {
            let gates = self.gates.borrow_mut().remove(&view).unwrap();
            for tx in gates {
                let _ = tx.send(result.clone());
            }
        }

        fn release(&self, view: AdminView) {
            self.settle(view, Ok(ViewModule::new(view)));
        }

        fn fail(&self, view: AdminView, reason: &str) {
            let reason = reason.to_string();
            self.settle(view, Err(LoadError::Failed { view, reason }));
        }
    }

    impl ModuleSource for Rc<GatedSource> {
        fn load(&self, view: AdminView) -> LocalBoxFuture<'static, Result<ViewModule, LoadError>> {
            self.calls.set(self.calls.get() + 1);
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().entry(view).or_default().push(tx);
            Box::pin(async move {
                rx.await.unwrap_or_else(|_| {
                    Err(LoadError::Failed {
                        view,
                        reason: "source dropped".to_string(),
                    })
                })
            })
        }
    }

    /// Source that counts calls and resolves immediately.
    struct CountingSource(Rc<Cell<usize>>);

    impl ModuleSource for CountingSource {
        fn load(&self, view: AdminView) -> LocalBoxFuture<'static, Result<ViewModule, LoadError>> {
            self.0.set(self.0.get() + 1);
            Box::pin(future::ready(Ok(ViewModule::new(view))))
        }
    }

    #[test]
    fn test_view_not_resolved_before_load_settles() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            let mut load = Box::pin(loader.resolve(AdminView::UserQuery));
            assert!(futures::poll!(load.as_mut()).is_pending());
            assert!(loader.is_pending());
            assert_eq!(loader.cached(AdminView::UserQuery), None);

            source.release(AdminView::UserQuery);
            let module = load.await.unwrap();
            assert_eq!(module.view, AdminView::UserQuery);
            assert_eq!(module.title, "User Query");
            assert!(!loader.is_pending());
            assert_eq!(loader.cached(AdminView::UserQuery), Some(module));
        });
    }

    #[test]
    fn test_resolved_modules_are_cached() {
        tokio_test::block_on(async {
            let calls = Rc::new(Cell::new(0));
            let loader = ModuleLoader::new(CountingSource(calls.clone()));

            for view in AdminView::ALL {
                loader.resolve(view).await.unwrap();
                loader.resolve(view).await.unwrap();
            }
            assert_eq!(calls.get(), 3);
        });
    }

    #[test]
    fn test_navigation_cancels_pending_load() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            let mut load = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(load.as_mut()).is_pending());

            loader.cancel_pending();
            assert_eq!(load.await, Err(LoadError::Superseded(AdminView::GameLogs)));
            assert_eq!(loader.cached(AdminView::GameLogs), None);
            assert!(!loader.is_pending());
        });
    }

    #[test]
    fn test_cancel_aborts_every_load_of_same_view() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            // Two mounts asking for the same view before either settles
            let mut first = Box::pin(loader.resolve(AdminView::UserQuery));
            assert!(futures::poll!(first.as_mut()).is_pending());
            let mut second = Box::pin(loader.resolve(AdminView::UserQuery));
            assert!(futures::poll!(second.as_mut()).is_pending());

            loader.cancel_pending();
            assert!(!loader.is_pending());
            source.release(AdminView::UserQuery);

            let superseded = Err(LoadError::Superseded(AdminView::UserQuery));
            assert_eq!(first.await, superseded);
            assert_eq!(second.await, superseded);
            assert_eq!(loader.cached(AdminView::UserQuery), None);
        });
    }

    #[test]
    fn test_same_view_loads_share_pending_state() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            let mut first = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(first.as_mut()).is_pending());
            let mut second = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(second.as_mut()).is_pending());

            source.release(AdminView::GameLogs);
            assert!(first.await.is_ok());
            // The other load is still registered until it settles
            assert!(loader.is_pending());
            assert!(second.await.is_ok());
            assert!(!loader.is_pending());
            assert!(loader.cached(AdminView::GameLogs).is_some());
        });
    }

    #[test]
    fn test_loading_other_view_supersedes_pending() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            let mut users = Box::pin(loader.resolve(AdminView::UserQuery));
            assert!(futures::poll!(users.as_mut()).is_pending());

            let mut rooms = Box::pin(loader.resolve(AdminView::RoomManagement));
            assert!(futures::poll!(rooms.as_mut()).is_pending());

            assert_eq!(users.await, Err(LoadError::Superseded(AdminView::UserQuery)));

            source.release(AdminView::RoomManagement);
            assert_eq!(rooms.await.unwrap(), ViewModule::new(AdminView::RoomManagement));
            assert_eq!(loader.cached(AdminView::UserQuery), None);
            assert_eq!(source.calls.get(), 2);
        });
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        tokio_test::block_on(async {
            let source = Rc::new(GatedSource::default());
            let loader = ModuleLoader::new(source.clone());

            let mut load = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(load.as_mut()).is_pending());
            source.fail(AdminView::GameLogs, "chunk 404");

            let err = load.await.unwrap_err();
            assert_eq!(err.to_string(), "failed to load Game Logs view: chunk 404");
            assert_eq!(loader.cached(AdminView::GameLogs), None);

            // Next navigation tries again from scratch
            let mut retry = Box::pin(loader.resolve(AdminView::GameLogs));
            assert!(futures::poll!(retry.as_mut()).is_pending());
            source.release(AdminView::GameLogs);
            assert!(retry.await.is_ok());
            assert_eq!(source.calls.get(), 2);
        });
    }

    #[test]
    fn test_bundled_modules_resolve_every_admin_view() {
        tokio_test::block_on(async {
            let loader = ModuleLoader::default();
            for view in AdminView::ALL {
                assert_eq!(loader.resolve(view).await.unwrap().view, view);
            }
        });
    }
}
