//! Shared UI components for the web UI.

pub mod layout;
pub mod lazy_view;
pub mod nav;

pub use layout::Layout;
pub use lazy_view::LazyView;
pub use nav::Nav;
