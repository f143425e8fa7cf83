use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::Route;

/// Terminal view for paths no route matches.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!(%path, "no route matched");

    rsx! {
        Layout {
            title: "Not found".to_string(),
            nav_active: String::new(),

            article {
                h1 { "Page not found" }
                p { "Nothing lives at " code { "{path}" } "." }
                Link { to: Route::Dashboard {}, "Back to the dashboard" }
            }
        }
    }
}
