//! Signed-in user, shared through context.

use dioxus::prelude::*;

/// Username of whoever signed in on the Auth view.
///
/// The backend has no token; views send the username with each room call.
#[derive(Clone, Copy, PartialEq)]
pub struct Session {
    username: Signal<Option<String>>,
}

impl Session {
    pub fn username(&self) -> Option<String> {
        self.username.read().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.username.read().is_some()
    }

    pub fn sign_in(&mut self, username: String) {
        tracing::info!(%username, "signed in");
        self.username.set(Some(username));
    }

    pub fn sign_out(&mut self) {
        self.username.set(None);
    }
}

/// Install the session at the app root.
pub fn use_session_provider() -> Session {
    use_context_provider(|| Session {
        username: Signal::new(None),
    })
}

pub fn use_session() -> Session {
    use_context::<Session>()
}
