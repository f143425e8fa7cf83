//! Sign-in / registration page.

use dioxus::prelude::*;

use crate::api::models::Credentials;
use crate::api::ApiClient;
use crate::app::components::Layout;
use crate::app::session::use_session;
use crate::app::Route;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
}

/// Auth page component.
#[component]
pub fn Auth() -> Element {
    let api = use_context::<ApiClient>();
    let mut session = use_session();
    let nav = navigator();

    let mut mode = use_signal(|| Mode::Login);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut message = use_signal(|| None::<(bool, String)>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let credentials = Credentials {
            username: username().trim().to_string(),
            password: password(),
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            message.set(Some((false, "Enter a username and password".to_string())));
            return;
        }

        spawn(async move {
            busy.set(true);
            let result = match mode() {
                Mode::Login => api.login(&credentials).await,
                Mode::Register => api.register(&credentials).await,
            };
            busy.set(false);

            match (mode(), result) {
                (Mode::Login, Ok(_)) => {
                    session.sign_in(credentials.username);
                    nav.push(Route::Dashboard {});
                }
                (Mode::Register, Ok(resp)) => {
                    message.set(Some((true, resp.message)));
                    mode.set(Mode::Login);
                }
                (_, Err(e)) => message.set(Some((false, e.to_string()))),
            }
        });
    };

    let (heading, action, toggle) = match mode() {
        Mode::Login => ("Sign in", "Sign in", "No account? Register"),
        Mode::Register => ("Register", "Create account", "Have an account? Sign in"),
    };

    rsx! {
        Layout {
            title: heading.to_string(),
            nav_active: "auth".to_string(),
            hide_nav: true,

            article {
                h1 { "{heading}" }
                form { onsubmit: submit,
                    input {
                        r#type: "text",
                        placeholder: "Username",
                        autocomplete: "username",
                        value: "{username}",
                        oninput: move |e| username.set(e.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    button { r#type: "submit", aria_busy: "{busy}", disabled: busy(), "{action}" }
                }
                if let Some((ok, text)) = message() {
                    p { class: if ok { "status-ok" } else { "status-err" }, "{text}" }
                }
                a {
                    href: "#",
                    onclick: move |e| {
                        e.prevent_default();
                        message.set(None);
                        mode.set(if mode() == Mode::Login { Mode::Register } else { Mode::Login });
                    },
                    "{toggle}"
                }
            }
        }
    }
}
