//! Top navigation bar with the signed-in user and sign-out action.

use leptos::prelude::*;

use crate::net::auth_client::Auth;
use crate::state::auth::AuthState;

/// Site-wide header. Shows sign-in when there is no session, otherwise the
/// user's avatar/name, a compose link, and sign-out.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<Auth>();
    let state = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="nav-bar">
            <a href="/" class="nav-bar__brand">"Dil"</a>
            <span class="nav-bar__spacer"></span>
            {move || {
                let current = state.get();
                if let Some(user) = current.user {
                    let auth = auth.clone();
                    let on_sign_out = move |_| {
                        #[cfg(feature = "hydrate")]
                        {
                            let auth = auth.clone();
                            leptos::task::spawn_local(async move {
                                auth.sign_out().await;
                            });
                        }
                        #[cfg(not(feature = "hydrate"))]
                        {
                            let _ = &auth;
                        }
                    };
                    view! {
                        <nav class="nav-bar__session">
                            <a href="/new" class="btn btn--primary">"Write a post"</a>
                            {user.photo_url.map(|url| view! {
                                <img class="nav-bar__avatar" src=url alt="avatar"/>
                            })}
                            <span class="nav-bar__name">
                                {user.name.unwrap_or_else(|| "Writer".to_owned())}
                            </span>
                            <button class="btn" on:click=on_sign_out>"Sign out"</button>
                        </nav>
                    }
                        .into_any()
                } else if current.loading {
                    view! { <span class="nav-bar__checking">"Checking session..."</span> }
                        .into_any()
                } else {
                    view! { <a href="/login" class="btn btn--primary">"Sign in"</a> }
                        .into_any()
                }
            }}
        </header>
    }
}
