//! Landing page.

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;

/// Home page — greets the signed-in user or points at sign-in.
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <NavBar/>
            <section class="home-page__hero">
                <h1>"Read, write, and share posts"</h1>
                {move || {
                    let current = state.get();
                    if let Some(user) = current.user {
                        let name = user.name.unwrap_or_else(|| "back".to_owned());
                        view! {
                            <p class="home-page__greeting">
                                {format!("Welcome, {name}.")}
                                " "
                                <a href="/new">"Start a new post"</a>
                            </p>
                        }
                            .into_any()
                    } else if current.loading {
                        view! { <p class="home-page__greeting">"Checking session..."</p> }
                            .into_any()
                    } else {
                        view! {
                            <p class="home-page__greeting">
                                <a href="/login">"Sign in"</a>
                                " to start writing."
                            </p>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
