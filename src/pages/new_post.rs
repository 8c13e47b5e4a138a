//! Post composition page, gated on an established session.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::components::post_composer::PostComposer;
use crate::state::auth::AuthState;

/// Composer page — redirects to `/login` once the identity check resolves
/// with no user.
#[component]
pub fn NewPostPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let current = state.get();
        if !current.loading && current.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    view! {
        <div class="new-post-page">
            <NavBar/>
            <Show
                when=move || !state.get().loading
                fallback=|| view! { <p class="page-loading">"Checking session..."</p> }
            >
                <PostComposer/>
            </Show>
        </div>
    }
}
