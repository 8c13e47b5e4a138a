//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::pages::{home::HomePage, login::LoginPage, new_post::NewPostPage};
use crate::state::editor::PostDraft;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides shared state contexts and sets up client-side routing. The
/// session client itself is installed by [`AuthProvider`] inside the router,
/// where navigation is available.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let draft = RwSignal::new(PostDraft::default());
    provide_context(draft);

    view! {
        <Stylesheet id="leptos" href="/pkg/dil.css"/>
        <Title text="Dil"/>

        <Router>
            <AuthProvider>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("new") view=NewPostPage/>
                </Routes>
            </AuthProvider>
        </Router>
    }
}
