//! Context provider installing the session client.
//!
//! Builds the [`Auth`] handle with the real browser collaborators (hydrate)
//! or inert ones (SSR), starts the identity subscription, and provides both
//! the handle and its state signal to the component tree. Must sit inside
//! the router: the client requests route changes through a signal, and an
//! effect here forwards them to the router (effects do not run during SSR,
//! which is also where navigation is meaningless).

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::auth_client::{Auth, Navigator};
use crate::net::identity::IdentityGateway;
use crate::util::auth_flag::CookieFlagStore;

/// Provides `Auth` and `RwSignal<AuthState>` as contexts for all children.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let requested_route = RwSignal::new(None::<String>);
    let route_seam: Navigator =
        Arc::new(move |path: &str| requested_route.set(Some(path.to_owned())));

    #[cfg(feature = "hydrate")]
    let gateway: Arc<dyn IdentityGateway> =
        Arc::new(crate::net::firebase::WebIdentityGateway::new());
    #[cfg(not(feature = "hydrate"))]
    let gateway: Arc<dyn IdentityGateway> = Arc::new(crate::net::identity::InertGateway);

    let auth = Auth::new(gateway, Arc::new(CookieFlagStore), route_seam);
    auth.start();

    provide_context(auth.state());
    provide_context(auth);

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = requested_route.get() {
            navigate(&path, NavigateOptions::default());
        }
    });

    children()
}
