//! Login page with provider popup sign-in buttons.

use leptos::prelude::*;

use crate::net::auth_client::Auth;
#[cfg(feature = "hydrate")]
use crate::net::identity::SignInError;
use crate::net::types::ProviderKind;

/// Login page — each button runs the matching provider's popup flow and
/// redirects to the composer on success. Failures are shown inline; a
/// superseded attempt is dropped silently since a newer transition won.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<Auth>();
    let error = RwSignal::new(None::<String>);

    let sign_in = move |provider: ProviderKind| {
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = auth.sign_in(provider, Some("/new")).await {
                    if !matches!(err, SignInError::Superseded) {
                        error.set(Some(err.to_string()));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, provider);
        }
    };
    let sign_in_google = sign_in.clone();
    let sign_in_facebook = sign_in;

    view! {
        <div class="login-page">
            <h1>"Dil"</h1>
            <p>"A place to write and share posts"</p>
            <button
                class="login-button login-button--google"
                on:click=move |_| sign_in_google(ProviderKind::Google)
            >
                "Sign in with Google"
            </button>
            <button
                class="login-button login-button--facebook"
                on:click=move |_| sign_in_facebook(ProviderKind::Facebook)
            >
                "Sign in with Facebook"
            </button>
            {move || error.get().map(|message| view! {
                <p class="login-page__error">{message}</p>
            })}
        </div>
    }
}
