//! The expiring `dil-auth` cookie.
//!
//! Mirrors session existence as a short-lived boolean so other parts of the
//! system (server-side route gating, mostly) get a cheap "possibly
//! authenticated" hint without a credential round-trip. It is never an
//! authorization input. Writes require a browser environment; off-browser
//! the calls are no-ops.

use crate::net::auth_client::FlagStore;

#[cfg(feature = "hydrate")]
const COOKIE_NAME: &str = "dil-auth";

#[cfg(feature = "hydrate")]
const TTL_DAYS: u32 = 1;

/// Set the flag with its standard one-day expiry.
pub fn set() {
    #[cfg(feature = "hydrate")]
    {
        let max_age = TTL_DAYS * 86_400;
        write_cookie(&format!("{COOKIE_NAME}=true; max-age={max_age}; path=/"));
    }
}

/// Remove the flag.
pub fn clear() {
    #[cfg(feature = "hydrate")]
    {
        write_cookie(&format!("{COOKIE_NAME}=; max-age=0; path=/"));
    }
}

#[cfg(feature = "hydrate")]
fn write_cookie(cookie: &str) {
    use wasm_bindgen::JsCast;

    let doc = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());
    if let Some(doc) = doc {
        if let Err(err) = doc.set_cookie(cookie) {
            leptos::logging::warn!("auth flag write failed: {err:?}");
        }
    }
}

/// [`FlagStore`] over the `dil-auth` cookie.
pub struct CookieFlagStore;

impl FlagStore for CookieFlagStore {
    fn set_authenticated(&self) {
        set();
    }

    fn clear_authenticated(&self) {
        clear();
    }
}
