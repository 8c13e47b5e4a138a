//! # dil-client
//!
//! Leptos + WASM front-end for the Dil blogging application: a post
//! composer and the session layer around a hosted identity provider.
//!
//! The session client (`net::auth_client`) is the single source of truth
//! for "who, if anyone, is signed in". It mediates between the provider
//! SDK's popup flows and credential notifications, an expiring client-side
//! auth hint, and the reactive UI state consumed by pages and components.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs panic/log hooks and hydrates the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::hydrate_body(App);
}
