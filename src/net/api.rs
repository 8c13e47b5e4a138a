//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/unit since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option` outputs instead of panics so a failed request
//! degrades UI behavior without crashing hydration. The user upsert is
//! best-effort by design: a miss never blocks sign-in.

#![allow(clippy::unused_async)]

use super::types::{CreatedPost, NewPost, UserRecord};

/// Create or update the signed-in user via `POST /api/users`.
///
/// The payload is the token-stripped [`UserRecord`]; the refresh token
/// never leaves the client.
pub async fn upsert_user(record: &UserRecord) {
    #[cfg(feature = "hydrate")]
    {
        match gloo_net::http::Request::post("/api/users").json(record) {
            Ok(req) => {
                if let Err(err) = req.send().await {
                    leptos::logging::warn!("user upsert failed: {err}");
                }
            }
            Err(err) => leptos::logging::warn!("user upsert payload rejected: {err}"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = record;
    }
}

/// Publish a post via `POST /api/posts`.
/// Returns `None` if the request fails or on the server.
pub async fn create_post(post: &NewPost) -> Option<CreatedPost> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/posts")
            .json(post)
            .ok()?
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<CreatedPost>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = post;
        None
    }
}
