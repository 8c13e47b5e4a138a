//! Bindings to the hosted identity SDK shim.
//!
//! The host page initializes the provider SDK and exposes a small surface on
//! `window.dilAuth`: `signInWithPopup(provider)`, `signOut()`, and
//! `onIdTokenChanged(callback)`. Raw identity records cross the JS boundary
//! as JSON. Requires a browser environment; this module is only compiled
//! under the `hydrate` feature.

use futures::future::LocalBoxFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::{Closure, wasm_bindgen};

use super::identity::{IdentityCallback, IdentityGateway, SignInError, classify_sdk_error};
use super::types::{ProviderKind, RawIdentity};

#[wasm_bindgen(js_namespace = ["window", "dilAuth"])]
extern "C" {
    #[wasm_bindgen(js_name = signInWithPopup, catch)]
    async fn sdk_sign_in(provider: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = signOut, catch)]
    async fn sdk_sign_out() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onIdTokenChanged)]
    fn sdk_on_id_token_changed(callback: &Closure<dyn Fn(JsValue)>);
}

/// [`IdentityGateway`] backed by the SDK shim on the host page.
#[derive(Default)]
pub struct WebIdentityGateway;

impl WebIdentityGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IdentityGateway for WebIdentityGateway {
    fn sign_in_with_popup(
        &self,
        provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>> {
        Box::pin(async move {
            let value = sdk_sign_in(provider.popup_name())
                .await
                .map_err(sign_in_error)?;
            parse_identity(&value).ok_or_else(|| SignInError::PopupFailed {
                reason: "malformed identity record".to_owned(),
            })
        })
    }

    fn sign_out(&self) -> LocalBoxFuture<'_, ()> {
        Box::pin(async {
            if let Err(err) = sdk_sign_out().await {
                leptos::logging::warn!("provider sign-out failed: {err:?}");
            }
        })
    }

    fn watch_identity(&self, on_change: IdentityCallback) {
        let callback = Closure::wrap(Box::new(move |value: JsValue| {
            on_change(parse_identity(&value));
        }) as Box<dyn Fn(JsValue)>);
        sdk_on_id_token_changed(&callback);
        // The credential listener lives for the life of the page.
        callback.forget();
    }
}

/// Decode a raw identity record from the SDK. `null`/`undefined` means no
/// active credential.
fn parse_identity(value: &JsValue) -> Option<RawIdentity> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let json: String = js_sys::JSON::stringify(value).ok()?.into();
    match serde_json::from_str(&json) {
        Ok(raw) => Some(raw),
        Err(err) => {
            leptos::logging::warn!("unreadable identity record: {err}");
            None
        }
    }
}

fn sign_in_error(err: JsValue) -> SignInError {
    let code = string_field(&err, "code");
    let message = string_field(&err, "message");
    classify_sdk_error(&code, &message)
}

fn string_field(value: &JsValue, key: &str) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}
