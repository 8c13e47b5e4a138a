//! Identity-provider gateway: the seam between the session client and the
//! hosted identity SDK.
//!
//! The SDK performs all credential verification; this module only defines the
//! boundary trait, the sign-in error taxonomy, and the normalization of raw
//! SDK records into [`Session`] values. The browser implementation lives in
//! `net::firebase`; [`InertGateway`] backs server-side rendering, where no
//! interactive flow exists.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use futures::future::LocalBoxFuture;
use thiserror::Error;

use super::types::{ProviderKind, RawIdentity, Session};

/// Why an interactive sign-in did not produce a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SignInError {
    /// The popup was blocked or the flow failed outright.
    #[error("sign-in failed: {reason}")]
    PopupFailed { reason: String },
    /// The user closed or cancelled the popup.
    #[error("sign-in popup was dismissed")]
    PopupDismissed,
    /// Network failure during the popup flow or token exchange.
    #[error("network failure during sign-in: {reason}")]
    Network { reason: String },
    /// The raw identity record carried no provider entries, so the session
    /// could not be attributed to a provider.
    #[error("identity record has no linked provider")]
    MissingProviderData,
    /// A newer session transition started while this sign-in was in flight;
    /// its result was discarded.
    #[error("sign-in superseded by a newer session change")]
    Superseded,
}

/// Credential-change callback registered through the gateway.
pub type IdentityCallback = Box<dyn Fn(Option<RawIdentity>) + Send + Sync>;

/// Boundary to the hosted identity SDK.
///
/// Implementations must deliver credential-change notifications through the
/// `watch_identity` callback for every establish/refresh/revoke transition;
/// that callback is the authoritative source of session truth.
pub trait IdentityGateway: Send + Sync {
    /// Run the interactive popup sign-in flow for `provider`.
    fn sign_in_with_popup(
        &self,
        provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>>;

    /// Revoke the SDK's active credential.
    fn sign_out(&self) -> LocalBoxFuture<'_, ()>;

    /// Subscribe to credential-state changes. `None` means no active
    /// credential.
    fn watch_identity(&self, on_change: IdentityCallback);
}

/// Gateway for environments without a browser (SSR). Sign-in always fails,
/// sign-out is a no-op, and no identity notifications are ever delivered.
pub struct InertGateway;

impl IdentityGateway for InertGateway {
    fn sign_in_with_popup(
        &self,
        _provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>> {
        Box::pin(std::future::ready(Err(SignInError::PopupFailed {
            reason: "not available on server".to_owned(),
        })))
    }

    fn sign_out(&self) -> LocalBoxFuture<'_, ()> {
        Box::pin(std::future::ready(()))
    }

    fn watch_identity(&self, _on_change: IdentityCallback) {}
}

/// Normalize a raw SDK record into a [`Session`] by direct field mapping.
///
/// Provider attribution is explicit: when `preferred` is given (the manual
/// sign-in path), the matching `providerData` entry is used if the account
/// has one; otherwise the first entry is used. An account with no provider
/// entries cannot be normalized.
///
/// # Errors
///
/// Returns [`SignInError::MissingProviderData`] if the record's provider
/// list is empty.
pub fn session_from_identity(
    raw: &RawIdentity,
    preferred: Option<ProviderKind>,
) -> Result<Session, SignInError> {
    let provider = preferred
        .and_then(|kind| {
            raw.provider_data
                .iter()
                .find(|entry| entry.provider_id == kind.provider_id())
        })
        .or_else(|| raw.provider_data.first())
        .ok_or(SignInError::MissingProviderData)?;

    Ok(Session {
        user_id: raw.uid.clone(),
        email: raw.email.clone(),
        name: raw.display_name.clone(),
        token: raw.refresh_token.clone(),
        provider: provider.provider_id.clone(),
        photo_url: raw.photo_url.clone(),
    })
}

/// Map an SDK error code to the sign-in taxonomy.
///
/// Codes follow the SDK's `auth/*` convention; anything unrecognized is a
/// plain popup failure carrying the SDK's message.
#[must_use]
pub fn classify_sdk_error(code: &str, message: &str) -> SignInError {
    let reason = if message.is_empty() {
        if code.is_empty() {
            "unknown sign-in failure".to_owned()
        } else {
            code.to_owned()
        }
    } else {
        message.to_owned()
    };

    match code {
        "auth/popup-closed-by-user" | "auth/cancelled-popup-request" => {
            SignInError::PopupDismissed
        }
        "auth/network-request-failed" => SignInError::Network { reason },
        _ => SignInError::PopupFailed { reason },
    }
}
