//! Session client driving the identity-provider lifecycle.
//!
//! DESIGN
//! ======
//! [`Auth`] is an explicit context handle, not a global: it owns the
//! [`AuthState`] signal and the three collaborator seams (identity gateway,
//! expiring auth flag, route navigation), all injected at construction.
//! Manual sign-in, manual sign-out, and the SDK's credential-change
//! notifications all funnel into the same apply step, guarded by a sequence
//! number allocated when each operation starts. A result arriving after a
//! newer transition has been applied is discarded, so concurrent sign-ins
//! resolve as cancel-and-replace rather than last-resolving-wins.
//!
//! The auth flag mirrors session existence 1:1. It is a routing hint for the
//! rest of the application, never a credential.

#[cfg(test)]
#[path = "auth_client_test.rs"]
mod auth_client_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::{RwSignal, Update};

use crate::net::api;
use crate::net::identity::{IdentityGateway, SignInError, session_from_identity};
use crate::net::types::{ProviderKind, RawIdentity, Session, UserRecord};
use crate::state::auth::AuthState;

/// The expiring "possibly authenticated" flag in client storage.
pub trait FlagStore: Send + Sync {
    fn set_authenticated(&self);
    fn clear_authenticated(&self);
}

/// Route-change callback injected by the shell.
pub type Navigator = Arc<dyn Fn(&str) + Send + Sync>;

/// Clonable handle owning the session state and its collaborators.
#[derive(Clone)]
pub struct Auth {
    state: RwSignal<AuthState>,
    gateway: Arc<dyn IdentityGateway>,
    flags: Arc<dyn FlagStore>,
    navigate: Navigator,
    next_seq: Arc<AtomicU64>,
}

impl Auth {
    pub fn new(gateway: Arc<dyn IdentityGateway>, flags: Arc<dyn FlagStore>, navigate: Navigator) -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            gateway,
            flags,
            navigate,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The reactive auth state, for components that only read.
    #[must_use]
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    /// Subscribe to the SDK's credential-change notifications. Call once,
    /// when the handle is installed; the subscription lives for the page.
    pub fn start(&self) {
        let auth = self.clone();
        self.gateway
            .watch_identity(Box::new(move |raw| auth.handle_identity(raw)));
    }

    /// Run the interactive popup sign-in flow and establish a session.
    ///
    /// On success the session is applied, the auth flag is set, and the
    /// client navigates to `redirect` (if given) exactly once, after the
    /// session is visible. The server-side user upsert happens last and is
    /// best-effort.
    ///
    /// # Errors
    ///
    /// Popup and normalization failures are returned as [`SignInError`];
    /// the state is left without a session and no longer loading. If a newer
    /// transition was applied while the popup was open, the result is
    /// discarded and [`SignInError::Superseded`] is returned.
    pub async fn sign_in(
        &self,
        provider: ProviderKind,
        redirect: Option<&str>,
    ) -> Result<Session, SignInError> {
        let seq = self.begin();
        self.state.update(|s| s.loading = true);

        let raw = match self.gateway.sign_in_with_popup(provider).await {
            Ok(raw) => raw,
            Err(err) => {
                self.finish_failed(seq);
                return Err(err);
            }
        };

        let session = match session_from_identity(&raw, Some(provider)) {
            Ok(session) => session,
            Err(err) => {
                self.finish_failed(seq);
                return Err(err);
            }
        };

        if !self.apply(seq, Some(session.clone())) {
            return Err(SignInError::Superseded);
        }

        if let Some(path) = redirect {
            (self.navigate)(path);
        }

        api::upsert_user(&UserRecord::from(&session)).await;

        Ok(session)
    }

    /// Sign out and return to the application root.
    ///
    /// Navigation happens first so the signed-in UI never flashes during
    /// the provider round-trip; the session and flag are cleared once the
    /// provider confirms.
    pub async fn sign_out(&self) {
        let seq = self.begin();
        (self.navigate)("/");
        self.gateway.sign_out().await;
        self.apply(seq, None);
    }

    /// Apply a credential-change notification from the SDK.
    ///
    /// This is the authoritative path: it handles silent refresh on page
    /// load, token revocation, and the echo of manual sign-in/out. A record
    /// that cannot be normalized is treated as signed-out.
    pub fn handle_identity(&self, raw: Option<RawIdentity>) {
        let seq = self.begin();
        let next = match raw {
            Some(raw) => match session_from_identity(&raw, None) {
                Ok(session) => Some(session),
                Err(err) => {
                    leptos::logging::warn!("identity record rejected: {err}");
                    None
                }
            },
            None => None,
        };
        self.apply(seq, next);
    }

    fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Single apply step shared by all three call sites. Mirrors the flag
    /// to session existence only when the transition actually lands.
    fn apply(&self, seq: u64, next: Option<Session>) -> bool {
        let signed_in = next.is_some();
        let mut applied = false;
        self.state.update(|s| applied = s.apply(seq, next));

        if !applied {
            leptos::logging::warn!("discarding stale session transition (seq {seq})");
            return false;
        }

        if signed_in {
            self.flags.set_authenticated();
        } else {
            self.flags.clear_authenticated();
        }
        true
    }

    /// Clear the loading flag after a failed sign-in, unless a newer
    /// transition already owns the state.
    fn finish_failed(&self, seq: u64) {
        self.state.update(|s| {
            if seq >= s.last_applied_seq {
                s.loading = false;
            }
        });
    }
}
