#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;

/// Authentication state: the current session, if any, and whether the first
/// identity check is still pending.
///
/// Every mutation goes through [`AuthState::apply`] with a sequence number
/// allocated when the originating operation started. A transition older than
/// the last applied one is stale and is discarded, so of two racing
/// operations the later-started one wins.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<Session>,
    pub loading: bool,
    pub last_applied_seq: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            // True until the provider's first credential check resolves.
            loading: true,
            last_applied_seq: 0,
        }
    }
}

impl AuthState {
    /// Apply a session transition. Returns `false` if the transition is
    /// stale (a newer one has already been applied), in which case state is
    /// left untouched.
    pub fn apply(&mut self, seq: u64, user: Option<Session>) -> bool {
        if seq < self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        self.user = user;
        self.loading = false;
        true
    }

    /// True once a session is established.
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }
}
