use super::*;

fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_owned(),
        email: Some("a@x.com".to_owned()),
        name: Some("Ann".to_owned()),
        token: "tok1".to_owned(),
        provider: "google.com".to_owned(),
        photo_url: None,
    }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_has_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.signed_in());
}

#[test]
fn auth_state_default_is_loading_until_first_check() {
    let state = AuthState::default();
    assert!(state.loading);
    assert_eq!(state.last_applied_seq, 0);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn apply_establishes_session_and_clears_loading() {
    let mut state = AuthState::default();

    assert!(state.apply(1, Some(session("u1"))));

    assert!(state.signed_in());
    assert_eq!(state.user.as_ref().map(|u| u.user_id.as_str()), Some("u1"));
    assert!(!state.loading);
    assert_eq!(state.last_applied_seq, 1);
}

#[test]
fn apply_none_clears_session() {
    let mut state = AuthState::default();
    state.apply(1, Some(session("u1")));

    assert!(state.apply(2, None));

    assert!(state.user.is_none());
    assert!(!state.loading);
}

#[test]
fn stale_transition_is_discarded() {
    let mut state = AuthState::default();
    state.apply(2, Some(session("newer")));

    assert!(!state.apply(1, Some(session("older"))));

    assert_eq!(
        state.user.as_ref().map(|u| u.user_id.as_str()),
        Some("newer")
    );
    assert_eq!(state.last_applied_seq, 2);
}

#[test]
fn stale_sign_out_cannot_clear_newer_session() {
    let mut state = AuthState::default();
    state.apply(5, Some(session("u1")));

    assert!(!state.apply(3, None));

    assert!(state.signed_in());
}
