use super::*;

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use leptos::prelude::GetUntracked;

use crate::net::identity::{IdentityCallback, InertGateway};
use crate::net::types::RawProviderData;

// =============================================================
// Mock collaborators
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    FlagSet,
    FlagCleared,
    Navigated(String),
    ProviderSignOut,
}

type Log = Arc<Mutex<Vec<Event>>>;

fn record(log: &Log, event: Event) {
    log.lock().expect("event log").push(event);
}

fn events(log: &Log) -> Vec<Event> {
    log.lock().expect("event log").clone()
}

struct RecordingFlags {
    log: Log,
}

impl FlagStore for RecordingFlags {
    fn set_authenticated(&self) {
        record(&self.log, Event::FlagSet);
    }

    fn clear_authenticated(&self) {
        record(&self.log, Event::FlagCleared);
    }
}

fn navigator(log: &Log) -> Navigator {
    let log = log.clone();
    Arc::new(move |path: &str| record(&log, Event::Navigated(path.to_owned())))
}

fn auth_with(gateway: Arc<dyn IdentityGateway>, log: &Log) -> Auth {
    Auth::new(
        gateway,
        Arc::new(RecordingFlags { log: log.clone() }),
        navigator(log),
    )
}

fn raw_identity(uid: &str) -> RawIdentity {
    RawIdentity {
        uid: uid.to_owned(),
        email: Some("a@x.com".to_owned()),
        display_name: Some("Ann".to_owned()),
        refresh_token: "tok1".to_owned(),
        provider_data: vec![RawProviderData {
            provider_id: "google.com".to_owned(),
        }],
        photo_url: Some("http://x/p.png".to_owned()),
    }
}

/// Gateway resolving each popup immediately with a scripted result.
struct ScriptedGateway {
    log: Log,
    sign_ins: Mutex<VecDeque<Result<RawIdentity, SignInError>>>,
}

impl ScriptedGateway {
    fn new(log: &Log, sign_ins: Vec<Result<RawIdentity, SignInError>>) -> Self {
        Self {
            log: log.clone(),
            sign_ins: Mutex::new(sign_ins.into()),
        }
    }
}

impl IdentityGateway for ScriptedGateway {
    fn sign_in_with_popup(
        &self,
        _provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>> {
        let next = self
            .sign_ins
            .lock()
            .expect("scripted sign-ins")
            .pop_front()
            .expect("unexpected popup sign-in");
        Box::pin(std::future::ready(next))
    }

    fn sign_out(&self) -> LocalBoxFuture<'_, ()> {
        record(&self.log, Event::ProviderSignOut);
        Box::pin(std::future::ready(()))
    }

    fn watch_identity(&self, _on_change: IdentityCallback) {}
}

/// Gateway whose popups stay open until the test resolves them.
struct PendingGateway {
    receivers: Mutex<VecDeque<oneshot::Receiver<Result<RawIdentity, SignInError>>>>,
}

impl PendingGateway {
    fn new(receivers: Vec<oneshot::Receiver<Result<RawIdentity, SignInError>>>) -> Self {
        Self {
            receivers: Mutex::new(receivers.into()),
        }
    }
}

impl IdentityGateway for PendingGateway {
    fn sign_in_with_popup(
        &self,
        _provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>> {
        let rx = self
            .receivers
            .lock()
            .expect("pending popups")
            .pop_front()
            .expect("unexpected popup sign-in");
        Box::pin(async move {
            rx.await.unwrap_or_else(|_| {
                Err(SignInError::PopupFailed {
                    reason: "popup channel dropped".to_owned(),
                })
            })
        })
    }

    fn sign_out(&self) -> LocalBoxFuture<'_, ()> {
        Box::pin(std::future::ready(()))
    }

    fn watch_identity(&self, _on_change: IdentityCallback) {}
}

/// Gateway that records the credential-change subscription.
#[derive(Default)]
struct WatchGateway {
    callback: Mutex<Option<IdentityCallback>>,
}

impl IdentityGateway for WatchGateway {
    fn sign_in_with_popup(
        &self,
        _provider: ProviderKind,
    ) -> LocalBoxFuture<'_, Result<RawIdentity, SignInError>> {
        Box::pin(std::future::ready(Err(SignInError::PopupFailed {
            reason: "unexpected popup sign-in".to_owned(),
        })))
    }

    fn sign_out(&self) -> LocalBoxFuture<'_, ()> {
        Box::pin(std::future::ready(()))
    }

    fn watch_identity(&self, on_change: IdentityCallback) {
        *self.callback.lock().expect("callback slot") = Some(on_change);
    }
}

// =============================================================
// Manual sign-in
// =============================================================

#[test]
fn sign_in_success_sets_session_then_navigates_once() {
    let log = Log::default();
    let gateway = Arc::new(ScriptedGateway::new(&log, vec![Ok(raw_identity("u1"))]));
    let auth = auth_with(gateway, &log);

    let session = block_on(auth.sign_in(ProviderKind::Google, Some("/new"))).expect("session");

    assert_eq!(session.user_id, "u1");
    let state = auth.state().get_untracked();
    assert_eq!(state.user.map(|u| u.user_id), Some("u1".to_owned()));
    assert!(!state.loading);
    // Flag mirrors the session before navigation fires, and exactly one
    // navigation happens.
    assert_eq!(
        events(&log),
        vec![Event::FlagSet, Event::Navigated("/new".to_owned())]
    );
}

#[test]
fn sign_in_without_redirect_does_not_navigate() {
    let log = Log::default();
    let gateway = Arc::new(ScriptedGateway::new(&log, vec![Ok(raw_identity("u1"))]));
    let auth = auth_with(gateway, &log);

    block_on(auth.sign_in(ProviderKind::Google, None)).expect("session");

    assert_eq!(events(&log), vec![Event::FlagSet]);
}

#[test]
fn failed_sign_in_resets_loading_and_leaves_no_session() {
    let log = Log::default();
    let gateway = Arc::new(ScriptedGateway::new(
        &log,
        vec![Err(SignInError::PopupDismissed)],
    ));
    let auth = auth_with(gateway, &log);

    let err = block_on(auth.sign_in(ProviderKind::Google, Some("/new"))).expect_err("dismissed");

    assert_eq!(err, SignInError::PopupDismissed);
    let state = auth.state().get_untracked();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert!(events(&log).is_empty());
}

#[test]
fn sign_in_with_no_provider_data_is_a_defined_error() {
    let log = Log::default();
    let mut raw = raw_identity("u1");
    raw.provider_data.clear();
    let gateway = Arc::new(ScriptedGateway::new(&log, vec![Ok(raw)]));
    let auth = auth_with(gateway, &log);

    let err = block_on(auth.sign_in(ProviderKind::Google, None)).expect_err("no provider");

    assert_eq!(err, SignInError::MissingProviderData);
    assert!(!auth.state().get_untracked().loading);
    assert!(events(&log).is_empty());
}

#[test]
fn inert_gateway_sign_in_fails_cleanly() {
    let log = Log::default();
    let auth = auth_with(Arc::new(InertGateway), &log);

    let err =
        block_on(auth.sign_in(ProviderKind::Google, Some("/new"))).expect_err("no popup here");

    assert!(matches!(err, SignInError::PopupFailed { .. }));
    assert!(!auth.state().get_untracked().loading);
    assert!(events(&log).is_empty());
}

// =============================================================
// Sign-out
// =============================================================

#[test]
fn sign_out_navigates_home_before_provider_sign_out() {
    let log = Log::default();
    let gateway = Arc::new(ScriptedGateway::new(&log, vec![Ok(raw_identity("u1"))]));
    let auth = auth_with(gateway, &log);
    block_on(auth.sign_in(ProviderKind::Google, None)).expect("session");
    log.lock().expect("event log").clear();

    block_on(auth.sign_out());

    assert!(auth.state().get_untracked().user.is_none());
    assert_eq!(
        events(&log),
        vec![
            Event::Navigated("/".to_owned()),
            Event::ProviderSignOut,
            Event::FlagCleared,
        ]
    );
}

// =============================================================
// Provider notifications
// =============================================================

#[test]
fn identity_notification_establishes_a_session() {
    let log = Log::default();
    let auth = auth_with(Arc::new(InertGateway), &log);

    auth.handle_identity(Some(raw_identity("u2")));

    let state = auth.state().get_untracked();
    assert_eq!(state.user.map(|u| u.user_id), Some("u2".to_owned()));
    assert!(!state.loading);
    assert_eq!(events(&log), vec![Event::FlagSet]);
}

#[test]
fn revoked_credential_clears_session_and_loading() {
    let log = Log::default();
    let auth = auth_with(Arc::new(InertGateway), &log);
    auth.handle_identity(Some(raw_identity("u2")));
    log.lock().expect("event log").clear();

    auth.handle_identity(None);

    let state = auth.state().get_untracked();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(events(&log), vec![Event::FlagCleared]);
}

#[test]
fn clean_no_session_notification_resolves_the_first_check() {
    let log = Log::default();
    let auth = auth_with(Arc::new(InertGateway), &log);
    assert!(auth.state().get_untracked().loading);

    auth.handle_identity(None);

    assert!(!auth.state().get_untracked().loading);
}

#[test]
fn unusable_identity_record_is_treated_as_signed_out() {
    let log = Log::default();
    let auth = auth_with(Arc::new(InertGateway), &log);
    let mut raw = raw_identity("u2");
    raw.provider_data.clear();

    auth.handle_identity(Some(raw));

    assert!(auth.state().get_untracked().user.is_none());
    assert_eq!(events(&log), vec![Event::FlagCleared]);
}

#[test]
fn start_wires_provider_notifications_into_state() {
    let log = Log::default();
    let gateway = Arc::new(WatchGateway::default());
    let auth = auth_with(Arc::clone(&gateway) as Arc<dyn IdentityGateway>, &log);

    auth.start();

    let callback = gateway.callback.lock().expect("callback slot");
    let callback = callback.as_ref().expect("subscribed on start");
    callback(Some(raw_identity("u3")));

    assert_eq!(
        auth.state().get_untracked().user.map(|u| u.user_id),
        Some("u3".to_owned())
    );
}

// =============================================================
// Racing transitions
// =============================================================

#[test]
fn popup_result_after_newer_notification_is_discarded() {
    let log = Log::default();
    let (tx, rx) = oneshot::channel();
    let auth = auth_with(Arc::new(PendingGateway::new(vec![rx])), &log);

    let mut pool = LocalPool::new();
    let handle = pool
        .spawner()
        .spawn_local_with_handle({
            let auth = auth.clone();
            async move { auth.sign_in(ProviderKind::Google, Some("/new")).await }
        })
        .expect("spawn");
    pool.run_until_stalled();

    // Popup is open: the state reports an identity check in flight.
    assert!(auth.state().get_untracked().loading);

    // A provider notification lands while the popup is still open.
    auth.handle_identity(Some(raw_identity("winner")));

    tx.send(Ok(raw_identity("loser"))).expect("send");
    let result = pool.run_until(handle);

    assert_eq!(result.expect_err("stale"), SignInError::Superseded);
    assert_eq!(
        auth.state().get_untracked().user.map(|u| u.user_id),
        Some("winner".to_owned())
    );
    // The superseded sign-in never touched the flag and never navigated.
    assert_eq!(events(&log), vec![Event::FlagSet]);
}

#[test]
fn later_started_sign_in_wins_over_earlier_one() {
    let log = Log::default();
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let auth = auth_with(Arc::new(PendingGateway::new(vec![rx_first, rx_second])), &log);

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let first = spawner
        .spawn_local_with_handle({
            let auth = auth.clone();
            async move { auth.sign_in(ProviderKind::Google, Some("/new")).await }
        })
        .expect("spawn");
    pool.run_until_stalled();
    let second = spawner
        .spawn_local_with_handle({
            let auth = auth.clone();
            async move { auth.sign_in(ProviderKind::Facebook, Some("/new")).await }
        })
        .expect("spawn");
    pool.run_until_stalled();

    // The later-started popup resolves first; the earlier one afterwards.
    tx_second.send(Ok(raw_identity("second"))).expect("send");
    pool.run_until_stalled();
    tx_first.send(Ok(raw_identity("first"))).expect("send");

    let first = pool.run_until(first);
    let second = pool.run_until(second);

    assert_eq!(second.expect("session").user_id, "second");
    assert_eq!(first.expect_err("stale"), SignInError::Superseded);
    assert_eq!(
        auth.state().get_untracked().user.map(|u| u.user_id),
        Some("second".to_owned())
    );
    // Exactly one navigation, from the winning sign-in.
    assert_eq!(
        events(&log),
        vec![Event::FlagSet, Event::Navigated("/new".to_owned())]
    );
}

#[test]
fn failed_stale_sign_in_leaves_newer_session_intact() {
    let log = Log::default();
    let (tx, rx) = oneshot::channel();
    let auth = auth_with(Arc::new(PendingGateway::new(vec![rx])), &log);

    let mut pool = LocalPool::new();
    let handle = pool
        .spawner()
        .spawn_local_with_handle({
            let auth = auth.clone();
            async move { auth.sign_in(ProviderKind::Google, None).await }
        })
        .expect("spawn");
    pool.run_until_stalled();

    auth.handle_identity(Some(raw_identity("winner")));

    tx.send(Err(SignInError::PopupDismissed)).expect("send");
    let result = pool.run_until(handle);

    assert_eq!(result.expect_err("dismissed"), SignInError::PopupDismissed);
    let state = auth.state().get_untracked();
    assert_eq!(state.user.map(|u| u.user_id), Some("winner".to_owned()));
    assert!(!state.loading);
}
