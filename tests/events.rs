//! Events dispatched through the process-wide registry.
//!
//! The registry and the recorder below are shared by every test in this
//! binary, so each test runs under #[serial] and starts by clearing it.
//!
//! Run with: `cargo test --features mocks --test events`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serial_test::serial;
use sessionguard::crypto::Argon2Hasher;
use sessionguard::events::{AuthEvent, Listener};
use sessionguard::{
    AuthService, CodecConfig, MockNotifier, MockSessionRepository, MockUserRepository,
    TokenCodec, TokenPair, User, register_event_listeners,
};

const USER_ID: &str = "9a4f2c1e-7b3d-4e8a-b6c5-1d2e3f4a5b6c";

static RECORDED: Mutex<Vec<AuthEvent>> = Mutex::new(Vec::new());
static REGISTER: Once = Once::new();

struct Recorder;

#[async_trait]
impl Listener for Recorder {
    async fn handle(&self, event: &AuthEvent) {
        RECORDED.lock().unwrap().push(event.clone());
    }
}

fn setup() {
    REGISTER.call_once(|| {
        register_event_listeners(|registry| {
            registry.listen(Recorder);
        });
    });
    RECORDED.lock().unwrap().clear();
}

fn recorded_names() -> Vec<&'static str> {
    RECORDED.lock().unwrap().iter().map(AuthEvent::name).collect()
}

fn service() -> AuthService<MockUserRepository, MockSessionRepository, MockNotifier> {
    AuthService::with_hasher(
        MockUserRepository::with_users(vec![User::mock_with_id(USER_ID)]),
        MockSessionRepository::new(),
        MockNotifier::new(),
        TokenCodec::new(CodecConfig::new("events-signing-key-0123456789abcdef").unwrap()),
        Arc::new(Argon2Hasher::new(1024, 1, 1)),
    )
}

#[tokio::test]
#[serial]
async fn issue_records_canonical_user_and_origin() {
    setup();
    let service = service();

    service
        .issue(&USER_ID.to_uppercase(), "192.0.2.1")
        .await
        .unwrap();

    let events = RECORDED.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    match &events[0] {
        AuthEvent::TokensIssued {
            user_id, origin, ..
        } => {
            assert_eq!(user_id, USER_ID);
            assert_eq!(origin, "192.0.2.1");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn refresh_from_new_origin_records_drift_before_rotation() {
    setup();
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();

    service
        .validate_and_refresh(&pair, "198.51.100.7")
        .await
        .unwrap();

    assert_eq!(
        recorded_names(),
        [
            "token.issued",
            "session.origin_changed",
            "token.issued",
            "token.refreshed"
        ]
    );

    let events = RECORDED.lock().unwrap().clone();
    match &events[1] {
        AuthEvent::OriginChanged {
            previous, current, ..
        } => {
            assert_eq!(previous, "192.0.2.1");
            assert_eq!(current, "198.51.100.7");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn rejected_pair_records_validation_failure() {
    setup();
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();

    let forged = TokenPair {
        access_token: format!("{}x", pair.access_token),
        refresh_token: pair.refresh_token,
    };
    assert!(service.validate(&forged).await.is_err());

    assert_eq!(
        recorded_names(),
        ["token.issued", "token.validation_failed"]
    );
}
