//! Security-focused test suite.
//!
//! Run with: `cargo test --features mocks --test security`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use sessionguard::crypto::{Argon2Hasher, SecretHasher};
use sessionguard::{
    AccessTokenClaims, AuthConfig, AuthError, AuthService, CodecConfig, MockNotifier,
    MockSessionRepository, MockUserRepository, SecretKey, TokenCodec, TokenPair, User,
};

const KEY: &str = "security-suite-signing-key-0123456789";
const USER_ID: &str = "9a4f2c1e-7b3d-4e8a-b6c5-1d2e3f4a5b6c";

fn service() -> AuthService<MockUserRepository, MockSessionRepository, MockNotifier> {
    AuthService::with_hasher(
        MockUserRepository::with_users(vec![User::mock_with_id(USER_ID)]),
        MockSessionRepository::new(),
        MockNotifier::new(),
        TokenCodec::new(CodecConfig::new(KEY).unwrap()),
        Arc::new(Argon2Hasher::new(1024, 1, 1)),
    )
}

// =============================================================================
// Hashing
// =============================================================================

#[test]
fn argon2_produces_different_hashes_for_same_secret() {
    let hasher = Argon2Hasher::new(1024, 1, 1);

    let hash1 = hasher.hash(b"refresh-bytes").unwrap();
    let hash2 = hasher.hash(b"refresh-bytes").unwrap();

    assert_ne!(hash1, hash2);
    assert!(hasher.verify(b"refresh-bytes", &hash1).unwrap());
    assert!(hasher.verify(b"refresh-bytes", &hash2).unwrap());
}

#[test]
fn argon2_wrong_secret_fails_verification() {
    let hasher = Argon2Hasher::new(1024, 1, 1);
    let hash = hasher.hash(b"refresh-bytes").unwrap();

    assert!(!hasher.verify(b"refresh-bytez", &hash).unwrap());
}

// =============================================================================
// Secrets
// =============================================================================

#[test]
fn secret_key_redacts_in_debug_and_display() {
    let key = SecretKey::from(KEY);

    assert!(!format!("{key:?}").contains(KEY));
    assert!(!format!("{key}").contains(KEY));
}

#[test]
fn configs_redact_key_material() {
    let config = AuthConfig::new(KEY).with_refresh_key("separate-refresh-key-0123456789abcd");

    let debug = format!("{config:?} {:?}", config.codec_config().unwrap());
    assert!(!debug.contains(KEY));
    assert!(!debug.contains("separate-refresh-key"));
}

#[tokio::test]
async fn token_pair_redacts_in_debug() {
    let pair = service().issue(USER_ID, "192.0.2.1").await.unwrap();
    let debug = format!("{pair:?}");

    assert!(!debug.contains(&pair.access_token));
    assert!(!debug.contains(&pair.refresh_token));
}

#[test]
fn short_signing_key_rejected() {
    assert!(matches!(
        CodecConfig::new("0123456789abcdef0123456789abcde"),
        Err(AuthError::ConfigurationError(_))
    ));
    assert!(CodecConfig::new("0123456789abcdef0123456789abcdef").is_ok());
}

// =============================================================================
// Access tokens
// =============================================================================

fn claims_for(pair: &TokenPair) -> AccessTokenClaims {
    TokenCodec::new(CodecConfig::new(KEY).unwrap())
        .verify_access_token(&pair.access_token)
        .unwrap()
}

#[tokio::test]
async fn unsigned_token_rejected() {
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();
    let claims = claims_for(&pair);

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

    let forged = TokenPair {
        access_token: format!("{header}.{payload}."),
        refresh_token: pair.refresh_token,
    };

    assert_eq!(
        service.validate(&forged).await.unwrap_err(),
        AuthError::InvalidAccessToken
    );
}

#[tokio::test]
async fn token_signed_with_other_key_rejected() {
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();
    let claims = claims_for(&pair);

    let forged = jsonwebtoken::encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(b"attacker-chosen-key-0123456789abcdef"),
    )
    .unwrap();

    let result = service
        .validate(&TokenPair {
            access_token: forged,
            refresh_token: pair.refresh_token,
        })
        .await;

    assert_eq!(result.unwrap_err(), AuthError::InvalidAccessToken);
}

#[tokio::test]
async fn re_signed_claims_cannot_move_token_to_other_user() {
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();

    let mut claims = claims_for(&pair);
    claims.sub = "1b2c3d4e-5f60-4718-8293-a4b5c6d7e8f9".to_owned();
    claims.exp = Utc::now().timestamp() + 3600;

    // payload edited without the key: signature no longer matches
    let mut parts = pair.access_token.split('.');
    let header = parts.next().unwrap();
    let _payload = parts.next().unwrap();
    let signature = parts.next().unwrap();
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

    let result = service
        .validate(&TokenPair {
            access_token: format!("{header}.{payload}.{signature}"),
            refresh_token: pair.refresh_token,
        })
        .await;

    assert_eq!(result.unwrap_err(), AuthError::InvalidAccessToken);
}

// =============================================================================
// Refresh tokens
// =============================================================================

#[tokio::test]
async fn refresh_tokens_are_unique_per_issuance() {
    let service = service();

    let a = service.issue(USER_ID, "192.0.2.1").await.unwrap();
    let b = service.issue(USER_ID, "192.0.2.1").await.unwrap();

    assert_ne!(a.refresh_token, b.refresh_token);
    assert_ne!(claims_for(&a).jti, claims_for(&b).jti);
}

#[tokio::test]
async fn truncated_refresh_token_rejected() {
    let service = service();
    let pair = service.issue(USER_ID, "192.0.2.1").await.unwrap();

    let short = base64::engine::general_purpose::URL_SAFE.encode([0u8; 8]);

    assert_eq!(
        service
            .validate(&TokenPair {
                access_token: pair.access_token,
                refresh_token: short,
            })
            .await
            .unwrap_err(),
        AuthError::InvalidRefreshToken
    );
}

#[tokio::test]
async fn refresh_token_from_other_deployment_rejected() {
    let ours = service();
    let theirs = AuthService::with_hasher(
        MockUserRepository::with_users(vec![User::mock_with_id(USER_ID)]),
        MockSessionRepository::new(),
        MockNotifier::new(),
        TokenCodec::new(CodecConfig::new("another-deployment-key-0123456789ab").unwrap()),
        Arc::new(Argon2Hasher::new(1024, 1, 1)),
    );

    let own = ours.issue(USER_ID, "192.0.2.1").await.unwrap();
    let foreign = theirs.issue(USER_ID, "192.0.2.1").await.unwrap();

    assert_eq!(
        ours.validate(&TokenPair {
            access_token: own.access_token,
            refresh_token: foreign.refresh_token,
        })
        .await
        .unwrap_err(),
        AuthError::InvalidRefreshToken
    );
}
