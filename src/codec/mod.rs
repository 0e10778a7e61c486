//! Token codec: the stateless cryptographic half of the engine.
//!
//! Access tokens are HMAC-signed JWTs carrying a token id, the subject and the
//! client origin. Refresh tokens are not random secrets: they are the same
//! token id sealed with AES-256-GCM, so a refresh token can only have been
//! produced by the holder of the key, and decrypting it tells us which access
//! token it was issued alongside.
//!
//! # Example
//!
//! ```rust,ignore
//! use sessionguard::codec::{CodecConfig, TokenCodec};
//!
//! let config = CodecConfig::new("your-signing-key-of-at-least-32-bytes")?
//!     .with_access_ttl(chrono::Duration::minutes(15));
//! let codec = TokenCodec::new(config);
//!
//! let access = codec.sign_access_token(user_id, "198.51.100.4", &token_id)?;
//! let refresh = codec.encrypt_refresh_token(&token_id)?;
//!
//! let claims = codec.verify_access_token(&access)?;
//! assert_eq!(codec.decrypt_refresh_token(&refresh)?, claims.jti);
//! ```

mod claims;
mod config;
mod service;

pub use claims::AccessTokenClaims;
pub use config::{CodecConfig, MIN_KEY_LENGTH};
pub use service::{NONCE_LENGTH, TokenCodec, TokenPair};
