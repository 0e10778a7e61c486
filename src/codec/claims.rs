use serde::{Deserialize, Serialize};

/// Claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Token id shared with the paired refresh token.
    pub jti: String,
    /// Subject - the user id.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Client origin address recorded at issuance.
    pub origin: String,
    /// Issuer (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl AccessTokenClaims {
    /// Returns the user id from the claims.
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Returns the token id.
    pub fn token_id(&self) -> &str {
        &self.jti
    }

    /// Returns true if `origin` differs from the origin recorded at issuance.
    pub fn origin_changed(&self, origin: &str) -> bool {
        self.origin != origin
    }
}
