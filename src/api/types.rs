use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Returned by `/signin` when the `userID` query parameter is missing.
pub const USER_ID_NOT_PROVIDED: &str = "USER_ID_NOT_PROVIDED";
/// Returned by `/refresh` when the body is not a token pair.
pub const TOKENS_NOT_PROVIDED: &str = "TOKENS_NOT_PROVIDED";

#[derive(Debug, Deserialize)]
pub struct SigninQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl From<AuthError> for ErrorResponse {
    /// Unclassified errors are reported by code only; their text may carry
    /// infrastructure details.
    fn from(err: AuthError) -> Self {
        let code = err.code();
        let message = if code == "INTERNAL_SERVER_ERROR" {
            code.to_owned()
        } else {
            err.to_string()
        };

        ErrorResponse {
            message,
            code: code.to_owned(),
        }
    }
}
