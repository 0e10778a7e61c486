pub mod user_id;

pub use user_id::validate_user_id;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UserIdEmpty,
    UserIdInvalidFormat,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserIdEmpty => write!(f, "User id cannot be empty"),
            Self::UserIdInvalidFormat => write!(f, "User id must be a GUID"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::AuthError {
    fn from(_: ValidationError) -> Self {
        crate::AuthError::InvalidUserId
    }
}
