//! The three token operations, each a self-contained action over its
//! collaborators.

pub mod issue_tokens;
pub mod refresh_tokens;
pub mod validate_tokens;

pub use issue_tokens::IssueTokensAction;
pub use refresh_tokens::{ORIGIN_CHANGED_SUBJECT, RefreshTokensAction};
pub use validate_tokens::ValidateTokensAction;
