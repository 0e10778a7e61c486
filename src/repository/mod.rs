//! Collaborator traits and data types.
//!
//! The token engine talks to three interchangeable services. Implement these
//! traits to plug in your own storage, user directory or delivery channel.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`SessionRepository`] | One session record per user, overwritten on every issuance |
//! | [`UserRepository`] | User lookup by id |
//! | [`Notifier`] | Fire-and-forget message delivery |
//!
//! # Data Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | Salted hash of the user's current refresh token |
//! | [`User`] | User id and contact address |
//!
//! # Bundled Implementations
//!
//! - [`StaticUserRepository`] answers every lookup with a fixed address
//! - [`LogNotifier`] writes notifications to the log instead of sending them
//!
//! Enable the `mocks` feature for in-memory implementations useful for testing:
//!
//! - [`MockSessionRepository`]
//! - [`MockUserRepository`]
//! - [`MockNotifier`]

mod notifier;
mod session;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod notifier_mock;
#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use notifier::LogNotifier;
pub use notifier::Notifier;
pub use session::Session;
pub use session::SessionRepository;
pub use user::StaticUserRepository;
pub use user::User;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use notifier_mock::MockNotifier;
#[cfg(any(test, feature = "mocks"))]
pub use notifier_mock::SentNotification;
#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
