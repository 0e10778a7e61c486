//! Token lifecycle events.
//!
//! Issuance, rotation, origin changes and rejected token pairs are reported as
//! [`AuthEvent`]s. Nothing happens unless listeners are registered.
//!
//! ```rust,ignore
//! use sessionguard::register_event_listeners;
//! use sessionguard::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Custom listeners implement [`Listener`]:
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use sessionguard::events::{AuthEvent, Listener};
//!
//! struct HijackAlarm;
//!
//! #[async_trait]
//! impl Listener for HijackAlarm {
//!     async fn handle(&self, event: &AuthEvent) {
//!         if let AuthEvent::OriginChanged { user_id, current, .. } = event {
//!             // page the on-call
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
