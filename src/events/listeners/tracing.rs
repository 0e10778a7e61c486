use async_trait::async_trait;

use crate::events::{AuthEvent, Listener};

/// Emits events through `tracing`. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AuthEvent) {
        match event {
            AuthEvent::OriginChanged {
                user_id,
                previous,
                current,
                ..
            } => tracing::warn!(
                target: "sessionguard::events",
                event_name = event.name(),
                user_id = %user_id,
                previous = %previous,
                current = %current,
                "client origin changed"
            ),
            _ => tracing::info!(
                target: "sessionguard::events",
                event_name = event.name(),
                ?event,
                "auth event"
            ),
        }
    }
}
