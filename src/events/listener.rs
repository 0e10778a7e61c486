use async_trait::async_trait;

use super::AuthEvent;

/// Receives every dispatched [`AuthEvent`].
///
/// Listeners run inline with the action that fired the event, in
/// registration order, so keep `handle` short or hand work off to a task.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AuthEvent);
}
