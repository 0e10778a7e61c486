use std::net::IpAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use super::handlers;
use crate::{AuthService, Notifier, SessionRepository, UserRepository};

pub struct AppState<U, S, N>
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    pub service: Arc<AuthService<U, S, N>>,
    /// Peers whose forwarding headers are believed. Empty means none.
    pub trusted_proxies: Arc<Vec<IpAddr>>,
}

impl<U, S, N> AppState<U, S, N>
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    pub fn new(service: AuthService<U, S, N>) -> Self {
        Self {
            service: Arc::new(service),
            trusted_proxies: Arc::new(Vec::new()),
        }
    }

    /// Honour `X-Forwarded-For` / `X-Real-IP` from these peers only.
    #[must_use]
    pub fn with_trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.trusted_proxies = Arc::new(proxies.into_iter().collect());
        self
    }
}

// derive(Clone) would require U and N to be Clone
impl<U, S, N> Clone for AppState<U, S, N>
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            trusted_proxies: Arc::clone(&self.trusted_proxies),
        }
    }
}

/// `POST /signin?userID=<id>` and `POST /refresh`.
///
/// Serve with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// peer address is available when no forwarding header is present.
pub fn auth_routes<U, S, N>() -> Router<AppState<U, S, N>>
where
    U: UserRepository + 'static,
    S: SessionRepository + Clone + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/signin", post(handlers::signin::<U, S, N>))
        .route("/refresh", post(handlers::refresh::<U, S, N>))
}
