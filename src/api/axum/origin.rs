use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use super::error::AppError;
use super::routes::AppState;
use crate::{Notifier, SessionRepository, UserRepository};

/// The client network address a request came from.
///
/// This is the peer address of the connection, available when the server was
/// started with `into_make_service_with_connect_info::<SocketAddr>()`. Only
/// when that peer is one of [`AppState::trusted_proxies`] is the first
/// `X-Forwarded-For` hop (or `X-Real-IP`) used instead. Without a peer
/// address the origin is `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOrigin(pub String);

/// Reads the client address a proxy put in the forwarding headers.
pub fn extract_client_origin(headers: &HeaderMap) -> Option<String> {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(ip.to_owned());
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(ToOwned::to_owned)
}

/// Resolves the origin from the peer address and, for trusted peers only,
/// the forwarding headers.
pub fn resolve_client_origin(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trusted_proxies: &[IpAddr],
) -> String {
    let Some(peer) = peer else {
        return "unknown".to_owned();
    };

    if trusted_proxies.contains(&peer) {
        if let Some(ip) = extract_client_origin(headers) {
            return ip;
        }
    }

    peer.to_string()
}

impl<U, S, N> FromRequestParts<AppState<U, S, N>> for ClientOrigin
where
    U: UserRepository,
    S: SessionRepository + Clone,
    N: Notifier,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, S, N>,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(ClientOrigin(resolve_client_origin(
            &parts.headers,
            peer,
            &state.trusted_proxies,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const PROXY: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(10, 0, 0, 1));
    const PEER: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(198, 51, 100, 66));

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_forwarded_for_first_hop() {
        let mut headers = forwarded("203.0.113.9, 10.0.0.1");
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(
            extract_client_origin(&headers).as_deref(),
            Some("203.0.113.9")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        assert_eq!(
            extract_client_origin(&headers).as_deref(),
            Some("198.51.100.4")
        );
    }

    #[test]
    fn test_no_headers() {
        assert_eq!(extract_client_origin(&HeaderMap::new()), None);
    }

    #[test]
    fn test_headers_ignored_from_untrusted_peer() {
        let headers = forwarded("192.0.2.1");

        assert_eq!(
            resolve_client_origin(&headers, Some(PEER), &[]),
            "198.51.100.66"
        );
        assert_eq!(
            resolve_client_origin(&headers, Some(PEER), &[PROXY]),
            "198.51.100.66"
        );
    }

    #[test]
    fn test_headers_used_from_trusted_proxy() {
        let headers = forwarded("192.0.2.1, 10.0.0.1");

        assert_eq!(
            resolve_client_origin(&headers, Some(PROXY), &[PROXY]),
            "192.0.2.1"
        );
    }

    #[test]
    fn test_trusted_proxy_without_headers_is_the_origin() {
        assert_eq!(
            resolve_client_origin(&HeaderMap::new(), Some(PROXY), &[PROXY]),
            "10.0.0.1"
        );
    }

    #[test]
    fn test_no_peer_address() {
        assert_eq!(
            resolve_client_origin(&forwarded("192.0.2.1"), None, &[]),
            "unknown"
        );
    }
}
