//! Client address and user agent extraction.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use crate::application::services::RequestOrigin;
use crate::state::AppState;

/// Extractor yielding the caller's IP address and `User-Agent`.
///
/// The IP comes from the socket peer address. When the service is configured
/// as running behind a trusted proxy (`BEHIND_PROXY=true`), the first
/// `X-Forwarded-For` entry or `X-Real-IP` takes precedence.
///
/// Never rejects; missing values are `None`.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub RequestOrigin);

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(RequestOrigin {
            ip_address: client_ip(&parts.headers, peer, state.behind_proxy).map(|ip| ip.to_string()),
            user_agent: user_agent(&parts.headers),
        }))
    }
}

/// Resolves the client IP address.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, behind_proxy: bool) -> Option<IpAddr> {
    if behind_proxy {
        let forwarded: Option<IpAddr> = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok());

        let real_ip = || -> Option<IpAddr> {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return Some(ip);
        }
    }

    peer
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
