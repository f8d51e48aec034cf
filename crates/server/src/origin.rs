// crates/server/src/origin.rs
//! Scheme and host of the request as seen by the client

use crate::state::AppState;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Origin used to build absolute URLs in responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

/// Determines the client-facing origin of a request
///
/// Forwarded headers are only honored when the direct peer is a trusted
/// proxy; otherwise the scheme is `http` and the host comes from `Host`.
pub fn request_origin(headers: &HeaderMap, peer: Option<IpAddr>, trusted: &[IpAddr]) -> RequestOrigin {
    let behind_proxy = peer.is_some_and(|ip| trusted.contains(&ip));

    let mut scheme = "http".to_string();
    let mut host = header_value(headers, HOST.as_str()).unwrap_or_else(|| "localhost".to_string());

    if behind_proxy {
        if let Some(proto) = header_value(headers, X_FORWARDED_PROTO) {
            let proto = proto.to_ascii_lowercase();
            if proto == "http" || proto == "https" {
                scheme = proto;
            }
        }
        if let Some(forwarded_host) = header_value(headers, X_FORWARDED_HOST) {
            host = forwarded_host;
        }
    }

    RequestOrigin { scheme, host }
}

/// First comma-separated value of a header, trimmed
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

impl FromRequestParts<Arc<AppState>> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(request_origin(&parts.headers, peer, &state.trusted_proxies))
    }
}
