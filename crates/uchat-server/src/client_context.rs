use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, header::USER_AGENT};
use uchat_config::ClientIpConfig;
use uchat_core::ClientContext;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Middleware that attaches a [`ClientContext`] to every request
pub async fn client_context_middleware(config: ClientIpConfig, mut request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let ip = client_ip(request.headers(), peer, config.trusted_hops);
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    request.extensions_mut().insert(ClientContext::new(ip, user_agent));

    next.run(request).await
}

/// Best-effort caller address
///
/// `X-Forwarded-For` wins when present. With `trusted_hops = n` the entry
/// appended by the outermost trusted proxy (n-th from the right) is used,
/// otherwise the leftmost entry. Then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trusted_hops: Option<usize>) -> String {
    let forwarded: Vec<&str> = headers
        .get_all(FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    let from_forwarded = match trusted_hops {
        Some(hops) if hops > 0 => forwarded.len().checked_sub(hops).map_or(forwarded.first(), |i| forwarded.get(i)),
        _ => forwarded.first(),
    };

    if let Some(ip) = from_forwarded {
        return (*ip).to_owned();
    }

    let real_ip = headers
        .get(REAL_IP)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(ip) = real_ip {
        return ip.to_owned();
    }

    peer.map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}
