//! Client identification
//!
//! Derives a stable per-caller key from the socket address, or from
//! `X-Forwarded-For` when the service sits behind a trusted proxy.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Key used when no address is known at all
pub const UNKNOWN_CLIENT: &str = "unknown";

/// First address of `X-Forwarded-For`, if it parses
pub fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse().ok())
}

/// Extract client IP address
///
/// The direct connection address is used unless `trust_proxy` is set, in
/// which case the first `X-Forwarded-For` entry wins. Clients can write that
/// header freely, so it only means something when a proxy overwrites it.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    if trust_proxy {
        if let Some(ip) = forwarded_ip(headers) {
            return Some(ip);
        }
    }
    direct_ip
}

/// Caller key for per-client accounting (rate limiting)
pub fn client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>, trust_proxy: bool) -> String {
    extract_client_ip(headers, direct_ip, trust_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn xff(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_socket_address_wins_by_default() {
        let headers = xff("192.168.1.1");
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct), false), Some(direct));
        assert_eq!(extract_client_ip(&headers, None, false), None);
    }

    #[test]
    fn test_extract_client_ip_xff_behind_proxy() {
        let headers = xff("192.168.1.1, 10.0.0.1");

        let ip = extract_client_ip(&headers, None, true);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_ignores_garbage_xff() {
        let headers = xff("not-an-ip");
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct), true), Some(direct));
    }

    #[test]
    fn test_client_key() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(client_key(&headers, Some(direct), false), "127.0.0.1");
        assert_eq!(client_key(&headers, None, false), UNKNOWN_CLIENT);
    }
}
