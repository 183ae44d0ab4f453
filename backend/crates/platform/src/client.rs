//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers. Used to
//! key login rate limiting and to annotate audit records.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Client request metadata (for audit records and rate limiting)
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// Original User-Agent string
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Get IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }

    /// Rate-limit key for this client.
    ///
    /// Falls back to "unknown" when no IP could be determined, so that
    /// clients without an address still share one bucket rather than
    /// bypassing the limiter.
    pub fn rate_limit_key(&self) -> String {
        self.ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Extract the client IP address.
///
/// Order of precedence:
/// 1. First entry of `X-Forwarded-For` (set by the reverse proxy)
/// 2. `X-Real-IP`
/// 3. The socket peer address
pub fn extract_client_ip(headers: &HeaderMap, socket_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                if let Ok(ip) = first.trim().parse() {
                    return Some(ip);
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            if let Ok(ip) = value.trim().parse() {
                return Some(ip);
            }
        }
    }

    socket_ip
}

/// Extract full client metadata from request headers.
pub fn extract_client_info(headers: &HeaderMap, socket_ip: Option<IpAddr>) -> ClientInfo {
    let ip = extract_client_ip(headers, socket_ip);

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    ClientInfo { ip, user_agent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        let socket: IpAddr = "127.0.0.1".parse().unwrap();
        let ip = extract_client_ip(&headers, Some(socket));
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("198.51.100.2".parse().unwrap()));
    }

    #[test]
    fn test_socket_fallback() {
        let headers = HeaderMap::new();
        let socket: IpAddr = "192.0.2.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(socket)), Some(socket));
        assert_eq!(extract_client_ip(&headers, None), None);
    }

    #[test]
    fn test_garbage_forwarded_header_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        let socket: IpAddr = "192.0.2.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(socket)), Some(socket));
    }

    #[test]
    fn test_rate_limit_key_fallback() {
        let info = ClientInfo {
            ip: None,
            user_agent: None,
        };
        assert_eq!(info.rate_limit_key(), "unknown");

        let info = ClientInfo {
            ip: Some("203.0.113.7".parse().unwrap()),
            user_agent: None,
        };
        assert_eq!(info.rate_limit_key(), "203.0.113.7");
    }
}
