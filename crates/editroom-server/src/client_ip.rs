use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};

/// Identify the client for rate limiting
///
/// Proxy headers win over the socket peer so deployments behind a load
/// balancer key on the real client, matching the upstream framework's
/// behavior of trusting forwarded addresses when present.
pub fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
        && !first.trim().is_empty()
    {
        return first.trim().to_string();
    }

    if let Some(real_ip) = request.headers().get("x-real-ip")
        && let Ok(val) = real_ip.to_str()
    {
        return val.trim().to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |info| info.0.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = http::Request::builder().uri("/edit-room");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn forwarded_for_takes_first_entry() {
        let request = request_with_headers(&[("x-forwarded-for", "203.0.113.9, 10.0.0.1")]);
        assert_eq!(client_ip(&request), "203.0.113.9");
    }

    #[test]
    fn real_ip_is_second_choice() {
        let request = request_with_headers(&[("x-real-ip", "198.51.100.7")]);
        assert_eq!(client_ip(&request), "198.51.100.7");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut request = request_with_headers(&[]);
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        assert_eq!(client_ip(&request), "127.0.0.1");
    }
}
