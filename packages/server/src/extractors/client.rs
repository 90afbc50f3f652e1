use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// Where the request came from, as far as the server can tell.
pub struct ClientAddr {
    /// Raw `X-Forwarded-For` header, if present and valid UTF-8.
    pub forwarded_for: Option<String>,
    /// Peer address of the TCP connection. Absent when the router is not
    /// served with connect info.
    pub remote_addr: Option<IpAddr>,
}

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded_for = parts
            .headers
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(ClientAddr {
            forwarded_for,
            remote_addr,
        })
    }
}
