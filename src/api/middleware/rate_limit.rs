//! Per-client rate limiting using the token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

pub type PeerLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;
pub type ProxiedLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build<K>(
    extractor: K,
    per_second: u64,
    burst: u32,
) -> Result<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
where
    K: KeyExtractor,
{
    if per_second == 0 {
        anyhow::bail!("Invalid rate limit: per-second rate must be greater than 0");
    }
    // The builder takes the replenish interval, not a rate.
    let interval_ms = (1000 / per_second).max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(extractor)
        .per_millisecond(interval_ms)
        .burst_size(burst)
        .finish()
        .context("Invalid rate limit: burst must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Rate limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be served with `into_make_service_with_connect_info::<SocketAddr>`.
pub fn layer(per_second: u64, burst: u32) -> Result<PeerLimitLayer> {
    build(PeerIpKeyExtractor, per_second, burst)
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP`, falling back to
/// the peer address. Use only behind a trusted reverse proxy.
pub fn proxied_layer(per_second: u64, burst: u32) -> Result<ProxiedLimitLayer> {
    build(SmartIpKeyExtractor, per_second, burst)
}
