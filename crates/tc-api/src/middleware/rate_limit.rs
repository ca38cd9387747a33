//! Per-client rate limits for public write endpoints.

use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Comment and reply submissions: one per second sustained, bursts of 10
pub const WRITE_RATE_PER_SECOND: u64 = 1;
pub const WRITE_BURST_SIZE: u32 = 10;

/// Apply the public write rate limit to every route of `router`.
///
/// Clients are keyed by `X-Forwarded-For`/`X-Real-IP`, falling back to the
/// peer address, so the server must be started with connect info.
pub fn limit_public_writes<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let config = GovernorConfigBuilder::default()
        .per_second(WRITE_RATE_PER_SECOND)
        .burst_size(WRITE_BURST_SIZE)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build write rate limiter configuration");

    router.layer(GovernorLayer::new(config))
}
