use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Seconds between replenished requests per client IP.
const REPLENISH_SECONDS: u64 = 2;
const BURST_SIZE: u32 = 10;

pub type AuthRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limiter for the credential endpoints. `None` when the governor
/// rejects the quota.
pub fn rate_limit_layer() -> Option<AuthRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(REPLENISH_SECONDS);
    builder.burst_size(BURST_SIZE);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}
