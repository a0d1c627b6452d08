//! Rate limit classification and per-tier throttling.
//!
//! Every request is first classified into a requests-per-second ceiling
//! ([`determine_rate_limit`]). The [`ThrottleQueueManager`] then routes it
//! into the queue owned by that ceiling, creating the queue on first use.
//! Queues never share admission state, so a slow tier cannot hold back a
//! fast one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classifier;
mod config;
mod detector;
mod manager;
mod queue;
pub mod tiers;

pub use classifier::{determine_rate_limit, is_single_story_request};
pub use config::RateLimitConfig;
pub use detector::{HeaderRateLimitDetector, RateLimitHeaders};
pub use manager::{DEFAULT_INTERVAL, ThrottleQueueManager};
pub use queue::ThrottleQueue;
pub use tiers::{
    ContentTier, DEFAULT_PER_PAGE, MANAGEMENT_API_DEFAULT_RATE_LIMIT, MAX_RATE_LIMIT,
};
