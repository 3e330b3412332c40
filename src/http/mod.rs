//! HTTP client module
//!
//! Provides the HTTP client used by the Unsplash gateway.
//!
//! # Features
//!
//! - **Automatic Retries**: 5xx, timeouts and connection errors, with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Retry-After**: 429 responses wait as long as the server asks

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
