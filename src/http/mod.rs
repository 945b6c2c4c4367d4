//! HTTP client module
//!
//! Provides the transport used to fetch pages.
//!
//! # Features
//!
//! - **Base URL resolution**: relative resource URIs are joined to the API root
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error classification**: non-2xx, 429 and timeouts map to transport errors

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RawResponse, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
