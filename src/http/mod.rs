//! HTTP transport module
//!
//! Provides the transport adapter every endpoint goes through.
//!
//! # Features
//!
//! - **Rate-limit retry**: 429 responses are retried after `Retry-After`
//! - **Error decoding**: non-2xx responses become structured API errors
//! - **Shared throttle**: a 429 pauses every caller; optional governor pacing
//! - **Authentication**: Integration with auth module

mod client;
mod error_decoder;
mod rate_limit;
mod retry;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestBody, RequestConfig,
    DEFAULT_BASE_URL,
};
pub use error_decoder::{check_response, decode_error, MAX_ERROR_BODY_BYTES};
pub use rate_limit::{Pacing, Throttle};
pub use retry::{retry_duration, RetryPolicy, DEFAULT_RETRY_DURATION};
