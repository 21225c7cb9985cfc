//! Retry handling for rate-limited provider calls.
//!
//! Every text, image and speech call goes through [`RetryPolicy::with_retry`].
//! Only errors that report themselves as retryable (HTTP 429) are retried;
//! everything else is returned on the first failure.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod retry;

pub use retry::RetryPolicy;
