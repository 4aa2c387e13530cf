//! Error types for the video data crate.
//!
//! This module provides [`VideoDataError`], the error enum returned by every
//! [`VideoPlatformClient`](crate::provider::VideoPlatformClient) operation,
//! together with a small classification used by callers to decide whether a
//! failure is specific to one channel or likely to affect the whole run.

use thiserror::Error;

/// Errors that can occur while talking to a video platform.
#[derive(Error, Debug)]
pub enum VideoDataError {
    /// The channel reference could not be resolved to an upload feed.
    /// Retrying within the same cycle won't help.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// The provider rejected the request because of request rate (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The daily API quota attached to the credential is exhausted.
    #[error("Quota exceeded: {provider}")]
    QuotaExceeded {
        /// The provider whose quota ran out
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success HTTP status, API error body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the payload did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl VideoDataError {
    /// Returns true if the error is transient and a later cycle may succeed.
    ///
    /// Quota exhaustion counts as transient: the quota resets daily.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::QuotaExceeded { .. }
                | Self::Timeout { .. }
                | Self::Network(_)
        )
    }
}
