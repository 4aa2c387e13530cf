//! Video platform client abstractions and implementations.
//!
//! This module contains:
//! - The `VideoPlatformClient` trait that all clients implement
//! - The YouTube Data API v3 implementation
//!
//! Clients receive already-parsed [`ChannelRef`](crate::models::ChannelRef)s.
//! Resolving a handle to an uploads playlist happens inside the client and is
//! memoised in its [`ResolutionCache`](crate::resolver::ResolutionCache).

mod traits;

pub mod youtube;

pub use traits::VideoPlatformClient;
