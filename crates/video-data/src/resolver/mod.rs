//! Channel resolution support.
//!
//! Providers resolve a configured [`ChannelRef`](crate::models::ChannelRef) to the
//! playlist that lists its uploads. The memo of those lookups lives here so
//! that every provider shares the same, explicitly owned, cache type.

mod cache;

pub use cache::ResolutionCache;
