//! Application layer containing the billing orchestration.
//!
//! `BillingEngine` is the primary entry point: it pairs taps into journeys
//! through the `JourneyTracker` and meters each fare through the
//! `CapAllocator`. `ShardedBilling` fans users out over `tokio` tasks, one
//! engine per shard.

pub mod allocator;
pub mod engine;
pub mod ordering;
pub mod sharded;
pub mod tracker;
