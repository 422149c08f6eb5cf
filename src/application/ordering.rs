use crate::domain::tap::TapEvent;
use crate::error::{BillingError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::HashMap;

/// How the engine treats tap streams that are not in temporal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Reject a tap that is older than the previous tap of the same user.
    #[default]
    Strict,
    /// Buffer the whole stream and sort it by timestamp before billing.
    Sort,
    /// Bill in arrival order without checking.
    Preserve,
}

/// Tracks the latest tap instant seen per user.
#[derive(Debug, Default)]
pub struct OrderGuard {
    last_seen: HashMap<String, DateTime<FixedOffset>>,
}

impl OrderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, tap: &TapEvent) -> Result<()> {
        match self.last_seen.get_mut(&tap.user_id) {
            Some(previous) if *previous > tap.timestamp => Err(BillingError::OutOfOrder {
                user: tap.user_id.clone(),
                previous: *previous,
                current: tap.timestamp,
            }),
            Some(previous) => {
                *previous = tap.timestamp;
                Ok(())
            }
            None => {
                self.last_seen.insert(tap.user_id.clone(), tap.timestamp);
                Ok(())
            }
        }
    }
}

/// A tap stream after the ordering policy has been applied.
pub enum Arranged<I> {
    Streamed(I),
    Sorted(std::vec::IntoIter<TapEvent>),
}

impl<I> Iterator for Arranged<I>
where
    I: Iterator<Item = Result<TapEvent>>,
{
    type Item = Result<TapEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Arranged::Streamed(taps) => taps.next(),
            Arranged::Sorted(taps) => taps.next().map(Ok),
        }
    }
}

/// Applies `policy` to a raw tap stream.
///
/// Only `Sort` buffers; it fails on the first unreadable record. The other
/// policies stream lazily. Taps are sorted by instant and the sort is stable
/// so taps sharing an instant keep their arrival order.
pub fn arrange<I>(taps: I, policy: OrderingPolicy) -> Result<Arranged<I::IntoIter>>
where
    I: IntoIterator<Item = Result<TapEvent>>,
{
    match policy {
        OrderingPolicy::Sort => {
            let mut buffered = taps.into_iter().collect::<Result<Vec<_>>>()?;
            buffered.sort_by_key(|tap| tap.timestamp);
            Ok(Arranged::Sorted(buffered.into_iter()))
        }
        OrderingPolicy::Strict | OrderingPolicy::Preserve => {
            Ok(Arranged::Streamed(taps.into_iter()))
        }
    }
}
