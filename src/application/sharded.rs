use super::engine::{BillingEngine, BillingSummary};
use super::ordering::arrange;
use crate::config::BillingConfig;
use crate::domain::station::ZoneCatalog;
use crate::domain::tap::TapEvent;
use crate::error::{BillingError, Result};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

const SHARD_QUEUE_DEPTH: usize = 1024;

/// Bills users in parallel.
///
/// Every user is pinned to one shard by hashing its id, so all of a user's
/// taps are processed by a single `BillingEngine` in submission order. Users
/// never share state, which makes the merged result identical to a
/// single-engine run.
pub struct ShardedBilling {
    senders: Vec<mpsc::Sender<TapEvent>>,
    workers: Vec<JoinHandle<Result<BillingSummary>>>,
}

impl ShardedBilling {
    /// Spawns `shards` workers on the current tokio runtime.
    ///
    /// A shard count of zero is treated as one.
    pub fn new(catalog: Arc<ZoneCatalog>, config: &BillingConfig, shards: usize) -> Self {
        let shards = shards.max(1);
        let mut senders = Vec::with_capacity(shards);
        let mut workers = Vec::with_capacity(shards);

        for shard in 0..shards {
            let (tx, mut rx) = mpsc::channel::<TapEvent>(SHARD_QUEUE_DEPTH);
            let mut engine = BillingEngine::new(catalog.clone(), config);
            workers.push(tokio::spawn(async move {
                while let Some(tap) = rx.recv().await {
                    engine.process_tap(tap)?;
                }
                debug!(shard, "Shard drained");
                Ok::<_, BillingError>(engine.finish())
            }));
            senders.push(tx);
        }

        Self { senders, workers }
    }

    pub fn shard_count(&self) -> usize {
        self.senders.len()
    }

    fn shard_for(&self, user_id: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        user_id.hash(&mut hasher);
        (hasher.finish() % self.senders.len() as u64) as usize
    }

    /// Routes a tap to the shard that owns its user.
    pub async fn submit(&self, tap: TapEvent) -> Result<()> {
        let shard = self.shard_for(&tap.user_id);
        self.senders[shard]
            .send(tap)
            .await
            .map_err(|_| BillingError::WorkerError(format!("shard {shard} stopped")))
    }

    /// Closes the queues, waits for every shard and merges their totals.
    ///
    /// The first shard error is returned in preference to later ones.
    pub async fn shutdown(self) -> Result<BillingSummary> {
        drop(self.senders);

        let mut merged = BillingSummary::default();
        for worker in self.workers {
            let summary = worker
                .await
                .map_err(|e| BillingError::WorkerError(e.to_string()))??;
            merged.merge(summary);
        }
        Ok(merged)
    }

    /// Bills a whole tap stream across `shards` workers.
    pub async fn run<I>(
        catalog: Arc<ZoneCatalog>,
        config: &BillingConfig,
        shards: usize,
        taps: I,
    ) -> Result<BillingSummary>
    where
        I: IntoIterator<Item = Result<TapEvent>>,
    {
        let arranged = arrange(taps, config.ordering)?;
        let billing = Self::new(catalog, config, shards);
        for tap in arranged {
            let tap = match tap {
                Ok(tap) => tap,
                Err(e) => {
                    // The read error wins over anything the shards report
                    let _ = billing.shutdown().await;
                    return Err(e);
                }
            };
            if let Err(e) = billing.submit(tap).await {
                // A stopped shard reports why on shutdown
                billing.shutdown().await?;
                return Err(e);
            }
        }
        billing.shutdown().await
    }
}
