use super::allocator::CapAllocator;
use super::ordering::{OrderGuard, OrderingPolicy, arrange};
use super::tracker::JourneyTracker;
use crate::config::BillingConfig;
use crate::domain::fare::{Fare, FareSchedule};
use crate::domain::journey::Journey;
use crate::domain::ports::SpendingLedger;
use crate::domain::station::ZoneCatalog;
use crate::domain::tap::TapEvent;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryLedger;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A priced journey: what it would have cost and what was actually billed.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub journey: Journey,
    pub nominal: Fare,
    pub billed: Fare,
}

/// Final result of a billing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingSummary {
    /// Billed total per user, sorted by user id.
    pub totals: BTreeMap<String, Fare>,
    pub journeys: usize,
    pub erroneous: usize,
}

impl BillingSummary {
    /// Folds in the summary of a disjoint set of users.
    pub fn merge(&mut self, other: BillingSummary) {
        self.totals.extend(other.totals);
        self.journeys += other.journeys;
        self.erroneous += other.erroneous;
    }

    pub fn grand_total(&self) -> Fare {
        self.totals.values().fold(Fare::ZERO, |acc, fare| acc + *fare)
    }
}

/// Single-pass billing driver.
///
/// `BillingEngine` feeds taps to the journey tracker in arrival order and
/// routes every journey it emits straight into the cap allocator. It owns
/// all mutable billing state for the run, including the spending ledger.
pub struct BillingEngine<L: SpendingLedger = InMemoryLedger> {
    catalog: Arc<ZoneCatalog>,
    schedule: FareSchedule,
    allocator: CapAllocator,
    tracker: JourneyTracker,
    ledger: L,
    guard: Option<OrderGuard>,
    journeys: usize,
    erroneous: usize,
}

impl BillingEngine {
    /// Creates an engine backed by an in-memory ledger.
    pub fn new(catalog: Arc<ZoneCatalog>, config: &BillingConfig) -> Self {
        Self::with_ledger(catalog, config, InMemoryLedger::new())
    }

    /// Bills a whole tap stream and returns the per-user totals.
    ///
    /// The first unreadable record or ordering violation aborts the run.
    pub fn run<I>(catalog: Arc<ZoneCatalog>, config: &BillingConfig, taps: I) -> Result<BillingSummary>
    where
        I: IntoIterator<Item = Result<TapEvent>>,
    {
        let mut engine = Self::new(catalog, config);
        for tap in arrange(taps, config.ordering)? {
            engine.process_tap(tap?)?;
        }
        Ok(engine.finish())
    }
}

impl<L: SpendingLedger> BillingEngine<L> {
    pub fn with_ledger(catalog: Arc<ZoneCatalog>, config: &BillingConfig, ledger: L) -> Self {
        let guard = (config.ordering == OrderingPolicy::Strict).then(OrderGuard::new);
        Self {
            catalog,
            schedule: config.fares,
            allocator: CapAllocator::new(config.caps),
            tracker: JourneyTracker::new(),
            ledger,
            guard,
            journeys: 0,
            erroneous: 0,
        }
    }

    /// Processes one tap, returning the charge for the journey it closed.
    ///
    /// Taps at unknown stations are dropped before the ordering check, so they
    /// never advance or violate a user's ordering.
    pub fn process_tap(&mut self, tap: TapEvent) -> Result<Option<Charge>> {
        let known = self.catalog.lookup(&tap.station).is_some();
        if let Some(guard) = self.guard.as_mut().filter(|_| known) {
            guard.check(&tap)?;
        }

        Ok(self
            .tracker
            .observe(&tap, &self.catalog)
            .map(|journey| self.bill(journey)))
    }

    fn bill(&mut self, journey: Journey) -> Charge {
        let nominal = self.schedule.fare_for(&journey.kind);
        let billed = self.allocator.allocate(
            &mut self.ledger,
            &journey.user_id,
            journey.day,
            journey.month(),
            nominal,
        );

        self.journeys += 1;
        if !journey.is_complete() {
            self.erroneous += 1;
        }
        debug!(
            user = %journey.user_id,
            day = %journey.day,
            kind = ?journey.kind,
            %nominal,
            %billed,
            "Billed journey"
        );

        Charge {
            journey,
            nominal,
            billed,
        }
    }

    /// Closes any journeys left open as erroneous and returns the charges.
    pub fn flush(&mut self) -> Vec<Charge> {
        self.tracker
            .finish()
            .into_iter()
            .map(|journey| self.bill(journey))
            .collect()
    }

    /// Consumes the engine and returns the final totals.
    pub fn finish(mut self) -> BillingSummary {
        let flushed = self.flush();
        if !flushed.is_empty() {
            debug!(count = flushed.len(), "Closed unfinished journeys");
        }

        let summary = BillingSummary {
            totals: self.ledger.totals(),
            journeys: self.journeys,
            erroneous: self.erroneous,
        };
        info!(
            users = summary.totals.len(),
            journeys = summary.journeys,
            erroneous = summary.erroneous,
            "Billing run complete"
        );
        summary
    }
}
