use crate::domain::fare::Fare;
use crate::domain::ports::SpendingLedger;
use crate::domain::tap::MonthKey;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone)]
struct UserSpend {
    daily: HashMap<NaiveDate, Fare>,
    monthly: HashMap<MonthKey, Fare>,
    total: Fare,
}

/// An in-memory spending ledger.
///
/// Keeps one `UserSpend` entry per user holding its day and month buckets.
/// Lives only for the duration of a billing run.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    users: HashMap<String, UserSpend>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpendingLedger for InMemoryLedger {
    fn daily(&self, user: &str, day: NaiveDate) -> Fare {
        self.users
            .get(user)
            .and_then(|spend| spend.daily.get(&day))
            .copied()
            .unwrap_or_default()
    }

    fn monthly(&self, user: &str, month: MonthKey) -> Fare {
        self.users
            .get(user)
            .and_then(|spend| spend.monthly.get(&month))
            .copied()
            .unwrap_or_default()
    }

    fn record(&mut self, user: &str, day: NaiveDate, month: MonthKey, amount: Fare) {
        let spend = self.users.entry(user.to_string()).or_default();
        *spend.daily.entry(day).or_default() += amount;
        *spend.monthly.entry(month).or_default() += amount;
        spend.total += amount;
    }

    fn totals(&self) -> BTreeMap<String, Fare> {
        self.users
            .iter()
            .map(|(user, spend)| (user.clone(), spend.total))
            .collect()
    }
}
