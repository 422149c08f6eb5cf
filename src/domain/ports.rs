use super::fare::Fare;
use super::tap::MonthKey;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Running spend per user, bucketed by service-day and by month.
///
/// Amounts only ever grow; the cap allocator is the only writer.
pub trait SpendingLedger: Send {
    /// Billed so far for `user` on `day`.
    fn daily(&self, user: &str, day: NaiveDate) -> Fare;
    /// Billed so far for `user` in `month`.
    fn monthly(&self, user: &str, month: MonthKey) -> Fare;
    /// Adds `amount` to the day, month and grand-total buckets of `user`.
    fn record(&mut self, user: &str, day: NaiveDate, month: MonthKey, amount: Fare);
    /// Grand totals for every user that has been billed, sorted by user id.
    fn totals(&self) -> BTreeMap<String, Fare>;
}

pub type SpendingLedgerBox = Box<dyn SpendingLedger>;

impl<L: SpendingLedger + ?Sized> SpendingLedger for Box<L> {
    fn daily(&self, user: &str, day: NaiveDate) -> Fare {
        (**self).daily(user, day)
    }

    fn monthly(&self, user: &str, month: MonthKey) -> Fare {
        (**self).monthly(user, month)
    }

    fn record(&mut self, user: &str, day: NaiveDate, month: MonthKey, amount: Fare) {
        (**self).record(user, day, month, amount)
    }

    fn totals(&self) -> BTreeMap<String, Fare> {
        (**self).totals()
    }
}
