use crate::domain::fare::Fare;
use crate::domain::ports::SpendingLedger;
use crate::domain::tap::MonthKey;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Spending limits per user.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapLimits {
    pub daily: Fare,
    pub monthly: Fare,
}

impl Default for CapLimits {
    fn default() -> Self {
        Self {
            daily: Fare(dec!(15.00)),
            monthly: Fare(dec!(100.00)),
        }
    }
}

/// Meters nominal fares against the remaining daily and monthly headroom.
///
/// Allocation is greedy and order dependent: each journey takes whatever
/// headroom is left when it is billed, and earlier charges are never
/// redistributed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapAllocator {
    limits: CapLimits,
}

impl CapAllocator {
    pub fn new(limits: CapLimits) -> Self {
        Self { limits }
    }

    /// Returns the amount actually billed for a journey and records it in
    /// `ledger`.
    pub fn allocate<L: SpendingLedger + ?Sized>(
        &self,
        ledger: &mut L,
        user: &str,
        day: NaiveDate,
        month: MonthKey,
        nominal: Fare,
    ) -> Fare {
        let spent_today = ledger.daily(user, day);
        if spent_today >= self.limits.daily {
            return Fare::ZERO;
        }

        let spent_this_month = ledger.monthly(user, month);
        if spent_this_month >= self.limits.monthly {
            return Fare::ZERO;
        }

        let billed = nominal
            .min(self.limits.daily - spent_today)
            .min(self.limits.monthly - spent_this_month)
            .max(Fare::ZERO);

        ledger.record(user, day, month, billed);
        billed
    }
}
