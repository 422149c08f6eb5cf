use super::journey::JourneyKind;
use super::station::Zone;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary fare value.
///
/// This is a wrapper around `rust_decimal::Decimal` so that fares, caps and
/// accumulated spend are never mixed up with plain numbers and never suffer
/// floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Fare(pub Decimal);

impl Fare {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Decimal> for Fare {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl Add for Fare {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Fare {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Fare {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// The flat + zone fare model.
///
/// A complete journey costs `base_fee` plus the band price of both its entry
/// and exit zones. An erroneous journey always costs `erroneous_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FareSchedule {
    pub base_fee: Fare,
    pub erroneous_fee: Fare,
    /// Zone 1.
    pub zone_1: Fare,
    /// Zones 2 and 3.
    pub zone_2_3: Fare,
    /// Zones 4 and 5.
    pub zone_4_5: Fare,
    /// Zone 6 and everything beyond.
    pub zone_6_plus: Fare,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fee: Fare(dec!(2.00)),
            erroneous_fee: Fare(dec!(5.00)),
            zone_1: Fare(dec!(0.80)),
            zone_2_3: Fare(dec!(0.50)),
            zone_4_5: Fare(dec!(0.30)),
            zone_6_plus: Fare(dec!(0.10)),
        }
    }
}

impl FareSchedule {
    pub fn zone_cost(&self, zone: Zone) -> Fare {
        match zone.number() {
            1 => self.zone_1,
            2..=3 => self.zone_2_3,
            4..=5 => self.zone_4_5,
            _ => self.zone_6_plus,
        }
    }

    /// Nominal (pre-cap) fare for a journey outcome.
    pub fn fare_for(&self, kind: &JourneyKind) -> Fare {
        match kind {
            JourneyKind::Complete {
                entry_zone,
                exit_zone,
            } => self.base_fee + self.zone_cost(*entry_zone) + self.zone_cost(*exit_zone),
            JourneyKind::Erroneous(_) => self.erroneous_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journey::ErroneousReason;

    fn complete(entry: u32, exit: u32) -> JourneyKind {
        JourneyKind::Complete {
            entry_zone: Zone::new(entry).unwrap(),
            exit_zone: Zone::new(exit).unwrap(),
        }
    }

    #[test]
    fn test_fare_arithmetic() {
        let f1 = Fare::new(dec!(3.60));
        let f2 = Fare::new(dec!(1.40));
        assert_eq!(f1 + f2, Fare::new(dec!(5.00)));
        assert_eq!(f1 - f2, Fare::new(dec!(2.20)));
    }

    #[test]
    fn test_fare_display_two_decimals() {
        assert_eq!(Fare::new(dec!(15)).to_string(), "15.00");
        assert_eq!(Fare::new(dec!(7.5)).to_string(), "7.50");
        assert_eq!(Fare::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_zone_bands() {
        let schedule = FareSchedule::default();
        let cost = |z| schedule.zone_cost(Zone::new(z).unwrap());
        assert_eq!(cost(1), Fare(dec!(0.80)));
        assert_eq!(cost(2), Fare(dec!(0.50)));
        assert_eq!(cost(3), Fare(dec!(0.50)));
        assert_eq!(cost(4), Fare(dec!(0.30)));
        assert_eq!(cost(5), Fare(dec!(0.30)));
        assert_eq!(cost(6), Fare(dec!(0.10)));
        assert_eq!(cost(42), Fare(dec!(0.10)));
    }

    #[test]
    fn test_zone_1_to_zone_1() {
        let schedule = FareSchedule::default();
        assert_eq!(schedule.fare_for(&complete(1, 1)), Fare(dec!(3.60)));
    }

    #[test]
    fn test_zone_6_to_zone_4() {
        let schedule = FareSchedule::default();
        assert_eq!(schedule.fare_for(&complete(6, 4)), Fare(dec!(2.40)));
    }

    #[test]
    fn test_zone_2_to_zone_3() {
        let schedule = FareSchedule::default();
        assert_eq!(schedule.fare_for(&complete(2, 3)), Fare(dec!(3.00)));
    }

    #[test]
    fn test_erroneous_journey_is_flat() {
        let schedule = FareSchedule::default();
        assert_eq!(
            schedule.fare_for(&JourneyKind::Erroneous(ErroneousReason::MissingExit)),
            Fare(dec!(5.00))
        );
        assert_eq!(
            schedule.fare_for(&JourneyKind::Erroneous(ErroneousReason::MissingEntry)),
            Fare(dec!(5.00))
        );
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = FareSchedule {
            base_fee: Fare(dec!(1.00)),
            erroneous_fee: Fare(dec!(9.99)),
            ..FareSchedule::default()
        };
        assert_eq!(schedule.fare_for(&complete(1, 6)), Fare(dec!(1.90)));
        assert_eq!(
            schedule.fare_for(&JourneyKind::Erroneous(ErroneousReason::MissingEntry)),
            Fare(dec!(9.99))
        );
    }
}
