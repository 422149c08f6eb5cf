use super::station::Zone;
use super::tap::MonthKey;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// One end of a journey: where and when the card was tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub station: String,
    pub zone: Zone,
    pub at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErroneousReason {
    /// Tapped in, then tapped in again or never tapped out.
    MissingExit,
    /// Tapped out without a matching tap in.
    MissingEntry,
}

/// The outcome that decides which fare rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyKind {
    Complete { entry_zone: Zone, exit_zone: Zone },
    Erroneous(ErroneousReason),
}

/// A closed journey, ready to be priced and billed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub user_id: String,
    /// Service-day the journey is billed against.
    pub day: NaiveDate,
    pub entry: Option<Endpoint>,
    pub exit: Option<Endpoint>,
    pub kind: JourneyKind,
}

impl Journey {
    pub fn complete(user_id: String, day: NaiveDate, entry: Endpoint, exit: Endpoint) -> Self {
        let kind = JourneyKind::Complete {
            entry_zone: entry.zone,
            exit_zone: exit.zone,
        };
        Self {
            user_id,
            day,
            entry: Some(entry),
            exit: Some(exit),
            kind,
        }
    }

    pub fn missing_exit(user_id: String, day: NaiveDate, entry: Endpoint) -> Self {
        Self {
            user_id,
            day,
            entry: Some(entry),
            exit: None,
            kind: JourneyKind::Erroneous(ErroneousReason::MissingExit),
        }
    }

    pub fn missing_entry(user_id: String, day: NaiveDate, exit: Endpoint) -> Self {
        Self {
            user_id,
            day,
            entry: None,
            exit: Some(exit),
            kind: JourneyKind::Erroneous(ErroneousReason::MissingEntry),
        }
    }

    pub fn month(&self) -> MonthKey {
        self.day.into()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.kind, JourneyKind::Complete { .. })
    }
}
