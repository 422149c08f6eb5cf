use crate::domain::journey::{Endpoint, Journey};
use crate::domain::station::ZoneCatalog;
use crate::domain::tap::{Direction, TapEvent};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct OpenJourney {
    entry: Endpoint,
    sequence: u64,
}

/// Pairs taps into journeys.
///
/// Holds at most one open journey per (user, service-day). A missing key
/// means "no open journey" for that user on that day.
#[derive(Debug, Default)]
pub struct JourneyTracker {
    open: HashMap<(String, NaiveDate), OpenJourney>,
    opened: u64,
}

impl JourneyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one tap and returns the journey it closed, if any.
    ///
    /// Taps at stations missing from `catalog` are ignored outright.
    pub fn observe(&mut self, tap: &TapEvent, catalog: &ZoneCatalog) -> Option<Journey> {
        let Some(station) = catalog.lookup(&tap.station) else {
            debug!(user = %tap.user_id, station = %tap.station, "Skipping tap at unknown station");
            return None;
        };

        let day = tap.service_day();
        let endpoint = Endpoint {
            station: station.id.clone(),
            zone: station.zone,
            at: tap.timestamp,
        };
        let key = (tap.user_id.clone(), day);

        match tap.direction {
            Direction::In => {
                self.opened += 1;
                let fresh = OpenJourney {
                    entry: endpoint,
                    sequence: self.opened,
                };
                self.open
                    .insert(key, fresh)
                    .map(|previous| Journey::missing_exit(tap.user_id.clone(), day, previous.entry))
            }
            Direction::Out => match self.open.remove(&key) {
                Some(open) => Some(Journey::complete(
                    tap.user_id.clone(),
                    day,
                    open.entry,
                    endpoint,
                )),
                None => Some(Journey::missing_entry(tap.user_id.clone(), day, endpoint)),
            },
        }
    }

    /// Closes every journey still open at end of stream as erroneous.
    ///
    /// Journeys come out in the order they were opened.
    pub fn finish(&mut self) -> Vec<Journey> {
        let mut remaining: Vec<_> = self.open.drain().collect();
        remaining.sort_by_key(|(_, open)| (open.entry.at, open.sequence));
        remaining
            .into_iter()
            .map(|((user_id, day), open)| Journey::missing_exit(user_id, day, open.entry))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
