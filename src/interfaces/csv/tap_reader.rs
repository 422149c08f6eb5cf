use crate::domain::tap::{Direction, TapEvent, parse_timestamp};
use crate::error::{BillingError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct TapRecord {
    user_id: String,
    direction: Direction,
    station: String,
    timestamp: String,
}

impl TryFrom<TapRecord> for TapEvent {
    type Error = BillingError;

    fn try_from(record: TapRecord) -> Result<Self> {
        Ok(TapEvent {
            timestamp: parse_timestamp(&record.timestamp)?,
            user_id: record.user_id,
            direction: record.direction,
            station: record.station,
        })
    }
}

/// Reads tap events from a CSV source with the header
/// `user_id,direction,station,timestamp`.
pub struct TapReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TapReader<R> {
    /// Creates a new `TapReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and parses taps in file order.
    pub fn taps(self) -> impl Iterator<Item = Result<TapEvent>> {
        self.reader.into_deserialize::<TapRecord>().map(|result| {
            result
                .map_err(BillingError::from)
                .and_then(TapEvent::try_from)
        })
    }
}
