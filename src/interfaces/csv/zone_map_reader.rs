use crate::domain::station::{Station, Zone, ZoneCatalog};
use crate::error::{BillingError, Result};
use serde::Deserialize;
use std::io::Read;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    station: String,
    zone: u32,
}

/// Loads the station zone map from a CSV source with the header
/// `station,zone`.
pub struct ZoneMapReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ZoneMapReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Reads every row into a catalog. Fails on the first bad row.
    pub fn load(self) -> Result<ZoneCatalog> {
        let mut catalog = ZoneCatalog::new();
        for record in self.reader.into_deserialize::<ZoneRecord>() {
            let record = record?;
            let zone = Zone::new(record.zone).ok_or_else(|| BillingError::InvalidZone {
                station: record.station.clone(),
            })?;
            if let Some(previous) = catalog.insert(Station::new(record.station, zone)) {
                warn!(station = %previous.id, replaced = %previous.zone, "Station listed more than once");
            }
        }
        if catalog.is_empty() {
            warn!("Zone map lists no stations, every tap will be skipped");
        } else {
            info!(stations = catalog.len(), "Loaded zone map");
        }
        Ok(catalog)
    }
}
