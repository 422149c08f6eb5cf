use std::collections::HashMap;
use std::fmt;

/// A fare zone. Zones are numbered from 1 outwards with no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zone(u32);

impl Zone {
    /// Returns `None` for zone 0.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub zone: Zone,
}

impl Station {
    pub fn new(id: impl Into<String>, zone: Zone) -> Self {
        Self {
            id: id.into(),
            zone,
        }
    }
}

/// Lookup from station identifier to its zone.
///
/// Populated once before billing starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    stations: HashMap<String, Station>,
}

impl ZoneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stations(stations: impl IntoIterator<Item = Station>) -> Self {
        let mut catalog = Self::new();
        for station in stations {
            catalog.insert(station);
        }
        catalog
    }

    /// Adds a station, returning the entry it replaced, if any.
    pub fn insert(&mut self, station: Station) -> Option<Station> {
        self.stations.insert(station.id.clone(), station)
    }

    pub fn lookup(&self, station_id: &str) -> Option<&Station> {
        self.stations.get(station_id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
