//! Domain model: stations and zones, tap events, journeys, fares and the
//! spending ledger port.

pub mod fare;
pub mod journey;
pub mod ports;
pub mod station;
pub mod tap;
