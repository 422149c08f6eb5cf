//! CSV adapters for the zone map, tap records and billed totals.

pub mod tap_reader;
pub mod totals_writer;
pub mod zone_map_reader;
