#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::{Path, PathBuf};

pub const ZONE_MAP: &str = "tests/fixtures/zone_map.csv";

/// Writes tap rows (user, direction, station, timestamp) under the header.
pub fn write_taps(path: &Path, rows: &[[&str; 4]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["user_id", "direction", "station", "timestamp"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `trips` zone 1 to zone 1 journeys per day for `days` days.
pub fn write_commutes(path: &Path, user: &str, days: u32, trips: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["user_id", "direction", "station", "timestamp"])?;

    for day in 1..=days {
        for trip in 0..trips {
            let hour = 6 + trip * 2;
            wtr.write_record([
                user,
                "IN",
                "Paddington",
                &format!("2024-01-{day:02}T{hour:02}:00:00"),
            ])?;
            wtr.write_record([
                user,
                "OUT",
                "Bank",
                &format!("2024-01-{day:02}T{hour:02}:30:00"),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a month of mixed traffic for `users` riders.
pub fn generate_traffic(path: &Path, users: u32) -> Result<(), Error> {
    let stations = ["Paddington", "Hammersmith", "Richmond", "Epping", "Woolwich"];
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["user_id", "direction", "station", "timestamp"])?;

    for day in 1..=28u32 {
        for user in 0..users {
            let trips = 1 + (user + day) % 6;
            for trip in 0..trips {
                let from = stations[((user + trip) % 5) as usize];
                let to = stations[((user + trip * 3 + day) % 5) as usize];
                let hour = 5 + trip * 3;
                let user_id = format!("user{user:04}");
                wtr.write_record([
                    user_id.as_str(),
                    "IN",
                    from,
                    &format!("2024-02-{day:02}T{hour:02}:00:00"),
                ])?;
                // Every seventh rider forgets to tap out
                if user % 7 != 0 || trip != 0 {
                    wtr.write_record([
                        user_id.as_str(),
                        "OUT",
                        to,
                        &format!("2024-02-{day:02}T{hour:02}:45:00"),
                    ])?;
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn temp_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
