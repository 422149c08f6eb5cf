use crate::domain::fare::Fare;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Serialize)]
struct TotalRecord<'a> {
    user_id: &'a str,
    total_cost: String,
}

/// Writes per-user billed totals as `user_id,total_cost` rows.
pub struct TotalsWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TotalsWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Rows come out in user id order with two-decimal totals.
    pub fn write_totals(&mut self, totals: &BTreeMap<String, Fare>) -> Result<()> {
        if totals.is_empty() {
            self.writer.write_record(["user_id", "total_cost"])?;
        }
        for (user_id, total) in totals {
            self.writer.serialize(TotalRecord {
                user_id,
                total_cost: total.to_string(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
