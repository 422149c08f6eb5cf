//! Billing configuration.
//!
//! Every field has a default so an empty file (or no file at all) yields the
//! standard fare model:
//!
//! ```toml
//! ordering = "strict"  # strict | sort | preserve
//!
//! [fares]
//! base_fee = 2.00
//! erroneous_fee = 5.00
//! zone_1 = 0.80
//! zone_2_3 = 0.50
//! zone_4_5 = 0.30
//! zone_6_plus = 0.10
//!
//! [caps]
//! daily = 15.00
//! monthly = 100.00
//! ```

use crate::application::allocator::CapLimits;
use crate::application::ordering::OrderingPolicy;
use crate::domain::fare::FareSchedule;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingConfig {
    pub fares: FareSchedule,
    pub caps: CapLimits,
    pub ordering: OrderingPolicy,
}

impl BillingConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
