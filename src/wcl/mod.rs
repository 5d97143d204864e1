//! Warcraft Logs v1 API access.
//!
//! - `client`: raw endpoint calls
//! - `zones`: raid tier table
//! - `aggregate`: cross-zone merge and scoring

pub mod aggregate;
pub mod client;
pub mod zones;

pub use aggregate::{average_percentile, dedup_by_encounter, Aggregation};
pub use client::{Metric, ParseEntry, WclClient};
pub use zones::{RaidZone, RAID_ZONES};
