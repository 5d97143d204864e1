//! Cross-zone merge and scoring.
//!
//! Every configured raid zone is queried and the results are merged
//! into one de-duplicated average. A single zone failing must never
//! abort the others, so removing or adding a raid tier degrades
//! gracefully.

use std::collections::HashSet;

use futures_util::future::join_all;

use super::client::{Metric, ParseEntry, WclClient};
use super::zones::RAID_ZONES;

/// Combined verification data for one character.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Mean percentile over the deduped encounters, 0 with no entries.
    pub average_percentile: f64,
    pub encounter_count: usize,
    /// Class latched from the first entry that carried one, else from
    /// the character profile. `None` when neither knew it.
    pub class: Option<String>,
    /// Entry count per zone, in `RAID_ZONES` order. Failed zones count
    /// as zero.
    pub zone_counts: Vec<(&'static str, usize)>,
    /// One entry per distinct encounter, first occurrence kept.
    pub encounters: Vec<ParseEntry>,
}

impl WclClient {
    /// Queries every raid zone and merges the results.
    ///
    /// Zones that fail or come back empty are soft failures. An error
    /// is only returned when no zone produced data and at least one
    /// query failed outright; all zones legitimately empty is a valid
    /// zero result.
    pub async fn aggregate(&self, character: &str, metric: Metric) -> anyhow::Result<Aggregation> {
        let queries = RAID_ZONES
            .iter()
            .map(|zone| self.zone_parses(character, zone.id, metric));
        let results = join_all(queries).await;

        let mut combined = Vec::new();
        let mut zone_counts = Vec::with_capacity(RAID_ZONES.len());
        let mut class = None;
        let mut last_error = None;

        for (zone, result) in RAID_ZONES.iter().zip(results) {
            match result {
                Ok(entries) => {
                    tracing::debug!(zone = zone.name, count = entries.len(), "zone query succeeded");
                    if class.is_none() {
                        class = entries.first().and_then(|entry| entry.class.clone());
                    }
                    zone_counts.push((zone.name, entries.len()));
                    combined.extend(entries);
                }
                Err(e) => {
                    tracing::warn!(zone = zone.name, "zone query failed: {:#}", e);
                    zone_counts.push((zone.name, 0));
                    last_error = Some(e);
                }
            }
        }

        if combined.is_empty() {
            if let Some(e) = last_error {
                return Err(e.context("no raid zone produced any parses"));
            }
            return Ok(Aggregation {
                average_percentile: 0.0,
                encounter_count: 0,
                class,
                zone_counts,
                encounters: Vec::new(),
            });
        }

        let encounters = dedup_by_encounter(combined);
        let average = average_percentile(&encounters);

        // Profile fallback when no parse carried a class. Non-fatal.
        if class.is_none() {
            match self.character_details(character).await {
                Ok(details) => class = details.class,
                Err(e) => tracing::warn!(character, "character detail lookup failed: {:#}", e),
            }
        }

        Ok(Aggregation {
            average_percentile: average,
            encounter_count: encounters.len(),
            class,
            zone_counts,
            encounters,
        })
    }
}

/// Keeps the first entry seen for each encounter. Overlapping zone
/// queries can return the same kill more than once.
pub fn dedup_by_encounter(entries: Vec<ParseEntry>) -> Vec<ParseEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.encounter_id))
        .collect()
}

pub fn average_percentile(entries: &[ParseEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|entry| entry.percentile).sum::<f64>() / entries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(encounter_id: u32, percentile: f64) -> ParseEntry {
        ParseEntry {
            encounter_id,
            encounter_name: None,
            character_name: None,
            percentile,
            class: None,
        }
    }

    #[test]
    fn dedup_keeps_first_entry_per_encounter() {
        // Four zones returning [], [], [{5: 80}], [{5: 60}, {9: 40}];
        // the second encounter 5 entry must be discarded.
        let combined = vec![entry(5, 80.0), entry(5, 60.0), entry(9, 40.0)];
        let deduped = dedup_by_encounter(combined);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].encounter_id, 5);
        assert_eq!(deduped[0].percentile, 80.0);
        assert_eq!(deduped[1].encounter_id, 9);
        assert_eq!(average_percentile(&deduped), 60.0);
    }

    #[test]
    fn dedup_ignores_any_number_of_duplicates() {
        let combined = vec![entry(1, 10.0), entry(1, 90.0), entry(1, 50.0), entry(2, 30.0)];
        let deduped = dedup_by_encounter(combined);

        assert_eq!(deduped.len(), 2);
        assert_eq!(average_percentile(&deduped), 20.0);
    }

    #[test]
    fn average_is_zero_without_entries() {
        assert_eq!(average_percentile(&[]), 0.0);
    }

    #[test]
    fn average_stays_within_percentile_bounds() {
        let entries = vec![entry(1, 0.0), entry(2, 100.0), entry(3, 55.5)];
        let average = average_percentile(&entries);
        assert!((0.0..=100.0).contains(&average));
    }
}
