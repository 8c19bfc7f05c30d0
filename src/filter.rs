// 🔎 Roster Filter - name query, region set, ended status
// Filtering never reorders: survivors keep their roster order.

use crate::entities::{Region, Streamer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Case-insensitive substring matched against every locale's name
    #[serde(default)]
    pub query: Option<String>,

    /// Allowed regions; empty means no restriction
    #[serde(default)]
    pub regions: BTreeSet<Region>,

    #[serde(default)]
    pub hide_ended: bool,
}

impl RosterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_regions<I: IntoIterator<Item = Region>>(mut self, regions: I) -> Self {
        self.regions.extend(regions);
        self
    }

    pub fn hide_ended(mut self, hide: bool) -> Self {
        self.hide_ended = hide;
        self
    }

    pub fn apply<'a, I>(&self, roster: I) -> Vec<&'a Streamer>
    where
        I: IntoIterator<Item = &'a Streamer>,
    {
        filter_roster(roster, self.query.as_deref(), Some(&self.regions), self.hide_ended)
    }
}

/// Narrow `roster` by name query, region membership and ended status
pub fn filter_roster<'a, I>(
    roster: I,
    query: Option<&str>,
    regions: Option<&BTreeSet<Region>>,
    hide_ended: bool,
) -> Vec<&'a Streamer>
where
    I: IntoIterator<Item = &'a Streamer>,
{
    let query_lower = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
    let regions = regions.filter(|r| !r.is_empty());
    let keep_status = |s: &Streamer| !(hide_ended && s.is_ended());

    // Fast path: nothing to match, only the status flag applies
    if query_lower.is_none() && regions.is_none() {
        let filtered: Vec<&Streamer> = roster.into_iter().filter(|s| keep_status(s)).collect();
        debug!(kept = filtered.len(), hide_ended, "roster returned unfiltered");
        return filtered;
    }

    let filtered: Vec<&Streamer> = roster
        .into_iter()
        .filter(|s| keep_status(s))
        .filter(|s| query_lower.as_deref().map_or(true, |q| s.matches_query(q)))
        .filter(|s| regions.map_or(true, |r| r.contains(&s.region)))
        .collect();

    debug!(
        kept = filtered.len(),
        query = query_lower.as_deref().unwrap_or(""),
        regions = regions.map_or(0, |r| r.len()),
        hide_ended,
        "roster filtered"
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Status;
    use chrono::NaiveDate;

    fn streamer(id: &str, en: &str, ja: &str, region: Region, status: Status) -> Streamer {
        Streamer::new(id, region, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .with_name("en", en)
            .with_name("ja", ja)
            .with_status(status)
    }

    fn roster() -> Vec<Streamer> {
        vec![
            streamer("1", "Kanae", "叶", Region::Jp, Status::Active),
            streamer("2", "Nagi", "나기", Region::Kr, Status::Active),
            streamer("3", "Kuzuha", "葛葉", Region::Jp, Status::Ended),
            streamer("4", "Millie Parfait", "ミリー", Region::En, Status::Active),
        ]
    }

    fn ids(streamers: &[&Streamer]) -> Vec<String> {
        streamers.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_region_filter_keeps_order() {
        let roster = roster();
        let regions: BTreeSet<Region> = [Region::Jp].into_iter().collect();
        let filtered = filter_roster(&roster, None, Some(&regions), false);
        assert_eq!(ids(&filtered), vec!["1", "3"]);
    }

    #[test]
    fn test_query_matches_any_locale_case_insensitive() {
        let roster = roster();
        assert_eq!(ids(&filter_roster(&roster, Some("KANAE"), None, false)), vec!["1"]);
        assert_eq!(ids(&filter_roster(&roster, Some("葛"), None, false)), vec!["3"]);
        assert_eq!(ids(&filter_roster(&roster, Some("a"), None, false)), vec!["1", "2", "3", "4"]);
        assert!(filter_roster(&roster, Some("nobody"), None, false).is_empty());
    }

    #[test]
    fn test_hide_ended_applies_on_fast_path() {
        let roster = roster();
        let empty = BTreeSet::new();

        let all = filter_roster(&roster, Some(""), Some(&empty), false);
        assert_eq!(ids(&all), vec!["1", "2", "3", "4"]);

        let active = filter_roster(&roster, None, None, true);
        assert_eq!(ids(&active), vec!["1", "2", "4"]);
    }

    #[test]
    fn test_combined_filters() {
        let roster = roster();
        let filter = RosterFilter::new()
            .with_query("u")
            .with_regions([Region::Jp, Region::En])
            .hide_ended(true);

        // Kuzuha matches but has ended; Nagi is in kr
        assert!(ids(&filter.apply(&roster)).is_empty());

        let filter = filter.hide_ended(false);
        assert_eq!(ids(&filter.apply(&roster)), vec!["3"]);
    }

    #[test]
    fn test_default_filter_is_identity() {
        let roster = roster();
        let filtered = RosterFilter::default().apply(&roster);
        assert_eq!(filtered.len(), roster.len());
        assert!(filtered.iter().zip(roster.iter()).all(|(a, b)| a.id == b.id));
    }
}
