// 📋 Roster - ordered list of streamers loaded from static data
//
// Loading lives here, outside the engine: filter/classify only ever see
// an in-memory slice. Order is preserved exactly as it appears in the file.

use super::streamer::Streamer;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Locales every streamer must have a name for
pub const SITE_LOCALES: [&str; 2] = ["en", "ja"];

#[derive(Debug, Clone, Default)]
pub struct Roster {
    streamers: Vec<Streamer>,
}

impl Roster {
    /// Build a roster, validating ids and names
    pub fn new(streamers: Vec<Streamer>) -> Result<Self> {
        let roster = Roster { streamers };
        roster.validate()?;
        Ok(roster)
    }

    /// Load roster from a JSON array file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read roster file: {:?}", path.as_ref()))?;

        Roster::from_json_str(&content)
            .with_context(|| format!("Invalid roster file: {:?}", path.as_ref()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let streamers: Vec<Streamer> =
            serde_json::from_str(content).context("Failed to parse roster JSON")?;
        Roster::new(streamers)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (index, streamer) in self.streamers.iter().enumerate() {
            if streamer.id.trim().is_empty() {
                bail!("Streamer at position {} has an empty id", index);
            }
            if !seen.insert(streamer.id.as_str()) {
                bail!("Duplicate streamer id: {}", streamer.id);
            }
            for locale in SITE_LOCALES {
                match streamer.name(locale) {
                    Some(name) if !name.is_empty() => {}
                    _ => bail!("Streamer {} has no {} name", streamer.id, locale),
                }
            }
        }

        Ok(())
    }

    pub fn streamers(&self) -> &[Streamer] {
        &self.streamers
    }

    pub fn get(&self, id: &str) -> Option<&Streamer> {
        self.streamers.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.streamers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streamers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Streamer;
    type IntoIter = std::slice::Iter<'a, Streamer>;

    fn into_iter(self) -> Self::IntoIter {
        self.streamers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER_JSON: &str = r#"[
        {
            "id": "a",
            "name": { "en": "Alpha", "ja": "アルファ" },
            "agency": "nijisanji",
            "region": "jp",
            "status": "active",
            "anniversaries": { "birthday": "03/15", "debut": "2020/03/15" }
        },
        {
            "id": "b",
            "name": { "en": "Beta", "ja": "ベータ", "kr": "베타" },
            "agency": "nijisanji",
            "region": "kr",
            "status": "ended",
            "anniversaries": { "birthday": null, "debut": "2021/07/01" }
        }
    ]"#;

    #[test]
    fn test_load_roster_preserves_order() {
        let roster = Roster::from_json_str(ROSTER_JSON).unwrap();

        assert_eq!(roster.len(), 2);
        let ids: Vec<&str> = roster.streamers().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(roster.get("b").unwrap().name("kr"), Some("베타"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = ROSTER_JSON.replace("\"id\": \"b\"", "\"id\": \"a\"");
        let err = Roster::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("Duplicate streamer id"));
    }

    #[test]
    fn test_missing_site_locale_rejected() {
        let json = ROSTER_JSON.replace("\"ja\": \"アルファ\"", "\"kr\": \"알파\"");
        let err = Roster::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("has no ja name"));
    }

    #[test]
    fn test_malformed_date_fails_load() {
        let json = ROSTER_JSON.replace("\"03/15\"", "\"3/15\"");
        assert!(Roster::from_json_str(&json).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Roster::from_file("/nonexistent/streamers.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read roster file"));
    }
}
