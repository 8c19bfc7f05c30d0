// ⚙️ Configuration - roster location, default filters, server address
// JSON file with every key optional; environment variables override it.

use crate::date::AnniversaryKind;
use crate::entities::Region;
use crate::filter::RosterFilter;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_ROSTER: &str = "ANNIVERSARY_ROSTER";
pub const ENV_BIND: &str = "ANNIVERSARY_BIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON roster file
    pub roster_path: PathBuf,

    /// Anniversary shown when none is requested
    pub default_kind: AnniversaryKind,

    /// Region preference; empty shows every region
    pub regions: BTreeSet<Region>,

    /// Hide graduated streamers by default
    pub hide_ended: bool,

    /// Address the HTTP server listens on
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roster_path: PathBuf::from("data/streamers.json"),
            default_kind: AnniversaryKind::Birthday,
            regions: BTreeSet::new(),
            hide_ended: false,
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Config {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Load from `path` when given, defaults otherwise; env overrides applied last
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Ok(config.apply_env())
    }

    pub fn apply_env(self) -> Self {
        self.apply_overrides(env::var(ENV_ROSTER).ok(), env::var(ENV_BIND).ok())
    }

    fn apply_overrides(mut self, roster: Option<String>, bind: Option<String>) -> Self {
        if let Some(roster) = roster.filter(|v| !v.is_empty()) {
            self.roster_path = PathBuf::from(roster);
        }
        if let Some(bind) = bind.filter(|v| !v.is_empty()) {
            self.bind_address = bind;
        }
        self
    }

    /// Filter built from the stored preferences plus a search query
    pub fn filter(&self, query: Option<String>) -> RosterFilter {
        RosterFilter {
            query,
            regions: self.regions.clone(),
            hide_ended: self.hide_ended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "default_kind": "debut", "regions": ["jp", "en"] }"#).unwrap();

        assert_eq!(config.default_kind, AnniversaryKind::Debut);
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.roster_path, PathBuf::from("data/streamers.json"));
        assert!(!config.hide_ended);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "regions": ["mars"] }"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{ "default_kind": "graduation" }"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().apply_overrides(Some("/tmp/roster.json".to_string()), Some(String::new()));
        assert_eq!(config.roster_path, PathBuf::from("/tmp/roster.json"));
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_filter_from_preferences() {
        let mut config = Config::default();
        config.regions.insert(Region::Kr);
        config.hide_ended = true;

        let filter = config.filter(Some("nagi".to_string()));
        assert_eq!(filter.query.as_deref(), Some("nagi"));
        assert!(filter.regions.contains(&Region::Kr));
        assert!(filter.hide_ended);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/config.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
