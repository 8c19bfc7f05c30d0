// 🎙️ Streamer Entity - roster member with recurring anniversaries
//
// A streamer is an immutable record: identity (id), display names per locale,
// region/agency/status enums and the anniversary dates we track.

use crate::date::{ymd_format, AnniversaryDate, AnniversaryKind, MonthDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// REGION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Jp,
    En,
    Id,
    In,
    Kr,
    Cn,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Jp,
        Region::En,
        Region::Id,
        Region::In,
        Region::Kr,
        Region::Cn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Jp => "jp",
            Region::En => "en",
            Region::Id => "id",
            Region::In => "in",
            Region::Kr => "kr",
            Region::Cn => "cn",
        }
    }

    /// Human-readable name for display
    pub fn label(&self) -> &'static str {
        match self {
            Region::Jp => "Japan",
            Region::En => "English",
            Region::Id => "Indonesia",
            Region::In => "India",
            Region::Kr => "Korea",
            Region::Cn => "China",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown region: {}", s))
    }
}

// ============================================================================
// STATUS / AGENCY / SOCIAL
// ============================================================================

/// `Active` includes streamers on hiatus; `Ended` means the streamer graduated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Ended,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agency {
    Nijisanji,
    Hololive,
    Independent,
}

impl Agency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agency::Nijisanji => "nijisanji",
            Agency::Hololive => "hololive",
            Agency::Independent => "independent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Agency::Nijisanji => "NIJISANJI",
            Agency::Hololive => "hololive",
            Agency::Independent => "Independent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Social {
    Bilibili,
    Instagram,
    Niconico,
    Tiktok,
    TwitCasting,
    Twitch,
    Twitter,
    Weibo,
    Youtube,
}

// ============================================================================
// ANNIVERSARIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anniversaries {
    /// Year-less, `None` when undisclosed
    #[serde(default)]
    pub birthday: Option<MonthDay>,

    /// Date the debut stream aired live
    #[serde(with = "ymd_format")]
    pub debut: NaiveDate,
}

impl Anniversaries {
    pub fn new(debut: NaiveDate) -> Self {
        Anniversaries { birthday: None, debut }
    }

    /// The tracked date for `kind`, if disclosed
    pub fn get(&self, kind: AnniversaryKind) -> Option<AnniversaryDate> {
        match kind {
            AnniversaryKind::Birthday => self.birthday.map(AnniversaryDate::YearLess),
            AnniversaryKind::Debut => Some(AnniversaryDate::Full(self.debut)),
        }
    }
}

// ============================================================================
// STREAMER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streamer {
    /// Stable identity
    pub id: String,

    /// Display name per locale tag ("en", "ja", "kr", ...)
    #[serde(rename = "name", alias = "names")]
    pub names: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub agency: Agency,
    pub region: Region,
    pub status: Status,

    #[serde(default)]
    pub links: BTreeMap<Social, String>,

    pub anniversaries: Anniversaries,
}

impl Streamer {
    /// Create an active independent streamer with no names yet
    pub fn new(id: impl Into<String>, region: Region, debut: NaiveDate) -> Self {
        Streamer {
            id: id.into(),
            names: BTreeMap::new(),
            image_url: None,
            agency: Agency::Independent,
            region,
            status: Status::Active,
            links: BTreeMap::new(),
            anniversaries: Anniversaries::new(debut),
        }
    }

    /// Builder pattern: add a display name for a locale
    pub fn with_name(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(locale.into(), name.into());
        self
    }

    /// Builder pattern: disclose a birthday
    pub fn with_birthday(mut self, birthday: MonthDay) -> Self {
        self.anniversaries.birthday = Some(birthday);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_agency(mut self, agency: Agency) -> Self {
        self.agency = agency;
        self
    }

    pub fn anniversary(&self, kind: AnniversaryKind) -> Option<AnniversaryDate> {
        self.anniversaries.get(kind)
    }

    pub fn name(&self, locale: &str) -> Option<&str> {
        self.names.get(locale).map(String::as_str)
    }

    pub fn is_ended(&self) -> bool {
        self.status == Status::Ended
    }

    /// Case-insensitive substring match against every locale's name.
    /// `query_lower` must already be lowercased.
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.names
            .values()
            .any(|name| name.to_lowercase().contains(query_lower))
    }
}

// ============================================================================
// TESTS
// ============================================================================
