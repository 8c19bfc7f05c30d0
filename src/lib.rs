// Streamer Anniversaries - Core Library
// Exposes the anniversary engine for the CLI, API server, and tests

pub mod date;
pub mod error;
pub mod entities;
pub mod comparator;
pub mod filter;
pub mod classify;
pub mod config;

// Re-export commonly used types
pub use date::{
    AnniversaryDate, AnniversaryKind, KindRules, MonthDay,
    compute_age, days_until, normalize_date, parse_full_date, today, truncate_to_date,
    DATE_FORMAT,
};
pub use error::{AnniversaryError, Result};
pub use entities::{
    Agency, Anniversaries, Region, Social, Status, Streamer,
    Roster, SITE_LOCALES,
};
pub use comparator::{compare_anniversaries, sort_by_anniversary};
pub use filter::{filter_roster, RosterFilter};
pub use classify::{classify_roster, Classification, ClassifiedStreamer};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
