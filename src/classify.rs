// 🗂️ Roster Classification - today / upcoming / unknown buckets
//
// The roster is sorted once by next occurrence (undisclosed last), then
// partitioned. Each bucket keeps the sorted relative order.

use crate::comparator::sort_by_anniversary;
use crate::date::{days_until, AnniversaryKind};
use crate::entities::Streamer;
use crate::error::{AnniversaryError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

/// One classified streamer plus the computed fields for its bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedStreamer<'a> {
    pub streamer: &'a Streamer,

    /// Days until the next occurrence (upcoming only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until: Option<i64>,

    /// Anniversary count (upcoming debuts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

impl<'a> ClassifiedStreamer<'a> {
    fn bare(streamer: &'a Streamer) -> Self {
        ClassifiedStreamer {
            streamer,
            days_until: None,
            age: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification<'a> {
    /// Anniversary falls on the reference date
    pub today: Vec<ClassifiedStreamer<'a>>,

    /// Ascending by days until the anniversary
    pub upcoming: Vec<ClassifiedStreamer<'a>>,

    /// Date not disclosed
    pub unknown: Vec<ClassifiedStreamer<'a>>,
}

impl Classification<'_> {
    pub fn len(&self) -> usize {
        self.today.len() + self.upcoming.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify `roster` for `kind` relative to `reference`.
///
/// `reference` must be a single snapshot for the whole call. Fails on the
/// first streamer whose occurrence lands before it.
pub fn classify_roster<'a, I>(
    roster: I,
    kind: AnniversaryKind,
    reference: NaiveDate,
) -> Result<Classification<'a>>
where
    I: IntoIterator<Item = &'a Streamer>,
{
    let mut classification = Classification::default();

    for (streamer, occurrence) in sort_by_anniversary(roster, kind, reference)? {
        let Some(occurrence) = occurrence else {
            classification.unknown.push(ClassifiedStreamer::bare(streamer));
            continue;
        };

        let days = days_until(occurrence, reference);

        if days > 0 {
            let age = streamer
                .anniversary(kind)
                .and_then(|date| date.age_at(reference));
            classification.upcoming.push(ClassifiedStreamer {
                streamer,
                days_until: Some(days),
                age,
            });
        } else if days == 0 {
            classification.today.push(ClassifiedStreamer::bare(streamer));
        } else {
            error!(id = %streamer.id, days, %occurrence, %reference, "occurrence before reference date");
            return Err(AnniversaryError::InvariantViolation {
                id: streamer.id.clone(),
                days_until: days,
            });
        }
    }

    debug!(
        kind = %kind,
        %reference,
        today = classification.today.len(),
        upcoming = classification.upcoming.len(),
        unknown = classification.unknown.len(),
        "roster classified"
    );

    Ok(classification)
}
