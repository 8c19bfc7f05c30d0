// ↕️ Anniversary Comparator - total order over streamers
//
// Disclosed dates come first, ordered by their next occurrence.
// Undisclosed dates compare equal so a stable sort keeps roster order.

use crate::date::AnniversaryKind;
use crate::entities::Streamer;
use crate::error::Result;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Sort key for one streamer: its next occurrence, or `None` when undisclosed
pub fn occurrence_key(
    streamer: &Streamer,
    kind: AnniversaryKind,
    reference: NaiveDate,
) -> Result<Option<NaiveDate>> {
    streamer
        .anniversary(kind)
        .map(|date| date.next_occurrence(reference))
        .transpose()
}

/// Order two sort keys: disclosed before undisclosed, then ascending occurrence
pub fn compare_keys(a: &Option<NaiveDate>, b: &Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Compare two streamers by the next occurrence of `kind`
pub fn compare_anniversaries(
    a: &Streamer,
    b: &Streamer,
    kind: AnniversaryKind,
    reference: NaiveDate,
) -> Result<Ordering> {
    let key_a = occurrence_key(a, kind, reference)?;
    let key_b = occurrence_key(b, kind, reference)?;
    Ok(compare_keys(&key_a, &key_b))
}

/// Stable sort by anniversary; each occurrence is normalized once
pub fn sort_by_anniversary<'a, I>(
    roster: I,
    kind: AnniversaryKind,
    reference: NaiveDate,
) -> Result<Vec<(&'a Streamer, Option<NaiveDate>)>>
where
    I: IntoIterator<Item = &'a Streamer>,
{
    let mut keyed = roster
        .into_iter()
        .map(|streamer| occurrence_key(streamer, kind, reference).map(|key| (streamer, key)))
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable: equal keys keep roster order
    keyed.sort_by(|(_, a), (_, b)| compare_keys(a, b));

    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::MonthDay;
    use crate::entities::Region;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn streamer(id: &str, birthday: Option<&str>) -> Streamer {
        let s = Streamer::new(id, Region::Jp, ymd(2020, 1, 1)).with_name("en", id);
        match birthday {
            Some(md) => s.with_birthday(MonthDay::parse(md).unwrap()),
            None => s,
        }
    }

    #[test]
    fn test_disclosed_sorts_before_undisclosed() {
        let reference = ymd(2024, 3, 15);
        let known = streamer("known", Some("12/31"));
        let unknown = streamer("unknown", None);

        let kind = AnniversaryKind::Birthday;
        assert_eq!(compare_anniversaries(&known, &unknown, kind, reference).unwrap(), Ordering::Less);
        assert_eq!(compare_anniversaries(&unknown, &known, kind, reference).unwrap(), Ordering::Greater);
        assert_eq!(compare_anniversaries(&unknown, &unknown, kind, reference).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_uses_next_occurrence() {
        let reference = ymd(2024, 3, 15);
        // 03/14 already passed, so it is next year and sorts after 12/31
        let passed = streamer("passed", Some("03/14"));
        let later = streamer("later", Some("12/31"));
        let today = streamer("today", Some("03/15"));

        let kind = AnniversaryKind::Birthday;
        assert_eq!(compare_anniversaries(&later, &passed, kind, reference).unwrap(), Ordering::Less);
        assert_eq!(compare_anniversaries(&today, &later, kind, reference).unwrap(), Ordering::Less);
        assert_eq!(compare_anniversaries(&today, &today, kind, reference).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable() {
        let reference = ymd(2024, 3, 15);
        let roster = vec![
            streamer("u1", None),
            streamer("b1", Some("04/01")),
            streamer("a", Some("03/20")),
            streamer("u2", None),
            streamer("b2", Some("04/01")),
        ];

        let sorted = sort_by_anniversary(&roster, AnniversaryKind::Birthday, reference).unwrap();
        let ids: Vec<&str> = sorted.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b1", "b2", "u1", "u2"]);
    }
}
