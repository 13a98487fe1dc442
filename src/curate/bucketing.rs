use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Res,
    curate::{MonthKey, pagination},
    spotify::SpotifyApi,
    types::SavedTrack,
};

/// Track URIs grouped by the month they were saved in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthBuckets {
    buckets: BTreeMap<MonthKey, Vec<String>>,
}

impl MonthBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, month: MonthKey, uri: String) {
        self.buckets.entry(month).or_default().push(uri);
    }

    /// Tracks of `month`, empty when none were saved that month.
    pub fn get(&self, month: MonthKey) -> &[String] {
        self.buckets.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parses Spotify's `added_at` (RFC 3339, usually `...Z`).
pub fn parse_added_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The URI and save time of an item, or `None` if either is missing or unparsable.
pub fn saved_event(item: &SavedTrack) -> Option<(&str, DateTime<Utc>)> {
    let uri = item.uri()?;
    let added_at = parse_added_at(item.added_at.as_deref()?)?;
    Some((uri, added_at))
}

/// Buckets the saved-tracks feed by month.
///
/// Every valid event is bucketed, also those outside `[lower, upper]`. The
/// feed is newest first, so paging stops after the first page whose events
/// all predate `lower`. A page without any valid event does not stop it.
/// Unsorted data past the stopping page is not seen.
pub async fn bucket_saved_tracks<A: SpotifyApi + ?Sized>(
    api: &A,
    lower: MonthKey,
    upper: MonthKey,
) -> Res<MonthBuckets> {
    let lower_bound = lower.start();
    let mut buckets = MonthBuckets::new();
    let mut walker = pagination::saved_tracks(api);

    while let Some(page) = walker.next_page().await? {
        let mut events = 0;
        let mut all_older = true;
        for (uri, added_at) in page.iter().filter_map(saved_event) {
            buckets.push(MonthKey::of(&added_at), uri.to_string());
            events += 1;
            if added_at >= lower_bound {
                all_older = false;
            }
        }

        if events > 0 && all_older {
            log::debug!(
                "page {} predates {}, stop paging",
                walker.pages_fetched(),
                lower
            );
            break;
        }
    }

    log::debug!(
        "bucketed saved tracks for {}..={} over {} pages",
        lower,
        upper,
        walker.pages_fetched()
    );
    Ok(buckets)
}
