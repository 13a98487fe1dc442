use tabled::Tabled;

use crate::{
    CurateError, Res,
    curate::{
        Curator, MonthKey, MonthNaming,
        bucketing::{self, saved_event},
        pagination,
    },
    spotify::SpotifyApi,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyResult {
    pub playlist_id: String,
    pub playlist_name: String,
    pub added: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct MonthResult {
    pub month: MonthKey,
    pub playlist_name: String,
    pub added: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillResult {
    pub created_or_updated: Vec<MonthResult>,
}

impl BackfillResult {
    pub fn total_added(&self) -> usize {
        self.created_or_updated.iter().map(|r| r.added).sum()
    }
}

/// Inclusive range of months to backfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: MonthKey,
    pub end: MonthKey,
}

impl MonthRange {
    /// Resolves the backfill arguments against `current`.
    ///
    /// Exactly one of `since` and `months` must be given; `months` counts
    /// back from `current` and must be positive. `until` defaults to `current`.
    pub fn resolve(
        since: Option<MonthKey>,
        months: Option<u32>,
        until: Option<MonthKey>,
        current: MonthKey,
    ) -> Res<Self> {
        let start = match (since, months) {
            (Some(since), None) => since,
            (None, Some(0)) => {
                return Err(CurateError::Argument(
                    "months must be at least 1".to_string(),
                ));
            }
            (None, Some(months)) => current.months_back(months).ok_or_else(|| {
                CurateError::Argument(format!("cannot go back {} months", months))
            })?,
            (Some(_), Some(_)) => {
                return Err(CurateError::Argument(
                    "provide either since=YYYY-MM or months=N, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(CurateError::Argument(
                    "provide since=YYYY-MM or months=N".to_string(),
                ));
            }
        };
        let end = until.unwrap_or(current);

        if start > end {
            return Err(CurateError::Argument(format!(
                "since {} is after until {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    pub fn months(&self) -> Vec<MonthKey> {
        MonthKey::range_inclusive(self.start, self.end)
    }
}

/// Saved tracks added at or after the start of `month`, newest first.
///
/// Scans the whole feed; later months are not excluded.
pub async fn saved_since<A: SpotifyApi + ?Sized>(api: &A, month: MonthKey) -> Res<Vec<String>> {
    let start = month.start();
    let mut uris = Vec::new();
    let mut walker = pagination::saved_tracks(api);

    while let Some(page) = walker.next_page().await? {
        uris.extend(
            page.iter()
                .filter_map(saved_event)
                .filter(|(_, added_at)| *added_at >= start)
                .map(|(uri, _)| uri.to_string()),
        );
    }

    Ok(uris)
}

impl<A: SpotifyApi> Curator<A> {
    /// Adds this month's liked songs to this month's playlist.
    pub async fn run_monthly(&self, naming: &MonthNaming) -> Res<MonthlyResult> {
        self.run_monthly_for(naming, MonthKey::current()).await
    }

    /// Adds songs liked since the start of `month` to that month's playlist.
    pub async fn run_monthly_for(
        &self,
        naming: &MonthNaming,
        month: MonthKey,
    ) -> Res<MonthlyResult> {
        let playlist_name = naming.name_for(month);
        let playlist_id = self.ensure_playlist(&playlist_name, false).await?;

        let uris = self
            .retry
            .run("scan saved tracks", || saved_since(&self.api, month))
            .await?;
        let added = self.add_tracks_dedup(&playlist_id, &uris).await?;

        Ok(MonthlyResult {
            playlist_id,
            playlist_name,
            added,
        })
    }

    /// Creates or updates the monthly playlist of every month in the range
    /// from the saved-tracks history, oldest month first.
    ///
    /// `until` defaults to the current month. Months without saved tracks
    /// still get a playlist and report `added == 0`. Months written before a
    /// failure keep their tracks; running again is safe.
    pub async fn run_monthly_backfill(
        &self,
        naming: &MonthNaming,
        since: Option<MonthKey>,
        months: Option<u32>,
        until: Option<MonthKey>,
    ) -> Res<BackfillResult> {
        let range = MonthRange::resolve(since, months, until, MonthKey::current())?;
        self.backfill_range(naming, range).await
    }

    pub async fn backfill_range(
        &self,
        naming: &MonthNaming,
        range: MonthRange,
    ) -> Res<BackfillResult> {
        let buckets = self
            .retry
            .run("bucket saved tracks", || {
                bucketing::bucket_saved_tracks(&self.api, range.start, range.end)
            })
            .await?;

        let mut result = BackfillResult::default();
        for month in range.months() {
            let playlist_name = naming.name_for(month);
            let playlist_id = self.ensure_playlist(&playlist_name, false).await?;
            let added = self
                .add_tracks_dedup(&playlist_id, buckets.get(month))
                .await?;
            log::info!("{}: {} added to {:?}", month, added, playlist_name);

            result.created_or_updated.push(MonthResult {
                month,
                playlist_name,
                added,
            });
        }

        Ok(result)
    }
}
