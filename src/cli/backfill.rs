use tabled::Table;

use crate::{config::Settings, curate::MonthKey, error, success, utils};

pub async fn backfill(
    settings: &Settings,
    since: Option<MonthKey>,
    months: Option<u32>,
    until: Option<MonthKey>,
) {
    let curator = super::connect(settings).await;

    let pb = utils::spinner("Backfilling monthly playlists from saved tracks...");
    let result = curator
        .run_monthly_backfill(&settings.month_naming(), since, months, until)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(result) => {
            println!("{}", Table::new(&result.created_or_updated));
            success!(
                "{} months updated, {} tracks added",
                result.created_or_updated.len(),
                result.total_added()
            );
        }
        Err(e) => error!("Backfill failed: {}", e),
    }
}
