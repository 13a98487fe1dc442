use crate::{config::Settings, curate::ArchiveResult, error, success, utils, warning};

pub async fn weekly(settings: &Settings) {
    let curator = super::connect(settings).await;
    let archive_name = settings.archive_name();

    let pb = utils::spinner("Archiving Discover Weekly...");
    let result = curator.run_discover_weekly_archive(&archive_name).await;
    pb.finish_and_clear();

    match result {
        Ok(ArchiveResult::SourceNotFound) => {
            warning!("Discover Weekly not found, archived 0 tracks")
        }
        Ok(ArchiveResult::Archived {
            playlist_id,
            archived,
        }) => success!(
            "Archived {} tracks into {} ({})",
            archived,
            archive_name,
            playlist_id
        ),
        Err(e) => error!("Archiving failed: {}", e),
    }
}
