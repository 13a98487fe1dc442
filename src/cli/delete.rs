use tabled::Table;

use crate::{config::Settings, error, info, success, utils, warning};

pub async fn delete(settings: &Settings, pattern: &str, dry_run: bool) {
    let curator = super::connect(settings).await;

    let pb = utils::spinner("Scanning playlists...");
    let result = curator.run_delete(pattern, dry_run).await;
    pb.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => error!("Delete failed: {}", e),
    };

    if result.playlists.is_empty() {
        info!("No playlist matches {}", pattern);
        return;
    }

    println!("{}", Table::new(&result.playlists));
    if result.dry_run {
        warning!(
            "Dry run: {} playlists match. Pass --execute to delete them.",
            result.matched
        );
    } else {
        success!("Deleted {} playlists", result.matched);
    }
}
