use chrono::Utc;

use crate::{config::Settings, error, info, management::StateManager, success, utils, warning};

pub async fn monthly(settings: &Settings) {
    let curator = super::connect(settings).await;

    let pb = utils::spinner("Collecting this month's liked songs...");
    let result = curator.run_monthly(&settings.month_naming()).await;
    pb.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => error!("Monthly sync failed: {}", e),
    };

    info!(
        "Playlist {} ({})",
        result.playlist_name, result.playlist_id
    );
    success!("Added {} tracks", result.added);

    let mut state = match StateManager::new().load().await {
        Ok(s) => s,
        Err(e) => {
            warning!("Cannot read state, starting fresh. Err: {}", e);
            StateManager::new()
        }
    };
    if let Err(e) = state.record_monthly_run(Utc::now()).persist().await {
        warning!("Cannot save state. Err: {}", e);
    }
}
