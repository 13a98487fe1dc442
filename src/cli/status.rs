use crate::{config::Settings, curate::MonthKey, info, management::StateManager, warning};

pub async fn status(settings: &Settings) {
    let naming = settings.month_naming();
    info!(
        "This month's playlist: {}",
        naming.name_for(MonthKey::current())
    );
    info!("Archive playlist: {}", settings.archive_name());

    match StateManager::new().load().await {
        Ok(state) => {
            match state.state().last_monthly_run_utc {
                Some(at) => info!("Last monthly run: {}", at.to_rfc3339()),
                None => info!("Monthly sync has not run yet"),
            }
            info!("State file: {}", state.path().display());
        }
        Err(e) => warning!("Cannot read state. Err: {}", e),
    }
}
