use chrono::{TimeZone, Utc};
use monthlify::management::{AppState, StateManager};

#[tokio::test]
async fn test_missing_state_file_loads_default() {
    let dir = tempfile::tempdir().unwrap();
    let manager = StateManager::at(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();

    assert_eq!(manager.state(), &AppState::default());
    assert!(manager.state().last_monthly_run_utc.is_none());
}

#[tokio::test]
async fn test_record_and_reload_monthly_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/state.json");
    let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();

    let mut manager = StateManager::at(&path).load().await.unwrap();
    manager.record_monthly_run(at);
    manager.persist().await.unwrap();

    // Parent directories are created on persist
    assert!(path.is_file());
    assert_eq!(manager.path(), path.as_path());

    let reloaded = StateManager::at(&path).load().await.unwrap();
    assert_eq!(reloaded.state().last_monthly_run_utc, Some(at));
}

#[tokio::test]
async fn test_state_file_is_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"last_monthly_run_utc":"2025-09-01T08:30:00Z"}"#).unwrap();

    let manager = StateManager::at(&path).load().await.unwrap();
    assert_eq!(
        manager.state().last_monthly_run_utc,
        Some(Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap())
    );

    // Unknown or missing fields do not break loading
    std::fs::write(&path, "{}").unwrap();
    let manager = StateManager::at(&path).load().await.unwrap();
    assert!(manager.state().last_monthly_run_utc.is_none());
}

#[tokio::test]
async fn test_corrupt_state_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(StateManager::at(&path).load().await.is_err());
}
