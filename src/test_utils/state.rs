use tempfile::TempDir;

use crate::AppState;

/// Create an [AppState] whose stores write to a fresh temporary directory.
///
/// The directory is deleted when the returned [TempDir] is dropped, so keep
/// it alive for the duration of the test.
pub(crate) fn get_test_app_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("Could not create temporary directory");
    let state = AppState::new(dir.path(), "Etc/UTC").expect("Could not create app state");

    (dir, state)
}
