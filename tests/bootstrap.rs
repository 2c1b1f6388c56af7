//! Startup over a real data directory

use startpage::commands::{create_folder, list_shortcuts};
use startpage::config::AppConfig;
use startpage::repository::SHORTCUTS_KEY;
use tempfile::TempDir;

#[test]
fn test_bootstrap_creates_files_and_logs() {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::in_dir(dir.path());

    let mut state = startpage::bootstrap(&config).expect("bootstrap");
    assert_eq!(list_shortcuts(&state).root().len(), 6);

    create_folder(&mut state, "Reading").unwrap();
    let saved = dir.path().join(format!("{}.json", SHORTCUTS_KEY));
    assert!(saved.exists());

    // second start reads what the first one saved
    let reopened = startpage::bootstrap(&config).expect("bootstrap again");
    assert_eq!(*list_shortcuts(&reopened), *list_shortcuts(&state));

    let log_file = config.log_dir.join(format!("{}.log", config.app_name));
    assert!(log_file.exists());
    assert!(rolling_logger::recent_lines()
        .iter()
        .any(|line| line.contains("started")));
}
