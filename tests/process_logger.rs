// The process-wide logger is global state, so everything touching it runs
// in this single test, in its own test binary.

use std::env;
use std::fs;

#[test]
fn test_process_logger_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    env::set_var("HOME", home.path());
    let dir = home.path().join(".playa");
    assert!(!dir.exists());

    let first = playa_log::logger().unwrap();
    let second = playa_log::logger().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(dir.is_dir());

    let path = dir.join("playa.log");
    assert_eq!(first.path(), Some(path.as_path()));

    first.log_message("hello");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# Logfile created on "));
    assert!(contents.ends_with(": hello\n"));

    let installed = playa_log::install().unwrap();
    assert!(std::ptr::eq(installed, first));
    assert_eq!(log::max_level(), log::LevelFilter::Trace);

    log::trace!("boot");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with(": boot\n"));

    assert!(matches!(
        playa_log::install(),
        Err(playa_log::Error::SetLogger(_))
    ));
}
