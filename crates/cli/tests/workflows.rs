//! End-to-end command workflows against a temporary store directory

use bp_cli::cmd;
use bp_cli::config::Config;
use bp_cli::util;
use bp_sync::SignStyle;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn open(dir: &TempDir) -> bp_sync::BreakpointRegistry {
    util::open_registry(Some(dir.path()), &Config::default()).unwrap()
}

fn store_text(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("saved-breakpoints")).unwrap_or_default()
}

#[test]
fn test_toggle_writes_and_clears_store() {
    let dir = TempDir::new().unwrap();
    let file = Path::new("/proj/app.py");

    let mut registry = open(&dir);
    cmd::toggle::run(&mut registry, file, 12).unwrap();
    assert_eq!(store_text(&dir), "b /proj/app.py:12\n");

    cmd::toggle::run(&mut registry, file, 12).unwrap();
    assert_eq!(store_text(&dir), "");
}

#[test]
fn test_set_with_condition_round_trips() {
    let dir = TempDir::new().unwrap();
    let file = Path::new("/proj/app.py");

    let mut registry = open(&dir);
    cmd::set::run(&mut registry, file, 8, Some("x > 5")).unwrap();
    cmd::set::run(&mut registry, file, 3, None).unwrap();
    assert_eq!(
        store_text(&dir),
        "b /proj/app.py:3\nb /proj/app.py:8, x > 5\n"
    );

    // A fresh registry sees the same state
    let reopened = open(&dir);
    assert_eq!(reopened.placed_lines(file), vec![3, 8]);
    assert_eq!(reopened.condition(file, 8), Some("x > 5"));
}

#[test]
fn test_unset_removes_single_breakpoint() {
    let dir = TempDir::new().unwrap();
    let file = Path::new("/proj/app.py");

    let mut registry = open(&dir);
    cmd::set::run(&mut registry, file, 3, None).unwrap();
    cmd::set::run(&mut registry, file, 8, None).unwrap();
    cmd::unset::run(&mut registry, file, 3).unwrap();

    assert_eq!(store_text(&dir), "b /proj/app.py:8\n");
}

#[test]
fn test_clear_leaves_other_files_alone() {
    let dir = TempDir::new().unwrap();
    let a = Path::new("/proj/a.py");
    let b = Path::new("/proj/b.py");

    let mut registry = open(&dir);
    cmd::set::run(&mut registry, a, 1, None).unwrap();
    cmd::set::run(&mut registry, b, 2, Some("y == 0")).unwrap();
    cmd::clear::run(&mut registry, a).unwrap();

    assert_eq!(store_text(&dir), "b /proj/b.py:2, y == 0\n");
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let file = Path::new("/proj/a.py");

    let mut registry = open(&dir);
    cmd::set::run(&mut registry, file, 1, None).unwrap();

    assert!(cmd::reset::run(&mut registry, false).is_err());
    assert_eq!(store_text(&dir), "b /proj/a.py:1\n");

    cmd::reset::run(&mut registry, true).unwrap();
    assert_eq!(store_text(&dir), "");
    assert!(registry.placed_lines(file).is_empty());
}

#[test]
fn test_signs_command_sequence() {
    let dir = TempDir::new().unwrap();
    let file = Path::new("/proj/a.py");

    let mut registry = open(&dir);
    cmd::set::run(&mut registry, file, 5, None).unwrap();
    cmd::set::run(&mut registry, file, 11, None).unwrap();

    let commands = cmd::signs::commands(&mut registry, file, &SignStyle::default()).unwrap();
    assert_eq!(
        commands,
        vec![
            "sign define pudbbp text=! texthl=debug".to_string(),
            "sign place 50 line=5 name=pudbbp file=/proj/a.py".to_string(),
            "sign place 110 line=11 name=pudbbp file=/proj/a.py".to_string(),
        ]
    );
}

#[test]
fn test_version_files_merge_on_open() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("saved-breakpoints-3.8"),
        "b /proj/x.py:1\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("saved-breakpoints-3.9"),
        "b /proj/y.py:2\n",
    )
    .unwrap();

    let registry = open(&dir);

    assert_eq!(registry.placed_lines(Path::new("/proj/x.py")), vec![1]);
    assert_eq!(registry.placed_lines(Path::new("/proj/y.py")), vec![2]);

    // Both version files are now links tracking the canonical file
    for version in ["3.8", "3.9"] {
        let link = dir.path().join(format!("saved-breakpoints-{version}"));
        assert_eq!(fs::read_link(&link).unwrap(), Path::new("saved-breakpoints"));
        assert_eq!(
            fs::read_to_string(&link).unwrap(),
            fs::read_to_string(dir.path().join("saved-breakpoints")).unwrap()
        );
    }
}

#[test]
fn test_config_python_version_links_active_version() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        python_version: Some("3.11".to_string()),
        store_dir: Some(PathBuf::from(dir.path())),
        ..Config::default()
    };

    let mut registry = util::open_registry(None, &config).unwrap();
    cmd::set::run(&mut registry, Path::new("/proj/a.py"), 4, None).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("saved-breakpoints-3.11")).unwrap(),
        "b /proj/a.py:4\n"
    );
}
