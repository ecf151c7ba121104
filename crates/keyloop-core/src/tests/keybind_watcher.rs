use crate::{
    Action, Key, KeybindFile, KeybindMap, KeybindWatcher, NamedKey, PauseGate, ReloadOutcome,
};

use std::{
    fs::{self, File},
    path::Path,
    time::{Duration, SystemTime},
};

use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

#[allow(clippy::unwrap_used)]
fn write_with_mtime(path: &Path, text: &str, mtime: SystemTime) {
    fs::write(path, text).unwrap();
    File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(mtime))
        .unwrap();
}

/// WHAT: An unchanged file is not reparsed
/// WHY: The watcher runs every few seconds for the listener's lifetime
#[test]
#[allow(clippy::unwrap_used)]
fn given_unchanged_file_when_checking_then_unchanged() {
    // Given: A watcher created over an existing file
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    KeybindFile::defaults().save(&path).unwrap();
    let mut watcher = KeybindWatcher::new(&path, KeybindMap::default());

    // When: Checking
    let outcome = watcher.check();

    // Then: Unchanged
    assert_eq!(outcome, ReloadOutcome::Unchanged);
}

/// WHAT: A changed file replaces the published bindings
/// WHY: Rebinding must not need a listener restart
#[test]
#[allow(clippy::unwrap_used)]
fn given_modified_file_when_checking_then_new_map_published() {
    // Given: A watcher and a subscriber
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    let past = SystemTime::now() - Duration::from_secs(60);
    write_with_mtime(&path, r#"{"keybinds": {"stop": ["shift_l", "q"]}}"#, past);
    let mut watcher = KeybindWatcher::new(&path, KeybindMap::default());
    let rx = watcher.subscribe();

    // When: The file is rewritten with a new stop chord
    write_with_mtime(
        &path,
        r#"{"keybinds": {"stop": ["ctrl_l", "x"]}}"#,
        SystemTime::now(),
    );
    let outcome = watcher.check();

    // Then: Reloaded and visible through the receiver
    assert_eq!(outcome, ReloadOutcome::Reloaded);
    let map = rx.borrow().clone();
    assert_eq!(map.chord(Action::Stop).modifier(), Key::Named(NamedKey::ControlLeft));
    assert_eq!(map.chord(Action::Stop).key(), Key::char('x'));
}

/// WHAT: A broken rewrite keeps the previous bindings
/// WHY: A half-edited file must not disable hotkeys
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_rewritten_with_no_valid_entries_when_checking_then_previous_map_kept() {
    // Given: A watcher publishing a custom map
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    let past = SystemTime::now() - Duration::from_secs(60);
    write_with_mtime(&path, r#"{"keybinds": {"stop": ["ctrl_l", "x"]}}"#, past);
    let initial = KeybindFile::load(&path).unwrap().map;
    let mut watcher = KeybindWatcher::new(&path, initial.clone());

    // When: The file is replaced by garbage
    write_with_mtime(&path, "not json", SystemTime::now());
    let first = watcher.check();
    let second = watcher.check();

    // Then: Rejected once, then unchanged; old map still published
    assert_eq!(first, ReloadOutcome::Rejected);
    assert_eq!(second, ReloadOutcome::Unchanged);
    assert_eq!(*watcher.current(), initial);
}

/// WHAT: A deleted file is reported missing and bindings are kept
/// WHY: Editors that save by delete-and-recreate briefly remove the file
#[test]
#[allow(clippy::unwrap_used)]
fn given_deleted_file_when_checking_then_missing() {
    // Given: A watcher over a file that is then removed
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    KeybindFile::defaults().save(&path).unwrap();
    let mut watcher = KeybindWatcher::new(&path, KeybindMap::default());
    fs::remove_file(&path).unwrap();

    // When: Checking
    let outcome = watcher.check();

    // Then: Missing, defaults still published
    assert_eq!(outcome, ReloadOutcome::Missing);
    assert_eq!(*watcher.current(), KeybindMap::default());
}

/// WHAT: A read failure does not consume the modification time
/// WHY: Otherwise a file that appears with that time is never loaded
#[test]
#[allow(clippy::unwrap_used)]
fn given_unreadable_path_when_replaced_with_same_mtime_then_reloaded() {
    // Given: A watcher whose path is a directory, so reads fail
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    let mut watcher = KeybindWatcher::new(&path, KeybindMap::default());
    fs::create_dir(&path).unwrap();
    let mtime = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(watcher.check(), ReloadOutcome::Missing);

    // When: A real file takes its place with the same modification time
    fs::remove_dir(&path).unwrap();
    write_with_mtime(&path, r#"{"keybinds": {"stop": ["ctrl_l", "x"]}}"#, mtime);
    let outcome = watcher.check();

    // Then: The file is read and published
    assert_eq!(outcome, ReloadOutcome::Reloaded);
    assert_eq!(watcher.current().chord(Action::Stop).key(), Key::char('x'));
}

/// WHAT: Paused checks leave the old bindings; resuming picks up the change
/// WHY: Edits made while hotkeys are suspended must still apply afterwards
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_pause_marker_when_file_changes_then_reload_waits_for_resume() {
    // Given: A running watcher with hotkeys paused
    let dir = tempdir().unwrap();
    let path = dir.path().join("keybinds.json");
    let past = SystemTime::now() - Duration::from_secs(60);
    write_with_mtime(&path, r#"{"keybinds": {"stop": ["shift_l", "q"]}}"#, past);
    let watcher = KeybindWatcher::new(&path, KeybindMap::default());
    let rx = watcher.subscribe();

    let pause = PauseGate::new(dir.path());
    pause.enter().unwrap();
    let cancel = CancellationToken::new();
    let interval = Duration::from_secs(5);
    let handle = tokio::spawn(watcher.run(interval, pause.clone(), cancel.clone()));

    // When: The file changes and several intervals pass
    write_with_mtime(
        &path,
        r#"{"keybinds": {"stop": ["ctrl_l", "x"]}}"#,
        SystemTime::now(),
    );
    tokio::time::sleep(interval * 4).await;

    // Then: The old map is still published
    assert_eq!(**rx.borrow(), KeybindMap::default());

    // When: The pause ends and one more interval passes
    pause.exit().unwrap();
    tokio::time::sleep(interval + Duration::from_millis(10)).await;

    // Then: The new map is published
    assert_eq!(rx.borrow().chord(Action::Stop).key(), Key::char('x'));

    cancel.cancel();
    handle.await.unwrap();
}
