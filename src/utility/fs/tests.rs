// acbuild: Aliucord Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::lock::{OutputLock, lock_path};
use super::walk::walk_files;
use crate::error::FsError;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn relative_names(root: &std::path::Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_walk_files_sorted_and_recursive() {
    let temp = temp_dir();
    let root = temp.path();

    std::fs::create_dir_all(root.join("com/aliucord/b")).unwrap();
    std::fs::write(root.join("com/aliucord/Z.class"), "z").unwrap();
    std::fs::write(root.join("com/aliucord/A.class"), "a").unwrap();
    std::fs::write(root.join("com/aliucord/b/C.class"), "c").unwrap();
    std::fs::write(root.join("top.txt"), "t").unwrap();

    let result = walk_files(root).unwrap();

    assert_eq!(result.error_count(), 0);
    assert_eq!(
        relative_names(root, result.files()),
        vec![
            "com/aliucord/A.class",
            "com/aliucord/Z.class",
            "com/aliucord/b/C.class",
            "top.txt",
        ]
    );
}

#[test]
fn test_walk_files_includes_hidden_and_ignored() {
    let temp = temp_dir();
    let root = temp.path();

    std::fs::write(root.join(".gitignore"), "*.class\n").unwrap();
    std::fs::write(root.join(".hidden"), "").unwrap();
    std::fs::write(root.join("A.class"), "").unwrap();

    let result = walk_files(root).unwrap();

    assert_eq!(
        relative_names(root, result.files()),
        vec![".gitignore", ".hidden", "A.class"]
    );
}

#[test]
fn test_walk_files_empty_dir() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("empty")).unwrap();

    let result = walk_files(temp.path()).unwrap();
    assert!(result.files().is_empty());
}

#[test]
fn test_walk_files_missing_root() {
    let temp = temp_dir();
    let err = walk_files(temp.path().join("missing")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FsError>(),
        Some(FsError::NotFound(_))
    ));
}

#[test]
fn test_output_lock_creates_dir_and_file() {
    let temp = temp_dir();
    let dir = temp.path().join("out/plugins");

    let _lock = OutputLock::acquire(&dir).unwrap();

    assert!(dir.is_dir());
    assert!(temp.path().join("out/.plugins.acbuild.lock").is_file());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn test_lock_path_beside_directory() {
    assert_eq!(
        lock_path(std::path::Path::new("/work/out/plugins")),
        std::path::PathBuf::from("/work/out/.plugins.acbuild.lock")
    );
    assert_eq!(
        lock_path(std::path::Path::new("/")),
        std::path::PathBuf::from("/.acbuild.lock")
    );
}

#[test]
fn test_output_lock_is_exclusive() {
    let temp = temp_dir();

    let dir = temp.path().join("out");

    let first = OutputLock::acquire(&dir).unwrap();
    let err = OutputLock::acquire(&dir).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FsError>(),
        Some(FsError::Locked(_))
    ));

    drop(first);
    assert!(OutputLock::acquire(&dir).is_ok());
}
