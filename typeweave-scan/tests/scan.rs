use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use typeweave_scan::{PluginScanner, ScannerConfig};

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn scanner_for(root: &Path) -> PluginScanner {
    PluginScanner::new(ScannerConfig::new().with_root(root)).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// --- Classification ---

#[test]
fn marker_obj_and_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("plugin.dll"));
    touch(&root.join("obj/skip.dll"));
    touch(&root.join("Dependencies/dep.dll"));
    touch(&root.join("ignored/x.dll"));
    touch(&root.join("ignored/.pluginignore"));

    let scanner = scanner_for(root);
    assert_eq!(names(&scanner.all_files()), vec!["dep.dll", "plugin.dll"]);
    assert_eq!(names(&scanner.search_files()), vec!["plugin.dll"]);
}

#[test]
fn names_compared_without_case() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("Upper.DLL"));
    touch(&root.join("Tool.Exe"));
    touch(&root.join("OBJ/skip.dll"));
    touch(&root.join("dependencies/dep.dll"));
    touch(&root.join("hidden/.PluginIgnore"));
    touch(&root.join("hidden/x.dll"));
    touch(&root.join("App.VSHOST.exe"));

    let scanner = scanner_for(root);
    assert_eq!(
        names(&scanner.all_files()),
        vec!["Tool.Exe", "Upper.DLL", "dep.dll"]
    );
    assert_eq!(names(&scanner.search_files()), vec!["Tool.Exe", "Upper.DLL"]);
}

#[test]
fn dependency_exclusion_reaches_descendants() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("Dependencies/a/b/deep.dll"));
    touch(&root.join("a/Dependencies/nested.dll"));
    touch(&root.join("a/b/normal.dll"));

    let scanner = scanner_for(root);
    assert_eq!(
        names(&scanner.all_files()),
        vec!["deep.dll", "nested.dll", "normal.dll"]
    );
    assert_eq!(names(&scanner.search_files()), vec!["normal.dll"]);
}

#[test]
fn marker_hides_whole_subtree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("off/.pluginignore"));
    touch(&root.join("off/deeper/still.dll"));
    touch(&root.join("on/kept.dll"));

    assert_eq!(names(&scanner_for(root).all_files()), vec!["kept.dll"]);
}

#[test]
fn marker_at_root_hides_everything() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join(".pluginignore"));
    touch(&dir.path().join("plugin.dll"));
    assert!(scanner_for(dir.path()).all_files().is_empty());
}

#[test]
fn other_extensions_ignored() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("readme.txt"));
    touch(&dir.path().join("lib.so"));
    touch(&dir.path().join("plugin.dll"));
    assert_eq!(names(&scanner_for(dir.path()).all_files()), vec!["plugin.dll"]);
}

// --- Links ---

#[cfg(unix)]
#[test]
fn linked_directories_walked_not_listed() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("scan");
    let target = dir.path().join("target");
    touch(&target.join("real/linked.dll"));
    fs::create_dir_all(target.join("empty")).unwrap();
    fs::create_dir_all(&root).unwrap();
    symlink(target.join("real"), root.join("plugins")).unwrap();
    symlink(target.join("empty"), root.join("folder.dll")).unwrap();

    let all = scanner_for(&root).all_files();
    assert_eq!(names(&all), vec!["linked.dll"]);
    assert!(all.iter().all(|path| path.is_file()));
}

#[cfg(unix)]
#[test]
fn link_cycles_and_dangling_links() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("a.dll"));
    symlink(root, root.join("loop")).unwrap();
    symlink(root.join("missing.dll"), root.join("gone.dll")).unwrap();

    assert_eq!(names(&scanner_for(root).all_files()), vec!["a.dll"]);
}

// --- Failures ---

#[cfg(unix)]
#[test]
fn unreadable_subtree_skipped_siblings_scanned() {
    use std::os::unix::fs::PermissionsExt;

    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("locked/hidden.dll"));
    touch(&root.join("open/visible.dll"));
    touch(&root.join("top.dll"));

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Permission bits do not bind a privileged user.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let files = scanner_for(root).all_files();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(names(&files), vec!["visible.dll", "top.dll"]);
}

// --- Roots ---

#[test]
fn missing_root_contributes_nothing() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("plugin.dll"));

    let scanner = PluginScanner::new(
        ScannerConfig::new()
            .with_root(dir.path().join("does-not-exist"))
            .with_root(dir.path()),
    )
    .unwrap();
    assert_eq!(names(&scanner.all_files()), vec!["plugin.dll"]);
}

#[test]
fn overlapping_roots_report_files_once() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("sub/plugin.dll"));

    let scanner = PluginScanner::new(
        ScannerConfig::new()
            .with_root(dir.path())
            .with_root(dir.path().join("sub")),
    )
    .unwrap();
    assert_eq!(scanner.all_files().len(), 1);
}

// --- Caching ---

#[test]
fn cached_within_freshness_window() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("first.dll"));
    let scanner = scanner_for(dir.path());
    assert_eq!(scanner.all_files().len(), 1);

    touch(&dir.path().join("second.dll"));
    assert_eq!(scanner.all_files().len(), 1);

    scanner.invalidate();
    assert_eq!(scanner.all_files().len(), 2);
}

#[test]
fn stale_result_rescanned() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("first.dll"));
    let scanner = PluginScanner::new(
        ScannerConfig::new()
            .with_root(dir.path())
            .with_freshness(Duration::ZERO),
    )
    .unwrap();
    assert_eq!(scanner.search_files().len(), 1);

    touch(&dir.path().join("second.dll"));
    assert_eq!(scanner.search_files().len(), 2);
}

#[test]
fn find_by_stem() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("Plugin.Core.dll"));
    touch(&root.join("Dependencies/plugin.core.exe"));
    touch(&root.join("Other.dll"));

    let scanner = scanner_for(root);
    let found = scanner.find("Plugin.Core");
    assert_eq!(found.len(), 2);
    assert!(scanner.find("Missing").is_empty());

    // Memoized until the next scan.
    touch(&root.join("sub/plugin.core.dll"));
    assert_eq!(scanner.find("plugin.core").len(), 2);
    scanner.invalidate();
    assert_eq!(scanner.find("plugin.core").len(), 3);
}
