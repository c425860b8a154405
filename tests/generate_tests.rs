//! End-to-end: options in, playlist file out.

use m3ugen::engine::write_playlist;
use m3ugen::{M3uError, Opts, RunLog, generate};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn media_tree(root: &Path) {
    touch(&root.join("folder1/file1.mp3"));
    touch(&root.join("folder1/file2.mp4"));
    touch(&root.join("folder2/file1.mpg"));
    touch(&root.join("folder2/file2.mpg"));
    touch(&root.join("folder2/deeper/clip.MPG"));
}

fn opts_for(root: &Path, output: PathBuf) -> Opts {
    Opts {
        output,
        scan_folders: vec![root.to_path_buf()],
        extensions: vec!["mpg".to_string(), "mp4".to_string()],
        ..Default::default()
    }
}

fn playlist_lines(path: &Path) -> Vec<String> {
    let text = fs::read_to_string(path).unwrap();
    if !text.is_empty() {
        assert!(text.ends_with('\n'), "every line is newline-terminated");
    }
    text.lines().map(str::to_string).collect()
}

#[test]
fn test_generate_writes_accepted_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("out.m3u");

    let result = generate(&opts_for(&root, output.clone())).unwrap();
    assert_eq!(result.found_files.len(), 4);
    assert_eq!(result.written, 4);
    assert!(result.duplicates.is_none());
    assert!(result.excluded_extensions.contains("mp3"));

    let lines: BTreeSet<String> = playlist_lines(&output).into_iter().collect();
    let expected: BTreeSet<String> = result
        .found_files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_generate_respects_maximum_entries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("out.m3u");

    let result = generate(&Opts {
        maximum_entries: 3,
        ..opts_for(&root, output.clone())
    })
    .unwrap();
    assert_eq!(result.written, 3);
    let lines = playlist_lines(&output);
    assert_eq!(lines.len(), 3);
    // Without shuffling the first entries of the found collection are written.
    let head: Vec<String> = result.found_files[..3]
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    assert_eq!(lines, head);
}

#[test]
fn test_generate_maximum_above_total_writes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("out.m3u");

    let result = generate(&Opts {
        maximum_entries: 100,
        ..opts_for(&root, output.clone())
    })
    .unwrap();
    assert_eq!(result.written, result.found_files.len());
    assert_eq!(playlist_lines(&output).len(), 4);
}

#[test]
fn test_generate_randomize_keeps_same_entries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    for i in 0..50 {
        touch(&root.join(format!("d{}/track{i}.ogg", i % 5)));
    }
    let output = dir.path().join("shuffled.m3u");

    let result = generate(&Opts {
        output: output.clone(),
        scan_folders: vec![root.clone()],
        randomize: true,
        ..Default::default()
    })
    .unwrap();
    let mut lines = playlist_lines(&output);
    lines.sort();
    let mut expected: Vec<String> = result
        .found_files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    expected.sort();
    assert_eq!(lines, expected);
    assert_eq!(lines.len(), 50);
}

#[test]
fn test_generate_reports_duplicates_from_overlapping_roots() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("out.m3u");

    let result = generate(&Opts {
        scan_folders: vec![root.clone(), root.join("folder2")],
        detect_duplicates: true,
        ..opts_for(&root, output.clone())
    })
    .unwrap();
    let report = result.duplicates.expect("duplicate report requested");
    assert_eq!(report.duplicated_paths(), 3);
    assert_eq!(report.count_of(&root.join("folder2/file1.mpg")), Some(2));
    assert_eq!(report.count_of(&root.join("folder1/file2.mp4")), None);
    // Duplicates are reported, not removed.
    assert_eq!(playlist_lines(&output).len(), 7);
}

#[test]
fn test_generate_empty_scan_writes_empty_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("empty");
    fs::create_dir_all(root.join("a/b")).unwrap();
    let output = dir.path().join("out.m3u");
    fs::write(&output, "stale\n").unwrap();

    let result = generate(&opts_for(&root, output.clone())).unwrap();
    assert_eq!(result.written, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_generate_unwritable_output_is_output_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("no/such/dir/out.m3u");

    let err = generate(&opts_for(&root, output.clone())).unwrap_err();
    match err.downcast_ref::<M3uError>() {
        Some(M3uError::Output { path, .. }) => assert_eq!(path, &output),
        other => panic!("expected output error, got {:?}", other),
    }
}

#[test]
fn test_generate_unreadable_root_still_writes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    media_tree(&root);
    let output = dir.path().join("out.m3u");

    let result = generate(&Opts {
        scan_folders: vec![dir.path().join("gone"), root.clone()],
        ..opts_for(&root, output.clone())
    })
    .unwrap();
    assert_eq!(result.scan_errors.len(), 1);
    assert_eq!(result.written, 4);
    assert_eq!(playlist_lines(&output).len(), 4);
}

#[cfg(target_os = "linux")]
#[test]
fn test_write_failure_is_output_error() {
    let full = Path::new("/dev/full");
    let entries: Vec<PathBuf> = (0..10_000)
        .map(|i| PathBuf::from(format!("/music/album/track{i:05}.flac")))
        .collect();

    match write_playlist(full, &entries, RunLog::silent()) {
        Err(M3uError::Output { path, source }) => {
            assert_eq!(path, full);
            assert_eq!(source.kind(), std::io::ErrorKind::StorageFull);
        }
        other => panic!("expected output error, got {:?}", other),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_generate_skips_non_utf8_paths() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("media");
    touch(&root.join("good.mp3"));
    touch(&root.join(OsStr::from_bytes(b"bad\xff.mp3")));
    let output = dir.path().join("out.m3u");

    let result = generate(&Opts {
        output: output.clone(),
        scan_folders: vec![root.clone()],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(result.found_files.len(), 2);
    assert_eq!(result.written, 1);
    assert_eq!(
        playlist_lines(&output),
        vec![root.join("good.mp3").to_string_lossy().into_owned()]
    );
}
