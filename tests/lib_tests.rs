use m3ugen::engine::{
    Cli, detect_duplicates, effective_len, extension_of, format_extension_list, prepare_entries,
    resolve_opts,
};
use m3ugen::pipeline::{Classification, ExtensionMatcher};
use m3ugen::utils::{M3ugenToml, apply_file_to_opts, parse_m3ugen_toml};
use m3ugen::{Config, M3uError, Opts, RunLog};
use clap::Parser;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// --- extension_of ---

#[test]
fn test_extension_of_simple() {
    assert_eq!(extension_of(Path::new("/music/a/song.mp3")), "mp3");
}

#[test]
fn test_extension_of_lowercases() {
    assert_eq!(extension_of(Path::new("/music/A.MP3")), "mp3");
}

#[test]
fn test_extension_of_last_dot_wins() {
    assert_eq!(extension_of(Path::new("/music/archive.tar.GZ")), "gz");
}

#[test]
fn test_extension_of_no_dot() {
    assert_eq!(extension_of(Path::new("/music/README")), "");
}

#[test]
fn test_extension_of_ignores_dots_in_folders() {
    assert_eq!(extension_of(Path::new("/music/v1.2/track")), "");
}

#[test]
fn test_extension_of_trailing_dot() {
    assert_eq!(extension_of(Path::new("/music/odd.")), "");
}

// --- ExtensionMatcher ---

#[test]
fn test_matcher_empty_list_passes_everything() {
    let m = ExtensionMatcher::new::<String>(&[]);
    assert!(m.is_pass_through());
    assert_eq!(m.classify(Path::new("x/noext")), Classification::Accepted);
    assert_eq!(m.classify(Path::new("x/a.txt")), Classification::Accepted);
}

#[test]
fn test_matcher_case_insensitive_both_ways() {
    let m = ExtensionMatcher::new(&["mp3", "FLAC"]);
    assert_eq!(m.classify(Path::new("x/A.MP3")), Classification::Accepted);
    assert_eq!(m.classify(Path::new("x/b.flac")), Classification::Accepted);
}

#[test]
fn test_matcher_excluded_carries_lowercased_extension() {
    let m = ExtensionMatcher::new(&["mpg", "mp4"]);
    assert_eq!(
        m.classify(Path::new("folder1/file1.MP3")),
        Classification::Excluded("mp3".to_string())
    );
}

#[test]
fn test_matcher_extensionless_excluded_as_empty() {
    let m = ExtensionMatcher::new(&["mp3"]);
    assert_eq!(
        m.classify(Path::new("folder/LICENSE")),
        Classification::Excluded(String::new())
    );
}

#[test]
fn test_matcher_empty_extension_can_be_allowed() {
    let m = ExtensionMatcher::new(&["mp3", ""]);
    assert_eq!(m.classify(Path::new("folder/LICENSE")), Classification::Accepted);
}

// --- effective_len ---

#[test]
fn test_effective_len_unlimited() {
    assert_eq!(effective_len(-1, 7), 7);
    assert_eq!(effective_len(0, 7), 7);
    assert_eq!(effective_len(i64::MIN, 0), 0);
}

#[test]
fn test_effective_len_capped() {
    assert_eq!(effective_len(3, 7), 3);
    assert_eq!(effective_len(7, 7), 7);
    assert_eq!(effective_len(100, 7), 7);
    assert_eq!(effective_len(i64::MAX, 2), 2);
}

// --- prepare_entries ---

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_prepare_entries_keeps_order_without_randomize() {
    let found = paths(&["a", "b", "c", "d"]);
    let entries = prepare_entries(&found, false, 2, RunLog::silent());
    assert_eq!(entries, paths(&["a", "b"]));
    assert_eq!(found.len(), 4);
}

#[test]
fn test_prepare_entries_randomize_preserves_multiset() {
    let found: Vec<PathBuf> = (0..200).map(|i| PathBuf::from(format!("f{i}"))).collect();
    let entries = prepare_entries(&found, true, -1, RunLog::silent());
    assert_eq!(entries.len(), found.len());
    let mut sorted = entries.clone();
    sorted.sort();
    let mut expected = found.clone();
    expected.sort();
    assert_eq!(sorted, expected);
}

#[test]
fn test_prepare_entries_randomize_and_cap() {
    let found = paths(&["a", "b", "c", "d", "e"]);
    let entries = prepare_entries(&found, true, 3, RunLog::silent());
    assert_eq!(entries.len(), 3);
    for e in &entries {
        assert!(found.contains(e));
    }
    let distinct: BTreeSet<_> = entries.iter().collect();
    assert_eq!(distinct.len(), 3);
}

// --- detect_duplicates ---

#[test]
fn test_detect_duplicates_reports_counts() {
    let found = paths(&["a", "a", "b"]);
    let report = detect_duplicates(&found);
    assert_eq!(report.duplicated_paths(), 1);
    assert_eq!(report.count_of(Path::new("a")), Some(2));
    assert_eq!(report.count_of(Path::new("b")), None);
}

#[test]
fn test_detect_duplicates_none() {
    let report = detect_duplicates(&paths(&["a", "b", "c"]));
    assert_eq!(report.duplicated_paths(), 0);
    assert!(report.duplicates.is_empty());
}

#[test]
fn test_detect_duplicates_sorted_by_path() {
    let report = detect_duplicates(&paths(&["z", "a", "z", "a", "a", "m"]));
    assert_eq!(
        report.duplicates,
        vec![(PathBuf::from("a"), 3), (PathBuf::from("z"), 2)]
    );
}

// --- format_extension_list ---

#[test]
fn test_format_extension_list_marks_extensionless() {
    let set: BTreeSet<String> = ["", "jpg", "mp3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(format_extension_list(&set), "(none), jpg, mp3");
}

// --- Config validation ---

fn valid_opts() -> Opts {
    Opts {
        output: PathBuf::from("out.m3u"),
        scan_folders: vec![PathBuf::from("music")],
        ..Default::default()
    }
}

fn config_err(opts: Opts) -> String {
    match Config::try_from(opts) {
        Err(M3uError::Config(msg)) => msg,
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_config_defaults() {
    let config = Config::try_from(valid_opts()).unwrap();
    assert_eq!(config.maximum_entries(), -1);
    assert_eq!(config.scan_folder_workers(), 4);
    assert_eq!(config.receive_files_workers(), 4);
    assert!(!config.randomize());
    assert!(!config.detect_duplicates());
    assert!(config.extensions().is_empty());
}

#[test]
fn test_config_requires_output() {
    let msg = config_err(Opts {
        output: PathBuf::new(),
        ..valid_opts()
    });
    assert!(msg.contains("output"));
}

#[test]
fn test_config_requires_scan_folder() {
    let msg = config_err(Opts {
        scan_folders: Vec::new(),
        ..valid_opts()
    });
    assert!(msg.contains("folder"));
}

#[test]
fn test_config_rejects_zero_workers() {
    config_err(Opts {
        scan_folder_workers: 0,
        ..valid_opts()
    });
    config_err(Opts {
        receive_files_workers: 0,
        ..valid_opts()
    });
    config_err(Opts {
        queue_capacity: 0,
        ..valid_opts()
    });
}

#[test]
fn test_generate_invalid_config_is_config_error() {
    let err = m3ugen::generate(&Opts::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<M3uError>(),
        Some(M3uError::Config(_))
    ));
}

// --- config file ---

const SAMPLE_TOML: &str = r#"
[settings]
output = "list.m3u"
scan = ["/music", "/podcasts"]
extensions = ["mp3", "ogg"]
randomize = true
maximum_entries = 50
detect_duplicates = true
scan_folder_workers = 8
receive_files_workers = 2
"#;

#[test]
fn test_apply_file_to_opts() {
    let file: M3ugenToml = parse_m3ugen_toml(SAMPLE_TOML).unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.output, PathBuf::from("list.m3u"));
    assert_eq!(
        opts.scan_folders,
        vec![PathBuf::from("/music"), PathBuf::from("/podcasts")]
    );
    assert_eq!(opts.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(opts.randomize);
    assert_eq!(opts.maximum_entries, 50);
    assert!(opts.detect_duplicates);
    assert_eq!(opts.scan_folder_workers, 8);
    assert_eq!(opts.receive_files_workers, 2);
    // Not in the file: default kept.
    assert_eq!(opts.queue_capacity, Opts::default().queue_capacity);
}

#[test]
fn test_parse_toml_rejects_unknown_key() {
    let err = parse_m3ugen_toml("[settings]\nshuffle = true\n").unwrap_err();
    assert!(matches!(err, M3uError::Config(_)));
}

#[test]
fn test_resolve_opts_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("custom.toml");
    std::fs::write(&config_path, SAMPLE_TOML).unwrap();

    let cli = Cli::parse_from([
        "m3ugen",
        "--config",
        config_path.to_str().unwrap(),
        "--max",
        "-1",
        "--randomize",
        "false",
        "/other",
    ]);
    let opts = resolve_opts(&cli, dir.path()).unwrap();
    assert_eq!(opts.output, PathBuf::from("list.m3u"));
    assert_eq!(opts.scan_folders, vec![PathBuf::from("/other")]);
    assert_eq!(opts.maximum_entries, -1);
    assert!(!opts.randomize);
    assert!(opts.detect_duplicates);
}

#[test]
fn test_resolve_opts_picks_up_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("m3ugen.toml"), SAMPLE_TOML).unwrap();
    let cli = Cli::parse_from(["m3ugen", "-v"]);
    let opts = resolve_opts(&cli, dir.path()).unwrap();
    assert_eq!(opts.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(opts.verbose);
}

#[test]
fn test_resolve_opts_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::parse_from([
        "m3ugen",
        "--config",
        dir.path().join("nope.toml").to_str().unwrap(),
    ]);
    let err = resolve_opts(&cli, dir.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<M3uError>(),
        Some(M3uError::Config(_))
    ));
}

#[test]
fn test_resolve_opts_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::parse_from(["m3ugen", "-o", "out.m3u", "-e", "mp3", "flac", "--", "a", "b"]);
    let opts = resolve_opts(&cli, dir.path()).unwrap();
    assert_eq!(opts.output, PathBuf::from("out.m3u"));
    assert_eq!(opts.extensions, vec!["mp3".to_string(), "flac".to_string()]);
    assert_eq!(opts.scan_folders, vec![PathBuf::from("a"), PathBuf::from("b")]);
    assert_eq!(opts.maximum_entries, -1);
}

// --- fd limit ---

#[test]
fn test_cap_workers_never_zero_and_never_raises() {
    use m3ugen::utils::cap_workers_by_fd_limit;
    assert_eq!(cap_workers_by_fd_limit(1), 1);
    let capped = cap_workers_by_fd_limit(1_000_000);
    assert!(capped >= 1);
    assert!(capped <= 1_000_000);
}
