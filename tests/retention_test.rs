//! Retention sweep over a real directory with aged files.

use domaindiff::RetentionPolicy;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(86_400);

fn touch(dir: &Path, name: &str, age_days: u32) {
    let path = dir.join(name);
    fs::write(&path, b"report").unwrap();
    let modified = SystemTime::now() - DAY * age_days;
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

#[test]
fn test_sweep_removes_only_expired_report_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "domain_analysis_2024-01-01_060000.txt", 45);
    touch(dir.path(), "domain_analysis_2024-01-01_060000.csv", 31);
    touch(dir.path(), "domain_analysis_2024-02-20_060000.txt", 2);
    touch(dir.path(), "notes.txt", 90);
    touch(dir.path(), "domain_analysisXbackup.txt", 90);
    fs::create_dir(dir.path().join("domain_analysis_archive")).unwrap();

    let stats = RetentionPolicy::default()
        .sweep(dir.path(), SystemTime::now())
        .unwrap();

    assert_eq!(stats.examined, 3);
    assert_eq!(stats.removed.len(), 2);
    assert_eq!(stats.to_string(), "2 old files removed");

    let mut remaining: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    remaining.sort();
    assert_eq!(
        remaining,
        vec![
            "domain_analysisXbackup.txt",
            "domain_analysis_2024-02-20_060000.txt",
            "domain_analysis_archive",
            "notes.txt",
        ]
    );
}

#[test]
fn test_fresh_files_survive_sweep() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "domain_analysis_today.txt", 0);

    let stats = RetentionPolicy::new(0, "domain_analysis")
        .sweep(dir.path(), SystemTime::now() - Duration::from_secs(5))
        .unwrap();

    assert!(stats.removed.is_empty());
    assert_eq!(stats.to_string(), "No old files to remove");
}

#[test]
fn test_sweep_honors_custom_prefix_and_window() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "traffic_a.csv", 8);
    touch(dir.path(), "traffic_b.csv", 6);
    touch(dir.path(), "domain_analysis_c.csv", 8);

    let stats = RetentionPolicy::new(7, "traffic")
        .sweep(dir.path(), SystemTime::now())
        .unwrap();

    assert_eq!(stats.removed, vec![dir.path().join("traffic_a.csv")]);
    assert!(dir.path().join("domain_analysis_c.csv").exists());
}

#[test]
fn test_sweep_of_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();

    let err = RetentionPolicy::default()
        .sweep(&dir.path().join("absent"), SystemTime::now())
        .unwrap_err();

    assert_eq!(err.kind(), domaindiff::ErrorKind::Unexpected);
}
