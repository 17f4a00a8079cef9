use rmdupes::duplicates::{DedupError, Deduper};
use rmdupes::scanner::{walk, HashAlgorithm, Hasher, ScanError, WalkFlags};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[derive(Debug, thiserror::Error)]
enum TestError {
    #[error(transparent)]
    Dedup(#[from] DedupError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("rejected {0}")]
    Rejected(PathBuf),
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

/// Submit `paths` in order and return the names of reported duplicates.
fn reported_names(paths: &[PathBuf]) -> Vec<String> {
    let reported = RefCell::new(Vec::new());
    let mut deduper = Deduper::new(Hasher::default(), |path: &Path| -> Result<(), TestError> {
        reported.borrow_mut().push(file_name(path));
        Ok(())
    });
    for path in paths {
        deduper.submit(path).unwrap();
    }
    drop(deduper);
    reported.into_inner()
}

#[test]
fn test_same_path_twice_reports_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.bin");
    fs::write(&path, b"content").unwrap();

    assert!(reported_names(&[path.clone(), path]).is_empty());
}

#[test]
fn test_equivalent_spellings_are_one_file() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let path = dir.path().join("a.bin");
    fs::write(&path, b"content").unwrap();

    let detour = dir.path().join("sub").join("..").join(".").join("a.bin");
    assert!(reported_names(&[path, detour]).is_empty());
}

#[test]
fn test_different_content_reports_nothing() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, b"one").unwrap();
    fs::write(&b, b"two").unwrap();

    assert!(reported_names(&[a, b]).is_empty());
}

#[test]
fn test_copy_reported_and_unique_kept() {
    let dir = tempdir().unwrap();
    let content1 = dir.path().join("content1");
    let copy = dir.path().join("content1-copy");
    let content2 = dir.path().join("content2");
    fs::write(&content1, b"first").unwrap();
    fs::write(&copy, b"first").unwrap();
    fs::write(&content2, b"second").unwrap();

    assert_eq!(reported_names(&[content1, copy, content2]), ["content1-copy"]);
}

#[test]
fn test_shorter_later_name_replaces_keeper() {
    let dir = tempdir().unwrap();
    let long = dir.path().join("xx.bin");
    let short = dir.path().join("x.bin");
    fs::write(&long, b"same").unwrap();
    fs::write(&short, b"same").unwrap();

    assert_eq!(reported_names(&[long, short]), ["xx.bin"]);
}

#[test]
fn test_equal_length_names_report_later() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();

    assert_eq!(reported_names(&[b.clone(), a.clone()]), ["a.bin"]);
    assert_eq!(reported_names(&[a, b]), ["b.bin"]);
}

#[test]
fn test_directory_name_length_is_ignored() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a-very-long-directory-name")).unwrap();
    let deep = dir.path().join("a-very-long-directory-name").join("f");
    let shallow = dir.path().join("ff");
    fs::write(&deep, b"same").unwrap();
    fs::write(&shallow, b"same").unwrap();

    assert_eq!(reported_names(&[shallow, deep]), ["ff"]);
}

#[test]
fn test_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("bb");
    fs::write(&a, b"").unwrap();
    fs::write(&b, b"").unwrap();

    assert_eq!(reported_names(&[a, b]), ["bb"]);
}

#[test]
fn test_directory_submission_is_ignored() {
    let dir = tempdir().unwrap();
    let mut deduper = Deduper::new(Hasher::default(), |_: &Path| -> Result<(), DedupError> {
        panic!("no duplicate expected");
    });

    deduper.submit::<DedupError>(dir.path()).unwrap();

    assert_eq!(deduper.stats().hashed, 0);
    assert_eq!(deduper.stats().skipped, 1);
    assert_eq!(deduper.keeper_count(), 0);
}

#[test]
fn test_missing_file_is_ignored() {
    let dir = tempdir().unwrap();
    let mut deduper = Deduper::new(Hasher::default(), |_: &Path| -> Result<(), DedupError> {
        Ok(())
    });

    deduper.submit::<DedupError>(&dir.path().join("gone.bin")).unwrap();

    assert_eq!(deduper.stats().hashed, 0);
    assert_eq!(deduper.keeper_count(), 0);
}

#[test]
fn test_callback_error_is_returned_unchanged() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("bb.bin");
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();

    let mut deduper = Deduper::new(Hasher::default(), |path: &Path| -> Result<(), TestError> {
        Err(TestError::Rejected(path.to_path_buf()))
    });
    deduper.submit(&a).unwrap();
    let err = deduper.submit(&b).unwrap_err();

    match err {
        TestError::Rejected(path) => assert_eq!(file_name(&path), "bb.bin"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(deduper.is_visited(&b));
}

#[test]
fn test_every_algorithm_detects_copies() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("bb.bin");
    fs::write(&a, vec![7u8; 200_000]).unwrap();
    fs::write(&b, vec![7u8; 200_000]).unwrap();

    for algorithm in HashAlgorithm::ALL {
        let reported = RefCell::new(Vec::new());
        let mut deduper = Deduper::new(Hasher::new(algorithm), |path: &Path| -> Result<(), TestError> {
            reported.borrow_mut().push(file_name(path));
            Ok(())
        });
        deduper.submit(&a).unwrap();
        deduper.submit(&b).unwrap();
        drop(deduper);

        assert_eq!(reported.into_inner(), ["bb.bin"], "algorithm {algorithm}");
    }
}

#[test]
fn test_walk_feeds_engine_across_roots() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir_all(first.join("nested")).unwrap();
    fs::create_dir(&second).unwrap();
    fs::write(first.join("photo.jpg"), b"pixels").unwrap();
    fs::write(first.join("nested/photo-1.jpg"), b"pixels").unwrap();
    fs::write(second.join("p.jpg"), b"pixels").unwrap();
    fs::write(second.join("notes.txt"), b"text").unwrap();

    let reported = RefCell::new(Vec::new());
    let mut deduper = Deduper::new(Hasher::new(HashAlgorithm::Blake3), |path: &Path| -> Result<(), TestError> {
        reported.borrow_mut().push(file_name(path));
        Ok(())
    });

    let flags = WalkFlags::new().with_recursive(true);
    for root in [&first, &second] {
        walk(root, flags, |path| deduper.submit(path)).unwrap();
    }

    assert_eq!(deduper.keeper_count(), 2);
    drop(deduper);
    // "nested" sorts before "photo.jpg": photo-1.jpg is kept first and
    // displaced by photo.jpg, which p.jpg displaces in turn.
    assert_eq!(reported.into_inner(), ["photo-1.jpg", "photo.jpg"]);
}

#[test]
fn test_relative_spellings_are_one_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("a.bin", "content")?;
        std::fs::create_dir("s").map_err(|e| figment::Error::from(e.to_string()))?;

        let reported = RefCell::new(Vec::new());
        let mut deduper = Deduper::new(Hasher::default(), |path: &Path| -> Result<(), TestError> {
            reported.borrow_mut().push(file_name(path));
            Ok(())
        });
        deduper.submit(Path::new("a.bin")).unwrap();
        deduper.submit(Path::new("./s/../a.bin")).unwrap();

        assert_eq!(deduper.stats().hashed, 1);
        assert_eq!(deduper.stats().repeated, 1);
        assert!(deduper.is_visited(Path::new("s/../a.bin")));
        drop(deduper);
        assert!(reported.into_inner().is_empty());
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_file_stays_visited() {
    // A regular file whose read fails at offset 0.
    let path = Path::new("/proc/self/mem");
    let mut deduper = Deduper::new(Hasher::default(), |_: &Path| -> Result<(), DedupError> {
        panic!("no duplicate expected");
    });

    let err = deduper.submit::<DedupError>(path).unwrap_err();
    match &err {
        DedupError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }

    deduper.submit::<DedupError>(path).unwrap();
    assert!(deduper.is_visited(path));
    assert_eq!(deduper.keeper_count(), 0);
    assert_eq!(deduper.stats().hashed, 0);
    assert_eq!(deduper.stats().repeated, 1);
}

#[cfg(unix)]
#[test]
fn test_stat_failure_is_metadata_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.bin");
    fs::write(&file, b"x").unwrap();
    // A path through a regular file fails with ENOTDIR, not ENOENT.
    let through_file = file.join("child");

    let mut deduper = Deduper::new(Hasher::default(), |_: &Path| -> Result<(), DedupError> {
        Ok(())
    });
    let err = deduper.submit::<DedupError>(&through_file).unwrap_err();

    assert!(matches!(err, DedupError::Metadata { .. }), "got {err:?}");
    assert_eq!(err.path(), through_file);
    assert!(!deduper.is_visited(&through_file));
}
