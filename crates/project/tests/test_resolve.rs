//! Integration tests: directory and bundle resolution.

use std::io::Write;
use std::path::{Path, PathBuf};

use riverscope_project::{DEFAULT_CASE_NAME, ProjectError, Resolved, resolve};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

fn build_zip(path: &Path, members: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).expect("create zip");
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, contents) in members {
        zip.start_file(*name, options).expect("start member");
        zip.write_all(contents).expect("write member");
    }
    zip.finish().expect("finish zip");
}

fn series_steps(resolved: &Resolved) -> Vec<usize> {
    match resolved {
        Resolved::Series(sources) => sources.iter().map(|s| s.step().expect("step")).collect(),
        Resolved::Single(_) => panic!("expected a series"),
    }
}

#[test]
fn solution_files_resolve_in_numeric_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("Solution_2.cgn"), b"two");
    write_file(&dir.path().join("Solution_10.cgn"), b"ten");
    write_file(&dir.path().join("Solution_1.cgn"), b"one");

    let resolved = resolve(dir.path(), DEFAULT_CASE_NAME).expect("resolves");
    assert_eq!(series_steps(&resolved), vec![1, 2, 10]);
}

#[test]
fn case_name_match_is_preferred() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("Case1.cgn"), b"case");
    write_file(&dir.path().join("bigger.cgn"), b"a much larger file body");

    let resolved = resolve(dir.path(), DEFAULT_CASE_NAME).expect("resolves");
    match resolved {
        Resolved::Single(src) => {
            assert_eq!(src.path().file_name().unwrap(), "Case1.cgn");
            assert!(!src.is_temporary());
        }
        Resolved::Series(_) => panic!("expected single"),
    }
}

#[test]
fn sole_candidate_is_used_without_case_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("run/model.cgn"), b"only one");

    let resolved = resolve(dir.path(), DEFAULT_CASE_NAME).expect("resolves");
    match resolved {
        Resolved::Single(src) => assert_eq!(src.path().file_name().unwrap(), "model.cgn"),
        Resolved::Series(_) => panic!("expected single"),
    }
}

#[test]
fn largest_candidate_wins_the_tie_break() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("small.cgn"), b"s");
    write_file(&dir.path().join("large.cgn"), b"ssssssssssssssssssss");

    let resolved = resolve(dir.path(), DEFAULT_CASE_NAME).expect("resolves");
    match resolved {
        Resolved::Single(src) => assert_eq!(src.path().file_name().unwrap(), "large.cgn"),
        Resolved::Series(_) => panic!("expected single"),
    }
}

#[test]
fn equal_sizes_with_no_name_match_are_ambiguous() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(&dir.path().join("a.cgn"), b"same");
    write_file(&dir.path().join("b.cgn"), b"same");

    let err = resolve(dir.path(), DEFAULT_CASE_NAME).unwrap_err();
    match err {
        ProjectError::AmbiguousSource { candidates, .. } => {
            assert_eq!(candidates, vec!["a.cgn", "b.cgn"]);
        }
        other => panic!("expected AmbiguousSource, got {other:?}"),
    }
}

#[test]
fn empty_directory_has_no_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = resolve(dir.path(), DEFAULT_CASE_NAME).unwrap_err();
    assert!(matches!(err, ProjectError::SourceNotFound { .. }));
}

#[test]
fn missing_path_is_source_not_found() {
    let err = resolve(Path::new("/no/such/path"), DEFAULT_CASE_NAME).unwrap_err();
    assert!(matches!(err, ProjectError::SourceNotFound { .. }));
}

#[test]
fn unknown_extension_is_unsupported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("notes.txt");
    write_file(&path, b"text");
    let err = resolve(&path, DEFAULT_CASE_NAME).unwrap_err();
    assert!(matches!(err, ProjectError::UnsupportedLayout { .. }));
}

#[test]
fn bundle_member_is_extracted_and_cleaned_up() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("project.ipro");
    build_zip(
        &bundle,
        &[("proj/Case1.cgn", b"payload"), ("proj/readme.txt", b"doc")],
    );

    let extracted_path: PathBuf;
    {
        let resolved = resolve(&bundle, DEFAULT_CASE_NAME).expect("resolves");
        let Resolved::Single(src) = resolved else {
            panic!("expected single");
        };
        assert!(src.is_temporary());
        assert_eq!(src.path().file_name().unwrap(), "Case1.cgn");
        assert_eq!(std::fs::read(src.path()).expect("read extracted"), b"payload");
        extracted_path = src.path().to_path_buf();
    }
    assert!(
        !extracted_path.exists(),
        "extraction dir removed when the source drops"
    );
}

#[test]
fn bundle_prefers_case_name_then_largest() {
    let dir = tempfile::tempdir().expect("temp dir");

    let named = dir.path().join("named.ipro");
    build_zip(&named, &[("big.cgn", b"xxxxxxxxxxxx"), ("Case1.cgn", b"x")]);
    let resolved = resolve(&named, DEFAULT_CASE_NAME).expect("resolves");
    let Resolved::Single(src) = resolved else {
        panic!("expected single");
    };
    assert_eq!(src.path().file_name().unwrap(), "Case1.cgn");

    let unnamed = dir.path().join("unnamed.ipro");
    build_zip(&unnamed, &[("big.cgn", b"xxxxxxxxxxxx"), ("tiny.cgn", b"x")]);
    let resolved = resolve(&unnamed, DEFAULT_CASE_NAME).expect("resolves");
    let Resolved::Single(src) = resolved else {
        panic!("expected single");
    };
    assert_eq!(src.path().file_name().unwrap(), "big.cgn");
}

#[test]
fn bundle_series_shares_one_extraction_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("series.ipro");
    build_zip(
        &bundle,
        &[
            ("out/Solution_10.cgn", b"ten"),
            ("out/Solution_2.cgn", b"two"),
            ("out/Solution_1.cgn", b"one"),
        ],
    );

    let parent: PathBuf;
    {
        let resolved = resolve(&bundle, DEFAULT_CASE_NAME).expect("resolves");
        assert_eq!(series_steps(&resolved), vec![1, 2, 10]);
        let Resolved::Series(sources) = resolved else {
            unreachable!()
        };
        parent = sources[0].path().parent().expect("parent").to_path_buf();
        for src in &sources {
            assert_eq!(src.path().parent().expect("parent"), parent);
            assert!(src.path().exists());
        }
    }
    assert!(!parent.exists(), "shared extraction dir removed on drop");
}

#[test]
fn bundle_without_cgn_is_source_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("empty.ipro");
    build_zip(&bundle, &[("readme.txt", b"doc")]);
    let err = resolve(&bundle, DEFAULT_CASE_NAME).unwrap_err();
    assert!(matches!(err, ProjectError::SourceNotFound { .. }));
}

#[test]
fn unreadable_bundle_is_corrupt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("broken.ipro");
    write_file(&bundle, b"this is not a zip archive");
    let err = resolve(&bundle, DEFAULT_CASE_NAME).unwrap_err();
    assert!(matches!(err, ProjectError::CorruptArchive { .. }));
}

#[test]
fn zip_round_trip_sanity() {
    // Guard against the fixture builder itself drifting from the zip
    // format the resolver reads.
    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("sanity.ipro");
    build_zip(&bundle, &[("Case1.cgn", b"payload")]);

    let file = std::fs::File::open(&bundle).expect("open zip");
    let mut archive = ZipArchive::new(file).expect("read zip");
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.by_index(0).expect("member").name(), "Case1.cgn");
}
