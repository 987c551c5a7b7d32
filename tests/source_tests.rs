mod common;

use std::io::Write;

use common::temp_input;
use shipping_discounts::source::{FileSource, LineSource, MemorySource};

fn collect(source: &dyn LineSource, start: usize, len: usize) -> Vec<String> {
    source
        .read_range(start, len)
        .unwrap()
        .map(|line| line.unwrap())
        .collect()
}

#[test]
fn test_file_count_with_trailing_newline() {
    let file = temp_input("a\nb\nc\n");
    let source = FileSource::open(file.path()).unwrap();
    assert_eq!(source.count_lines().unwrap(), 3);
}

#[test]
fn test_file_count_without_trailing_newline() {
    let file = temp_input("a\nb\nc");
    let source = FileSource::open(file.path()).unwrap();
    assert_eq!(source.count_lines().unwrap(), 3);
}

#[test]
fn test_file_count_blank_lines() {
    let file = temp_input("\n\n\n");
    let source = FileSource::open(file.path()).unwrap();
    assert_eq!(source.count_lines().unwrap(), 3);

    let empty = temp_input("");
    let source = FileSource::open(empty.path()).unwrap();
    assert_eq!(source.count_lines().unwrap(), 0);
}

#[test]
fn test_file_read_range() {
    let file = temp_input("l0\nl1\r\nl2\nl3\nl4");
    let source = FileSource::open(file.path()).unwrap();

    assert_eq!(collect(&source, 0, 2), vec!["l0", "l1"]);
    assert_eq!(collect(&source, 2, 2), vec!["l2", "l3"]);
    assert_eq!(collect(&source, 4, 1), vec!["l4"]);
    assert!(collect(&source, 1, 0).is_empty());
}

#[test]
fn test_file_read_range_past_end_is_short() {
    let file = temp_input("l0\nl1\n");
    let source = FileSource::open(file.path()).unwrap();

    assert_eq!(collect(&source, 1, 10), vec!["l1"]);
    assert!(collect(&source, 5, 3).is_empty());
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"2015-02-01 S \xff\xfe\nok\n").unwrap();
    file.flush().unwrap();

    let source = FileSource::open(file.path()).unwrap();
    let lines = collect(&source, 0, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2015-02-01 S "));
    assert_eq!(lines[1], "ok");
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FileSource::open(dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_memory_source() {
    let source = MemorySource::from_text("a\nb\nc\n");
    assert_eq!(source.count_lines().unwrap(), 3);
    assert_eq!(collect(&source, 1, 5), vec!["b", "c"]);
}
