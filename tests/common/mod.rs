#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use shipping_discounts::concurrent_engine::{ParallelEngine, RunOutcome, RunReport};
use shipping_discounts::config::EngineConfig;
use shipping_discounts::models::Tallies;
use shipping_discounts::source::MemorySource;
use tempfile::NamedTempFile;

pub const SAMPLE_INPUT: &str = include_str!("../fixtures/sample_input.txt");
pub const SAMPLE_EXPECTED: &str = include_str!("../fixtures/sample_expected.txt");

/// Run the sequential path over a string and return the output text
pub fn price_text(input: &str) -> (String, Tallies) {
    let mut output = Vec::new();
    let tallies = shipping_discounts::price_lines(input.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), tallies)
}

/// Output line for a single input line priced by a fresh engine
pub fn price_one(line: &str) -> String {
    price_text(line).0.trim_end().to_string()
}

/// `count` copies of `line` joined by newlines
pub fn repeat_line(line: &str, count: usize) -> String {
    vec![line; count].join("\n")
}

/// Run the parallel engine over in-memory text and expect it to complete
pub async fn run_parallel(input: &str, workers: usize) -> RunReport {
    let engine = ParallelEngine::new(EngineConfig::default().with_workers(workers));
    let source = Arc::new(MemorySource::from_text(input));

    match engine.run(source).await.unwrap() {
        RunOutcome::Completed(report) => report,
        RunOutcome::Terminated => panic!("run was not expected to be cancelled"),
    }
}

/// Write `contents` to a temporary file that lives as long as the handle
pub fn temp_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_line() {
        assert_eq!(repeat_line("a", 3), "a\na\na");
        assert_eq!(repeat_line("a", 0), "");
    }

    #[test]
    fn test_price_one() {
        assert_eq!(price_one("2015-02-01 S LP"), "2015-02-01 S LP 1.50 -");
    }

    #[test]
    fn test_fixture_lengths_match() {
        assert_eq!(SAMPLE_INPUT.lines().count(), 22);
        assert_eq!(SAMPLE_EXPECTED.lines().count(), 22);
    }
}
