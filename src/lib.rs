pub mod aggregator;
pub mod cancel;
pub mod chunking;
pub mod concurrent_engine;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod parser;
pub mod progress;
pub mod report;
pub mod source;
pub mod worker;

use std::io::{BufRead, BufWriter, Write};

use engine::DiscountEngine;
use error::Result;
use models::Tallies;
use source::lossy_lines;

/// Price every line of `reader` with a single engine and write annotated lines to `writer`
///
/// This is the sequential path: one monthly state for the whole input, in input order.
/// Lines that are not valid UTF-8 are rejected like any other bad line.
pub fn price_lines<R: BufRead, W: Write>(reader: R, writer: W) -> Result<Tallies> {
    let mut engine = DiscountEngine::new();
    let mut writer = BufWriter::new(writer);

    for line in lossy_lines(reader) {
        if let Some(outcome) = engine.process_line(&line?) {
            writeln!(writer, "{}", outcome)?;
        }
    }

    writer.flush()?;
    let (_, tallies) = engine.into_parts();
    Ok(tallies)
}
