//! Single-pass aggregation over a line source.

mod dates;
mod emoji;
mod mentions;

pub use dates::DateActivity;
pub use emoji::EmojiUsage;
pub use mentions::MentionCounts;

use crate::error::Result;
use crate::record;
use crate::source::{split_lines, trim_line_ending, LineSource};
use serde_derive::Serialize;
use std::io::BufRead;

/// How an aggregation reads its source.
///
/// Both strategies produce the same ranking. `Memory` streams the source line
/// by line, so peak memory depends only on the number of distinct keys. `Time`
/// reads the whole content in one go and pre-sizes its counters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    Memory,
    Time,
}

pub trait Aggregator {
    type Entry;

    /// Update the counters with one line of input.
    fn observe(&mut self, line: &[u8]) -> record::Result<()>;

    /// Rank the counted keys.
    fn finish(self) -> Result<Vec<Self::Entry>>;
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Diagnostics {
    pub lines: usize,
    pub records: usize,
    pub malformed: usize,
}

impl Diagnostics {
    fn observe<A: Aggregator>(&mut self, aggregator: &mut A, line: &[u8]) {
        self.lines += 1;

        match aggregator.observe(line) {
            Ok(()) => self.records += 1,
            Err(error) => {
                self.malformed += 1;
                log::warn!("Skipping line {}: {}", self.lines, error);
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome<T> {
    pub ranking: Vec<T>,
    pub diagnostics: Diagnostics,
}

/// Feed every line of the source to the aggregator exactly once and rank the
/// result.
pub fn run<A: Aggregator>(
    mut aggregator: A,
    strategy: Strategy,
    source: &dyn LineSource,
) -> Result<Outcome<A::Entry>> {
    let mut diagnostics = Diagnostics::default();

    match strategy {
        Strategy::Memory => {
            let mut reader = source.open()?;
            let mut buffer = Vec::new();

            while reader.read_until(b'\n', &mut buffer)? > 0 {
                diagnostics.observe(&mut aggregator, trim_line_ending(&buffer));
                buffer.clear();
            }
        }
        Strategy::Time => {
            let content = source.read_all()?;

            for line in split_lines(&content) {
                diagnostics.observe(&mut aggregator, line);
            }
        }
    }

    log::info!(
        "Read {} lines from {} ({} malformed)",
        diagnostics.lines,
        source.location(),
        diagnostics.malformed
    );

    Ok(Outcome {
        ranking: aggregator.finish()?,
        diagnostics,
    })
}
