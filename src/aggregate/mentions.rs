use super::{Aggregator, Strategy};
use crate::counter::{Counter, TOP_K};
use crate::error::Result;
use crate::format;
use crate::record;

const MENTION_CAPACITY: usize = 16384;

/// The most mentioned users, with their number of mentions.
#[derive(Debug)]
pub struct MentionCounts {
    counter: Counter,
}

impl MentionCounts {
    pub fn new(strategy: Strategy) -> MentionCounts {
        let counter = match strategy {
            Strategy::Memory => Counter::new(),
            Strategy::Time => Counter::with_capacity(MENTION_CAPACITY),
        };

        MentionCounts { counter }
    }
}

impl Aggregator for MentionCounts {
    type Entry = (String, u64);

    fn observe(&mut self, line: &[u8]) -> record::Result<()> {
        for username in record::parse_mentions(line)? {
            self.counter.increment(&username);
        }

        Ok(())
    }

    fn finish(self) -> Result<Vec<Self::Entry>> {
        Ok(format::count_pairs(self.counter.most_common(TOP_K)))
    }
}
