use super::{Aggregator, Strategy};
use crate::counter::{Counter, TOP_K};
use crate::emoji::extract_emoji;
use crate::error::Result;
use crate::format;
use crate::record;

const EMOJI_CAPACITY: usize = 4096;

/// The most used emoji, with their number of occurrences.
#[derive(Debug)]
pub struct EmojiUsage {
    counter: Counter,
}

impl EmojiUsage {
    pub fn new(strategy: Strategy) -> EmojiUsage {
        let counter = match strategy {
            Strategy::Memory => Counter::new(),
            Strategy::Time => Counter::with_capacity(EMOJI_CAPACITY),
        };

        EmojiUsage { counter }
    }
}

impl Aggregator for EmojiUsage {
    type Entry = (String, u64);

    fn observe(&mut self, line: &[u8]) -> record::Result<()> {
        let content = record::parse_content(line)?;

        for glyph in extract_emoji(&content) {
            self.counter.increment(glyph);
        }

        Ok(())
    }

    fn finish(self) -> Result<Vec<Self::Entry>> {
        Ok(format::count_pairs(self.counter.most_common(TOP_K)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::run;
    use crate::source::InMemory;

    #[test]
    fn repeated_emoji_count_separately() {
        let source = InMemory::new(
            "test",
            "{\"content\":\"😀😀 hi\"}\n{\"content\":\"😀 bye\"}\n",
        );

        for strategy in vec![Strategy::Memory, Strategy::Time] {
            let outcome = run(EmojiUsage::new(strategy), strategy, &source).unwrap();

            assert_eq!(outcome.ranking, vec![("😀".to_string(), 3)]);
        }
    }

    #[test]
    fn escaped_emoji_and_missing_content() {
        let source = InMemory::new(
            "test",
            "{\"content\":\"\\ud83d\\ude9c go\"}\n{\"text\":\"🚜\"}\n{\"content\":\"🙏 🚜\"}\n",
        );

        let outcome = run(EmojiUsage::new(Strategy::Memory), Strategy::Memory, &source).unwrap();

        assert_eq!(
            outcome.ranking,
            vec![("🚜".to_string(), 2), ("🙏".to_string(), 1)]
        );
        assert_eq!(outcome.diagnostics.malformed, 1);
    }
}
