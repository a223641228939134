use super::{Aggregator, Strategy};
use crate::counter::{Counter, NestedCounter, TOP_K};
use crate::error::Result;
use crate::format;
use crate::record;
use chrono::NaiveDate;

const DATE_CAPACITY: usize = 64;

/// Dates with the most tweets, each paired with its most active author.
#[derive(Debug)]
pub struct DateActivity {
    // Only kept when streaming; otherwise date totals are summed from the
    // per-date author counters at the end.
    totals: Option<Counter>,
    authors: NestedCounter,
}

impl DateActivity {
    pub fn new(strategy: Strategy) -> DateActivity {
        match strategy {
            Strategy::Memory => DateActivity {
                totals: Some(Counter::new()),
                authors: NestedCounter::new(),
            },
            Strategy::Time => DateActivity {
                totals: None,
                authors: NestedCounter::with_capacity(DATE_CAPACITY),
            },
        }
    }
}

impl Aggregator for DateActivity {
    type Entry = (NaiveDate, String);

    fn observe(&mut self, line: &[u8]) -> record::Result<()> {
        let tweet = record::parse_dated_author(line)?;

        if let Some(totals) = self.totals.as_mut() {
            totals.increment(&tweet.date);
        }
        self.authors.increment(&tweet.date, &tweet.username);

        Ok(())
    }

    fn finish(self) -> Result<Vec<Self::Entry>> {
        let top_dates = match &self.totals {
            Some(totals) => totals.most_common(TOP_K),
            None => self.authors.most_common_buckets(TOP_K),
        };

        let authors = &self.authors;

        format::date_pairs(top_dates.into_iter().filter_map(|(date, _)| {
            authors
                .bucket(date)
                .and_then(|counter| counter.top())
                .map(|(username, _)| (date, username))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::run;
    use crate::source::InMemory;

    fn tweet(date: &str, username: &str) -> String {
        format!(
            "{{\"date\":\"{}T10:00:00+00:00\",\"user\":{{\"username\":\"{}\"}}}}\n",
            date, username
        )
    }

    #[test]
    fn top_dates_with_authors() {
        let mut content = String::new();
        for _ in 0..3 {
            content.push_str(&tweet("2021-02-01", "u1"));
        }
        content.push_str(&tweet("2021-02-02", "u2"));

        let source = InMemory::new("test", content);
        let expected = vec![
            (NaiveDate::from_ymd(2021, 2, 1), "u1".to_string()),
            (NaiveDate::from_ymd(2021, 2, 2), "u2".to_string()),
        ];

        for strategy in vec![Strategy::Memory, Strategy::Time] {
            let outcome = run(DateActivity::new(strategy), strategy, &source).unwrap();

            assert_eq!(outcome.ranking, expected);
        }
    }

    #[test]
    fn author_ties_go_to_first_seen() {
        let content = [
            tweet("2021-02-03", "late"),
            tweet("2021-02-01", "b"),
            tweet("2021-02-01", "a"),
            tweet("2021-02-01", "a"),
            tweet("2021-02-01", "b"),
            tweet("2021-02-02", "c"),
        ]
        .concat();

        let source = InMemory::new("test", content);
        let expected = vec![
            (NaiveDate::from_ymd(2021, 2, 1), "b".to_string()),
            (NaiveDate::from_ymd(2021, 2, 3), "late".to_string()),
            (NaiveDate::from_ymd(2021, 2, 2), "c".to_string()),
        ];

        for strategy in vec![Strategy::Memory, Strategy::Time] {
            let outcome = run(DateActivity::new(strategy), strategy, &source).unwrap();

            assert_eq!(outcome.ranking, expected);
        }
    }

    #[test]
    fn at_most_ten_dates() {
        let content = (1..=20)
            .flat_map(|day| {
                let date = format!("2021-02-{:02}", day);
                (0..day).map(move |_| tweet(&date, "user"))
            })
            .collect::<String>();

        let source = InMemory::new("test", content);
        let outcome = run(DateActivity::new(Strategy::Memory), Strategy::Memory, &source).unwrap();

        assert_eq!(outcome.ranking.len(), TOP_K);
        assert_eq!(outcome.ranking[0].0, NaiveDate::from_ymd(2021, 2, 20));
        assert_eq!(outcome.ranking[9].0, NaiveDate::from_ymd(2021, 2, 11));
    }
}
