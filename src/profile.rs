use super::aggregate::Diagnostics;
use super::error::Result;
use super::operation::{Aggregation, Query, Ranking};
use super::source::LineSource;
use std::fmt::Display;
use std::time::Instant;

/// Logs the wall-clock time of every run of the wrapped aggregation.
pub struct Timed<A> {
    underlying: A,
}

impl<A> Timed<A> {
    pub fn new(underlying: A) -> Timed<A> {
        Timed { underlying }
    }

    pub fn into_inner(self) -> A {
        self.underlying
    }
}

impl<A: Aggregation + Display> Aggregation for Timed<A> {
    fn query(&self) -> Query {
        self.underlying.query()
    }

    fn try_run(&self, source: &dyn LineSource) -> Result<(Ranking, Diagnostics)> {
        let start = Instant::now();
        let result = self.underlying.try_run(source);
        let elapsed = start.elapsed();

        match &result {
            Ok((ranking, diagnostics)) => log::info!(
                "{} on {}: {} entries from {} lines in {:.3}s",
                self.underlying,
                source.location(),
                ranking.len(),
                diagnostics.lines,
                elapsed.as_secs_f64()
            ),
            Err(_) => log::info!(
                "{} on {} failed after {:.3}s",
                self.underlying,
                source.location(),
                elapsed.as_secs_f64()
            ),
        }

        result
    }
}
