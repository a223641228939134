//! The six supported operations and the request-style entry point.

use super::aggregate::{self, DateActivity, Diagnostics, EmojiUsage, MentionCounts, Strategy};
use super::config::Config;
use super::error::{Error, Result};
use super::source::{LineSource, Location};
use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Query {
    /// Dates with the most tweets and their most active author.
    TopDates,
    /// Most used emoji.
    TopEmoji,
    /// Most mentioned users.
    TopMentions,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Operation {
    pub query: Query,
    pub strategy: Strategy,
}

static OPERATIONS: [(&str, Operation); 6] = [
    ("q1_memory", Operation::new(Query::TopDates, Strategy::Memory)),
    ("q1_time", Operation::new(Query::TopDates, Strategy::Time)),
    ("q2_memory", Operation::new(Query::TopEmoji, Strategy::Memory)),
    ("q2_time", Operation::new(Query::TopEmoji, Strategy::Time)),
    ("q3_memory", Operation::new(Query::TopMentions, Strategy::Memory)),
    ("q3_time", Operation::new(Query::TopMentions, Strategy::Time)),
];

impl Operation {
    pub const fn new(query: Query, strategy: Strategy) -> Operation {
        Operation { query, strategy }
    }

    pub fn all() -> impl Iterator<Item = Operation> {
        OPERATIONS.iter().map(|(_, operation)| *operation)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        OPERATIONS.iter().map(|(name, _)| *name)
    }

    pub fn name(&self) -> &'static str {
        OPERATIONS
            .iter()
            .find(|(_, operation)| operation == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OPERATIONS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, operation)| *operation)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ranking {
    Dates(Vec<(NaiveDate, String)>),
    Emoji(Vec<(String, u64)>),
    Mentions(Vec<(String, u64)>),
}

impl Ranking {
    pub fn empty(query: Query) -> Ranking {
        match query {
            Query::TopDates => Ranking::Dates(vec![]),
            Query::TopEmoji => Ranking::Emoji(vec![]),
            Query::TopMentions => Ranking::Mentions(vec![]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Ranking::Dates(entries) => entries.len(),
            Ranking::Emoji(entries) | Ranking::Mentions(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows of string fields, e.g. for CSV output.
    pub fn rows(&self) -> Vec<[String; 2]> {
        match self {
            Ranking::Dates(entries) => entries
                .iter()
                .map(|(date, username)| [date.format("%Y-%m-%d").to_string(), username.clone()])
                .collect(),
            Ranking::Emoji(entries) | Ranking::Mentions(entries) => entries
                .iter()
                .map(|(key, count)| [key.clone(), count.to_string()])
                .collect(),
        }
    }
}

/// Anything that can compute a ranking from a line source.
pub trait Aggregation {
    fn query(&self) -> Query;

    fn try_run(&self, source: &dyn LineSource) -> Result<(Ranking, Diagnostics)>;

    /// Compute the ranking, degrading to an empty one on failure.
    fn run(&self, source: &dyn LineSource) -> Ranking {
        match self.try_run(source) {
            Ok((ranking, _)) => ranking,
            Err(Error::SourceNotFound { location }) => {
                log::error!("The source {} was not found", location);
                Ranking::empty(self.query())
            }
            Err(error) => {
                log::error!("Unexpected error reading {}: {:?}", source.location(), error);
                Ranking::empty(self.query())
            }
        }
    }
}

impl Aggregation for Operation {
    fn query(&self) -> Query {
        self.query
    }

    fn try_run(&self, source: &dyn LineSource) -> Result<(Ranking, Diagnostics)> {
        let strategy = self.strategy;

        Ok(match self.query {
            Query::TopDates => {
                let outcome = aggregate::run(DateActivity::new(strategy), strategy, source)?;
                (Ranking::Dates(outcome.ranking), outcome.diagnostics)
            }
            Query::TopEmoji => {
                let outcome = aggregate::run(EmojiUsage::new(strategy), strategy, source)?;
                (Ranking::Emoji(outcome.ranking), outcome.diagnostics)
            }
            Query::TopMentions => {
                let outcome = aggregate::run(MentionCounts::new(strategy), strategy, source)?;
                (Ranking::Mentions(outcome.ranking), outcome.diagnostics)
            }
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Request {
    pub message: Option<String>,
    pub file_path: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ranking(Ranking),
    Message(String),
}

const MISSING_PARAMETERS_MESSAGE: &str = "Please, insert parameters";

/// Dispatch a request to the named operation.
pub fn handle(request: &Request, config: &Config) -> Response {
    handle_with(request, config, |operation, source| operation.run(source))
}

/// Dispatch a request, running the operation through `run` (which may for
/// example add instrumentation).
pub fn handle_with<F: Fn(&Operation, &dyn LineSource) -> Ranking>(
    request: &Request,
    config: &Config,
    run: F,
) -> Response {
    let name = match &request.message {
        Some(name) => name,
        None => return Response::Message(MISSING_PARAMETERS_MESSAGE.to_string()),
    };

    match name.parse::<Operation>() {
        Ok(operation) => match &request.file_path {
            Some(file_path) => {
                let source = Location::parse(file_path, config).into_source(config);
                Response::Ranking(run(&operation, source.as_ref()))
            }
            None => {
                log::error!("No file path given for {}", operation);
                Response::Ranking(Ranking::empty(operation.query))
            }
        },
        Err(error) => Response::Message(error.to_string()),
    }
}
