pub mod aggregate;
pub mod cli;
pub mod config;
pub mod counter;
pub mod emoji;
mod error;
pub mod format;
pub mod operation;
pub mod profile;
pub mod record;
pub mod source;

pub use error::{Error, Result};
pub use operation::{handle, Aggregation, Operation, Query, Ranking, Request, Response};
