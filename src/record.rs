//! Decoding of individual corpus lines.
//!
//! Each query only needs a few fields of a tweet, so instead of building a
//! full record for every line we decode a narrow view of it, borrowing string
//! values from the line whenever they contain no escapes.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Deserialize;
use std::borrow::Cow;

const DATE_KEY_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const DATE_KEY_LEN: usize = 10;
pub(crate) const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(thiserror::Error, Debug)]
pub enum MalformedRecord {
    #[error("Malformed record: {line}")]
    Json {
        line: String,
        #[source]
        error: serde_json::Error,
    },
    #[error("Invalid date {date:?} in record: {line}")]
    Date { line: String, date: String },
}

impl MalformedRecord {
    fn json(line: &[u8], error: serde_json::Error) -> Self {
        MalformedRecord::Json {
            line: String::from_utf8_lossy(line).into_owned(),
            error,
        }
    }

    /// The offending line.
    pub fn line(&self) -> &str {
        match self {
            MalformedRecord::Json { line, .. } => line,
            MalformedRecord::Date { line, .. } => line,
        }
    }
}

pub type Result<T> = std::result::Result<T, MalformedRecord>;

#[derive(Debug, Deserialize)]
struct UserJson<'a> {
    #[serde(borrow)]
    username: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct DatedTweetJson<'a> {
    #[serde(borrow)]
    date: Cow<'a, str>,
    #[serde(borrow)]
    user: UserJson<'a>,
}

#[derive(Debug, Deserialize)]
struct ContentJson<'a> {
    #[serde(borrow)]
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MentionsJson<'a> {
    #[serde(borrow)]
    mentioned_users: Option<Vec<UserJson<'a>>>,
}

/// The date (as a `YYYY-MM-DD` key) and author of a tweet.
#[derive(Debug, Eq, PartialEq)]
pub struct DatedAuthor<'a> {
    pub date: Cow<'a, str>,
    pub username: Cow<'a, str>,
}

pub fn parse_dated_author(line: &[u8]) -> Result<DatedAuthor<'_>> {
    let tweet = serde_json::from_slice::<DatedTweetJson>(line)
        .map_err(|error| MalformedRecord::json(line, error))?;

    if date_key(&tweet.date).is_none() {
        return Err(MalformedRecord::Date {
            line: String::from_utf8_lossy(line).into_owned(),
            date: tweet.date.into_owned(),
        });
    }

    let date = match tweet.date {
        Cow::Borrowed(value) => Cow::Borrowed(&value[..DATE_KEY_LEN]),
        Cow::Owned(mut value) => {
            value.truncate(DATE_KEY_LEN);
            Cow::Owned(value)
        }
    };

    Ok(DatedAuthor {
        date,
        username: tweet.user.username,
    })
}

pub fn parse_content(line: &[u8]) -> Result<Cow<'_, str>> {
    serde_json::from_slice::<ContentJson>(line)
        .map(|tweet| tweet.content)
        .map_err(|error| MalformedRecord::json(line, error))
}

/// Usernames mentioned by a tweet, in order and with repeats.
///
/// A missing or `null` mention list is treated as empty.
pub fn parse_mentions(line: &[u8]) -> Result<Vec<Cow<'_, str>>> {
    serde_json::from_slice::<MentionsJson>(line)
        .map(|tweet| {
            tweet
                .mentioned_users
                .unwrap_or_default()
                .into_iter()
                .map(|user| user.username)
                .collect()
        })
        .map_err(|error| MalformedRecord::json(line, error))
}

/// Take the calendar date prefix of a timestamp, if it is a valid date.
fn date_key(timestamp: &str) -> Option<&str> {
    lazy_static! {
        static ref DATE_KEY_RE: Regex = Regex::new(DATE_KEY_PATTERN).unwrap();
    }

    timestamp
        .get(..DATE_KEY_LEN)
        .filter(|key| DATE_KEY_RE.is_match(key))
        .filter(|key| NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).is_ok())
}
