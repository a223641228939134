use super::error::{Error, Result};
use super::record::DATE_KEY_FORMAT;
use chrono::NaiveDate;

pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).map_err(|_| Error::DateFormat(key.to_string()))
}

/// Pair each ranked date key with its top user, converting keys to dates.
pub fn date_pairs<'a, I: IntoIterator<Item = (&'a str, &'a str)>>(
    pairs: I,
) -> Result<Vec<(NaiveDate, String)>> {
    pairs
        .into_iter()
        .map(|(key, username)| Ok((parse_date_key(key)?, username.to_string())))
        .collect()
}

pub fn count_pairs<'a, I: IntoIterator<Item = (&'a str, u64)>>(pairs: I) -> Vec<(String, u64)> {
    pairs
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}
