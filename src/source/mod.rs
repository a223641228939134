//! Where corpus content comes from.

mod local;
mod store;

pub use local::LocalFile;
pub use store::ObjectStore;

use super::config::Config;
use super::error::Result;
use std::io::{BufRead, Read};
use std::path::PathBuf;

/// A source of newline-delimited corpus content.
pub trait LineSource {
    /// Human-readable location, used in log messages.
    fn location(&self) -> String;

    /// Open the content for incremental, line-by-line reading.
    fn open(&self) -> Result<Box<dyn BufRead + '_>>;

    /// Read the entire content at once.
    fn read_all(&self) -> Result<Vec<u8>> {
        let mut content = vec![];
        self.open()?.read_to_end(&mut content)?;
        Ok(content)
    }
}

/// Content that is already in memory (e.g. read from standard input).
pub struct InMemory {
    name: String,
    content: Vec<u8>,
}

impl InMemory {
    pub fn new<S: Into<String>, C: Into<Vec<u8>>>(name: S, content: C) -> InMemory {
        InMemory {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl LineSource for InMemory {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(self.content.as_slice()))
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        Ok(self.content.clone())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Location {
    Local(PathBuf),
    Remote { bucket: String, key: String },
}

impl Location {
    const REMOTE_SCHEME: &'static str = "gs://";

    /// Resolve a location string.
    ///
    /// `gs://bucket/key` names an object explicitly. Anything else is an object
    /// key in the configured default bucket if there is one, or a local path.
    pub fn parse(input: &str, config: &Config) -> Location {
        if let Some(rest) = input.strip_prefix(Self::REMOTE_SCHEME) {
            let mut parts = rest.splitn(2, '/');
            let bucket = parts.next().unwrap_or_default().to_string();
            let key = parts.next().unwrap_or_default().to_string();

            Location::Remote { bucket, key }
        } else {
            match config.default_bucket() {
                Some(bucket) => Location::Remote {
                    bucket: bucket.to_string(),
                    key: input.to_string(),
                },
                None => Location::Local(PathBuf::from(input)),
            }
        }
    }

    pub fn into_source(self, config: &Config) -> Box<dyn LineSource> {
        match self {
            Location::Local(path) => Box::new(LocalFile::new(path)),
            Location::Remote { bucket, key } => {
                Box::new(ObjectStore::new(config.endpoint(), bucket, key))
            }
        }
    }
}

/// Split materialized content into lines the same way `BufRead::read_until`
/// would: on `\n`, without an extra empty line after a final newline.
pub fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = if content.is_empty() {
        None
    } else {
        Some(content.strip_suffix(b"\n").unwrap_or(content))
    };

    body.into_iter()
        .flat_map(|body| body.split(|byte| *byte == b'\n'))
        .map(trim_line_ending)
}

/// Remove a trailing `\n` or `\r\n`.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_lines(content: &[u8]) -> Vec<&[u8]> {
        split_lines(content).collect()
    }

    #[test]
    fn test_split_lines() {
        assert!(collect_lines(b"").is_empty());
        assert_eq!(collect_lines(b"\n"), vec![b"" as &[u8]]);
        assert_eq!(collect_lines(b"a\nb"), vec![b"a" as &[u8], b"b"]);
        assert_eq!(collect_lines(b"a\r\nb\n"), vec![b"a" as &[u8], b"b"]);
        assert_eq!(collect_lines(b"a\n\nb\n"), vec![b"a" as &[u8], b"", b"b"]);
    }

    #[test]
    fn split_lines_agrees_with_read_until() {
        let inputs: Vec<&[u8]> = vec![b"", b"\n", b"a", b"a\n", b"a\r\n\r\nb", b"\n\na\n\n"];

        for input in inputs {
            let mut reader = input;
            let mut buffer = vec![];
            let mut streamed = vec![];

            while reader.read_until(b'\n', &mut buffer).unwrap() > 0 {
                streamed.push(trim_line_ending(&buffer).to_vec());
                buffer.clear();
            }

            let split = split_lines(input).map(|line| line.to_vec()).collect::<Vec<_>>();

            assert_eq!(split, streamed);
        }
    }

    #[test]
    fn parse_locations() {
        let config = Config::default();

        assert_eq!(
            Location::parse("gs://corpus/tweets.json", &config),
            Location::Remote {
                bucket: "corpus".to_string(),
                key: "tweets.json".to_string()
            }
        );
        assert_eq!(
            Location::parse("data/tweets.json", &config),
            Location::Local(PathBuf::from("data/tweets.json"))
        );

        let config = toml::from_str::<Config>("[storage]\nbucket=\"corpus\"").unwrap();

        assert_eq!(
            Location::parse("farmers-protest-tweets-2021-2-4.json", &config),
            Location::Remote {
                bucket: "corpus".to_string(),
                key: "farmers-protest-tweets-2021-2-4.json".to_string()
            }
        );
    }

    #[test]
    fn in_memory_source() {
        let source = InMemory::new("stdin", "a\nb\n");
        let mut lines = vec![];

        for line in source.open().unwrap().lines() {
            lines.push(line.unwrap());
        }

        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(source.read_all().unwrap(), b"a\nb\n".to_vec());
        assert_eq!(source.location(), "stdin");
    }
}
