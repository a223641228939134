use super::LineSource;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::{Client as RClient, Response};
use reqwest::StatusCode;
use std::io::{BufRead, BufReader, Read};
use std::time::Duration;
use url::Url;

/// An object in a bucket, downloaded over HTTP from a storage endpoint.
///
/// Objects whose key ends in `.gz` are gunzipped while reading.
pub struct ObjectStore {
    underlying: RClient,
    endpoint: String,
    bucket: String,
    key: String,
}

impl ObjectStore {
    pub fn new<E: Into<String>, B: Into<String>, K: Into<String>>(
        endpoint: E,
        bucket: B,
        key: K,
    ) -> ObjectStore {
        ObjectStore {
            underlying: RClient::builder()
                .tcp_keepalive(Some(Duration::from_secs(20)))
                .timeout(None)
                .build()
                .unwrap_or_else(|_| RClient::new()),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The object URL, with the bucket and each `/`-separated part of the key
    /// percent-encoded as a path segment.
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|error| Error::InvalidEndpoint(format!("{}: {}", self.endpoint, error)))?;

        url.path_segments_mut()
            .map_err(|_| Error::InvalidEndpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .push(&self.bucket)
            .extend(self.key.split('/'));

        Ok(url)
    }

    fn is_gz(&self) -> bool {
        self.key.ends_with(".gz")
    }

    fn fetch(&self) -> Result<Response> {
        let url = self.url()?;
        log::info!("Downloading {}", url);

        let response = self.underlying.get(url).send().map_err(|error| {
            if error.is_connect() {
                Error::SourceNotFound {
                    location: self.location(),
                }
            } else {
                Error::from(error)
            }
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            Err(Error::SourceNotFound {
                location: self.location(),
            })
        } else {
            Ok(response.error_for_status()?)
        }
    }
}

impl LineSource for ObjectStore {
    fn location(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.key)
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let response = self.fetch()?;

        if self.is_gz() {
            Ok(Box::new(BufReader::new(GzDecoder::new(response))))
        } else {
            Ok(Box::new(BufReader::new(response)))
        }
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        if self.is_gz() {
            let mut content = vec![];
            self.open()?.read_to_end(&mut content)?;
            Ok(content)
        } else {
            Ok(self.fetch()?.bytes()?.to_vec())
        }
    }
}
