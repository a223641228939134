use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source not found: {location}")]
    SourceNotFound { location: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error occurred in the http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid storage endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid date key: {0}")]
    DateFormat(String),
    #[error("No valid process for {0}")]
    UnknownOperation(String),
    #[error("Failure to parse configuration")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failure to read configuration file")]
    ConfigRead(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
