use super::LineSource;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// A corpus file on local disk, optionally gzip-compressed.
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new<P: AsRef<Path>>(path: P) -> LocalFile {
        LocalFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_gz(&self) -> bool {
        self.path.extension().map_or(false, |ext| ext == "gz")
    }

    fn map_open_error(&self, error: io::Error) -> Error {
        if error.kind() == ErrorKind::NotFound {
            Error::SourceNotFound {
                location: self.location(),
            }
        } else {
            Error::Io(error)
        }
    }
}

impl LineSource for LocalFile {
    fn location(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|error| self.map_open_error(error))?;

        if self.is_gz() {
            Ok(Box::new(BufReader::new(GzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    fn read_all(&self) -> Result<Vec<u8>> {
        if self.is_gz() {
            let mut content = vec![];
            self.open()?.read_to_end(&mut content)?;
            Ok(content)
        } else {
            fs::read(&self.path).map_err(|error| self.map_open_error(error))
        }
    }
}
