//! Module for errors.
use std::{error::Error, fmt::Display, path::PathBuf};

/// Error from the archive interface.
#[derive(Debug)]
pub enum NexradDataErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// A listing or download request failed in the http client.
    Transport(::reqwest::Error),
    /// Error compiling one of the key patterns.
    Regex(::regex::Error),
    /// Error forwarded from chrono while parsing a date or time.
    TimeParse(::chrono::ParseError),

    // My own errors from this crate
    /// The storage service answered with a non-success status code.
    HttpStatus {
        /// The requested url.
        url: String,
        /// The status code returned.
        status: u16,
    },
    /// The endpoint and bucket do not make a usable url.
    InvalidEndpoint(String),
    /// A listing response from the storage service could not be understood.
    MalformedListing(&'static str),
    /// Could not parse a scan time out of a scan file name.
    InvalidScanTime(String),
    /// The key does not identify a scan file.
    InvalidScanKey(String),
    /// Unable to create a destination directory.
    DirectoryCreate {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying cause.
        source: ::std::io::Error,
    },
}

impl Display for NexradDataErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::NexradDataErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            Transport(err) => write!(f, "transport error: {}", err),
            Regex(err) => write!(f, "invalid key pattern: {}", err),
            TimeParse(err) => write!(f, "unable to parse time: {}", err),

            HttpStatus { url, status } => write!(f, "http status {} for {}", status, url),
            InvalidEndpoint(url) => write!(f, "invalid bucket url: {}", url),
            MalformedListing(msg) => write!(f, "malformed listing response: {}", msg),
            InvalidScanTime(fname) => write!(f, "no scan time in file name: {}", fname),
            InvalidScanKey(key) => write!(f, "not a scan key: {}", key),
            DirectoryCreate { path, source } => write!(
                f,
                "unable to create directory {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl Error for NexradDataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use crate::errors::NexradDataErr::*;

        match self {
            IO(err) => Some(err),
            Transport(err) => Some(err),
            Regex(err) => Some(err),
            TimeParse(err) => Some(err),
            DirectoryCreate { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for NexradDataErr {
    fn from(err: ::std::io::Error) -> NexradDataErr {
        NexradDataErr::IO(err)
    }
}

impl From<::reqwest::Error> for NexradDataErr {
    fn from(err: ::reqwest::Error) -> NexradDataErr {
        NexradDataErr::Transport(err)
    }
}

impl From<::regex::Error> for NexradDataErr {
    fn from(err: ::regex::Error) -> NexradDataErr {
        NexradDataErr::Regex(err)
    }
}

impl From<::chrono::ParseError> for NexradDataErr {
    fn from(err: ::chrono::ParseError) -> NexradDataErr {
        NexradDataErr::TimeParse(err)
    }
}
