use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("transfer of {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("element has no data-thumb attribute")]
    MissingThumbnail,
    #[error("invalid URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot open table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("csv error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("cannot derive a file name from {0}")]
    NoFileName(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("write to {path:?} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("cannot derive an output directory from album URL {0}")]
    InvalidAlbumUrl(String),
    #[error("failed to fetch album page: {0}")]
    Fetch(#[from] FetchError),
    #[error("cannot create output directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write image table: {0}")]
    Table(#[from] TableError),
}
