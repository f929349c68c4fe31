pub mod album;
pub mod config;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logger;
pub mod table;
pub mod urls;

// Exporting types for convenience
pub use config::{Cli, Config};
pub use downloader::{DownloadStatus, Downloader, RunSummary};
pub use error::{AlbumError, DownloadError, ExtractError, FetchError, TableError};
pub use extractor::{Extraction, Extractor, ImageRecord};
pub use fetcher::{Fetch, HttpClient};
