use std::fs;
use std::path::PathBuf;

use log::info;
use url::Url;

use crate::config::Config;
use crate::downloader::{Downloader, RunSummary};
use crate::error::AlbumError;
use crate::extractor::Extractor;
use crate::fetcher::Fetch;
use crate::table;

pub fn album_dir_name(album_url: &Url) -> Option<String> {
    album_url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .filter(|s| *s != "." && *s != "..")
        .map(str::to_string)
}

/// Only the page fetch, directory creation and table write can fail the run;
/// per-image failures are reported in the returned summary.
pub fn run(config: &Config, fetcher: &dyn Fetch) -> Result<RunSummary, AlbumError> {
    let dir_name = album_dir_name(&config.album_url)
        .ok_or_else(|| AlbumError::InvalidAlbumUrl(config.album_url.to_string()))?;
    let folder: PathBuf = config.output_root.join(dir_name);

    info!("Fetching album {}", config.album_url);
    let html = fetcher.fetch_page(config.album_url.as_str())?;

    let extraction = Extractor::new(config.base_origin.clone()).extract(&html);

    fs::create_dir_all(&folder).map_err(|source| AlbumError::Directory { path: folder.clone(), source })?;
    table::write_table(&folder, &config.table_name, &extraction.records)?;

    let summary = Downloader::new(fetcher, &folder).run(&extraction.records);

    info!(
        "Download complete. {} downloaded, {} skipped, {} failed.",
        summary.downloaded(),
        summary.skipped(),
        summary.failed()
    );
    Ok(summary)
}
