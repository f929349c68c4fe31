use std::path::PathBuf;

use log::{error, info};
use tempfile::NamedTempFile;
use url::Url;

use crate::error::DownloadError;
use crate::extractor::ImageRecord;
use crate::fetcher::Fetch;

#[derive(Debug)]
pub enum DownloadStatus {
    Downloaded { name: String, bytes: u64 },
    Skipped { name: String },
    Failed { url: String, error: DownloadError },
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<DownloadStatus>,
}

impl RunSummary {
    pub fn downloaded(&self) -> usize {
        self.count(|s| matches!(s, DownloadStatus::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DownloadStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DownloadStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&DownloadStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|s| pred(s)).count()
    }
}

pub fn file_name(image_url: &str) -> Option<String> {
    let url = Url::parse(image_url).ok()?;
    let name = url.path_segments()?.last()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// Fetches album images one at a time into `dir`. Presence of a file with the
/// target name is the only resume check.
pub struct Downloader<'a> {
    fetcher: &'a dyn Fetch,
    dir: PathBuf,
}

impl<'a> Downloader<'a> {
    pub fn new(fetcher: &'a dyn Fetch, dir: impl Into<PathBuf>) -> Self {
        Downloader { fetcher, dir: dir.into() }
    }

    pub fn run(&self, records: &[ImageRecord]) -> RunSummary {
        let total = records.len();
        let mut summary = RunSummary::default();

        for (i, record) in records.iter().enumerate() {
            let status = match self.download_one(record) {
                Ok(status) => status,
                Err(error) => DownloadStatus::Failed { url: record.image_url.clone(), error },
            };

            match &status {
                DownloadStatus::Downloaded { name, .. } => info!("({}/{}) Downloaded: {}", i + 1, total, name),
                DownloadStatus::Skipped { name } => info!("({}/{}) Skipped: {}", i + 1, total, name),
                DownloadStatus::Failed { url, error } => {
                    error!("({}/{}) Failed to download {}: {}", i + 1, total, url, error)
                }
            }
            summary.outcomes.push(status);
        }

        summary
    }

    fn download_one(&self, record: &ImageRecord) -> Result<DownloadStatus, DownloadError> {
        let name = file_name(&record.image_url).ok_or_else(|| DownloadError::NoFileName(record.image_url.clone()))?;
        let target = self.dir.join(&name);

        if target.exists() {
            return Ok(DownloadStatus::Skipped { name });
        }

        // Stream into a sibling temp file; it is removed on drop unless persisted.
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|source| DownloadError::Write { path: self.dir.clone(), source })?;
        let bytes = self.fetcher.fetch_to(&record.image_url, tmp.as_file_mut())?;
        tmp.persist(&target)
            .map_err(|e| DownloadError::Write { path: target.clone(), source: e.error })?;

        Ok(DownloadStatus::Downloaded { name, bytes })
    }
}
