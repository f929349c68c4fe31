use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::TableError;
use crate::extractor::ImageRecord;

pub const HEADERS: [&str; 6] = ["Image URL", "GIF/Thumbnail", "Fotoshare.co Path", "Width", "Height", "Type"];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TableRow {
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "GIF/Thumbnail")]
    pub thumb_url: String,
    #[serde(rename = "Fotoshare.co Path")]
    pub path_url: String,
    #[serde(rename = "Width")]
    pub width: Option<u32>,
    #[serde(rename = "Height")]
    pub height: Option<u32>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

impl From<&ImageRecord> for TableRow {
    fn from(r: &ImageRecord) -> Self {
        TableRow {
            image_url: r.image_url.clone(),
            thumb_url: r.thumb_url.clone(),
            path_url: r.path_url.clone(),
            width: r.width,
            height: r.height,
            kind: r.kind.clone(),
        }
    }
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> TableError + '_ {
    move |source| TableError::Csv { path: path.to_path_buf(), source }
}

pub fn write_table(dir: &Path, file_name: &str, records: &[ImageRecord]) -> Result<PathBuf, TableError> {
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|source| TableError::Io { path: path.clone(), source })?;
    let mut writer = csv::WriterBuilder::new().from_writer(file);

    writer.write_record(HEADERS).map_err(csv_err(&path))?;
    for r in records {
        let width = r.width.map(|w| w.to_string()).unwrap_or_default();
        let height = r.height.map(|h| h.to_string()).unwrap_or_default();
        writer
            .write_record([
                r.image_url.as_str(),
                r.thumb_url.as_str(),
                r.path_url.as_str(),
                width.as_str(),
                height.as_str(),
                r.kind.as_deref().unwrap_or_default(),
            ])
            .map_err(csv_err(&path))?;
    }
    writer
        .flush()
        .map_err(|source| TableError::Io { path: path.clone(), source })?;

    info!("Wrote {} rows to {:?}", records.len(), path);
    Ok(path)
}

// Empty cells come back as `None`.
pub fn read_table(path: &Path) -> Result<Vec<TableRow>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(csv_err(path))?);
    }
    Ok(rows)
}
