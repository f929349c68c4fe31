use log::{info, warn};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ExtractError;
use crate::urls;

const DESCRIPTOR_SELECTOR: &str = "[data-img][data-url]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Full-size image: the thumbnail URL without its query string.
    pub image_url: String,
    pub thumb_url: String,
    pub path_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub kind: Option<String>,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ImageRecord>,
    /// Descriptor elements (by position among all descriptors) that were dropped.
    pub rejected: Vec<(usize, ExtractError)>,
}

pub struct Extractor {
    base_origin: Url,
    descriptor: Selector,
}

impl Extractor {
    pub fn new(base_origin: Url) -> Self {
        Extractor {
            base_origin,
            descriptor: Selector::parse(DESCRIPTOR_SELECTOR).expect("descriptor selector is valid"),
        }
    }

    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut out = Extraction::default();

        for (index, element) in document.select(&self.descriptor).enumerate() {
            match self.record_from(element) {
                Ok(record) => {
                    info!("{:?}", record);
                    out.records.push(record);
                }
                Err(e) => {
                    warn!("Skipping image element #{}: {}", index + 1, e);
                    out.rejected.push((index, e));
                }
            }
        }

        info!("{} files found.", out.records.len());
        out
    }

    fn record_from(&self, element: ElementRef<'_>) -> Result<ImageRecord, ExtractError> {
        let el = element.value();
        let thumb_url = el
            .attr("data-thumb")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExtractError::MissingThumbnail)?
            .to_string();
        // The selector guarantees data-url is present.
        let raw_path = el.attr("data-url").unwrap_or_default();

        let image_url = urls::absolutize(&self.base_origin, &urls::strip_query(&thumb_url)?)?;
        let path_url = urls::absolutize(&self.base_origin, raw_path)?;

        Ok(ImageRecord {
            image_url,
            thumb_url,
            path_url,
            width: dimension(el.attr("data-width"), "data-width"),
            height: dimension(el.attr("data-height"), "data-height"),
            kind: el
                .attr("data-type")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

fn dimension(value: Option<&str>, attr: &str) -> Option<u32> {
    let value = value.map(str::trim).filter(|s| !s.is_empty())?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring non-numeric {}={:?}", attr, value);
            None
        }
    }
}
