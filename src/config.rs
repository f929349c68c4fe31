use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

pub const DEFAULT_BASE_ORIGIN: &str = "https://fotoshare.co";
pub const DEFAULT_TABLE_NAME: &str = "images.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Download every image of a fotoshare.co album and record its metadata in a CSV table.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Album page to scrape, e.g. https://fotoshare.co/album/abc123
    #[clap(default_value = "https://fotoshare.co/album/your-album-id")]
    pub album_url: String,
    /// Origin that relative image and path URLs are resolved against.
    #[clap(long, default_value = DEFAULT_BASE_ORIGIN)]
    pub base_url: String,
    /// Directory in which the per-album folder is created.
    #[clap(short, long, default_value = ".")]
    pub output_root: PathBuf,
    /// File name of the metadata table inside the album folder.
    #[clap(long, default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
    /// HTTP timeout in seconds, per request.
    #[clap(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// User-Agent header sent with every request.
    #[clap(short = 'A', long)]
    pub user_agent: Option<String>,
    /// Debug logging, including each HTTP request.
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub album_url: Url,
    pub base_origin: Url,
    pub output_root: PathBuf,
    pub table_name: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn new(album_url: Url) -> Self {
        Config {
            album_url,
            base_origin: Url::parse(DEFAULT_BASE_ORIGIN).expect("default base origin is a valid URL"),
            output_root: PathBuf::from("."),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Result<Config, url::ParseError> {
        let album_url = Url::parse(&self.album_url)?;
        let base_origin = Url::parse(&self.base_url)?;

        Ok(Config {
            album_url,
            base_origin,
            output_root: self.output_root,
            table_name: self.table_name,
            timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
