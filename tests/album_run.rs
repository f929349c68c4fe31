use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};

use album_scraper_lib::{album, table, AlbumError, Config, DownloadStatus, Fetch, FetchError};
use url::Url;

const ALBUM_URL: &str = "https://fotoshare.co/album/party2024";

const ALBUM_HTML: &str = r#"
<html><body>
  <div data-img data-url="/i/one" data-thumb="/t/one.jpg?w=300" data-width="1200" data-height="800" data-type="image"></div>
  <div data-img data-url="/i/two" data-thumb="https://cdn.fotoshare.co/t/two.gif?x=1" data-width="640" data-height="480" data-type="gif"></div>
  <div data-img data-url="/i/three?ref=grid" data-thumb="/t/three.jpg" data-type="image"></div>
  <div class="banner" data-url="/i/not-an-image"></div>
</body></html>
"#;

enum Reply {
    Body(Vec<u8>),
    Status(u16),
    /// Writes the bytes, then fails mid-stream.
    Truncated(Vec<u8>),
}

#[derive(Default)]
struct FakeFetcher {
    replies: HashMap<String, Reply>,
    requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn album(html: &str) -> Self {
        let mut f = FakeFetcher::default();
        f.replies.insert(ALBUM_URL.to_string(), Reply::Body(html.as_bytes().to_vec()));
        for url in [
            "https://fotoshare.co/t/one.jpg",
            "https://cdn.fotoshare.co/t/two.gif",
            "https://fotoshare.co/t/three.jpg",
        ] {
            f.replies.insert(url.to_string(), Reply::Body(format!("bytes of {url}").into_bytes()));
        }
        f
    }

    fn with(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    fn image_requests(&self) -> usize {
        self.requests.borrow().iter().filter(|u| u.as_str() != ALBUM_URL).count()
    }
}

impl Fetch for FakeFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Body(b)) => Ok(String::from_utf8_lossy(b).into_owned()),
            Some(Reply::Status(s)) => Err(FetchError::Status { url: url.to_string(), status: *s }),
            _ => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }

    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Body(b)) => {
                sink.write_all(b).unwrap();
                Ok(b.len() as u64)
            }
            Some(Reply::Truncated(b)) => {
                sink.write_all(b).unwrap();
                Err(FetchError::Transfer {
                    url: url.to_string(),
                    source: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
                })
            }
            Some(Reply::Status(s)) => Err(FetchError::Status { url: url.to_string(), status: *s }),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}

fn config(root: &std::path::Path) -> Config {
    let mut config = Config::new(Url::parse(ALBUM_URL).unwrap());
    config.output_root = root.to_path_buf();
    config
}

fn dir_listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn clean_run_downloads_every_record() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::album(ALBUM_HTML);

    let summary = album::run(&config(root.path()), &fetcher).unwrap();

    assert_eq!(summary.outcomes.len(), 3);
    assert_eq!(summary.downloaded(), 3);
    assert_eq!(fetcher.image_requests(), 3);

    let folder = root.path().join("party2024");
    assert_eq!(dir_listing(&folder), ["images.csv", "one.jpg", "three.jpg", "two.gif"]);
    assert_eq!(
        std::fs::read_to_string(folder.join("two.gif")).unwrap(),
        "bytes of https://cdn.fotoshare.co/t/two.gif"
    );

    let rows = table::read_table(&folder.join("images.csv")).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].image_url, "https://fotoshare.co/t/one.jpg");
    assert_eq!(rows[0].thumb_url, "/t/one.jpg?w=300");
    assert_eq!(rows[2].path_url, "https://fotoshare.co/i/three?ref=grid");
    assert_eq!(rows[2].width, None);
    assert_eq!(rows[2].height, None);
}

#[test]
fn second_run_skips_everything() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::album(ALBUM_HTML);

    album::run(&config(root.path()), &fetcher).unwrap();
    let second = FakeFetcher::album(ALBUM_HTML);
    let summary = album::run(&config(root.path()), &second).unwrap();

    assert_eq!(summary.downloaded(), 0);
    assert_eq!(summary.skipped(), 3);
    assert_eq!(second.image_requests(), 0);
}

#[test]
fn existing_file_is_skipped_others_downloaded() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("party2024");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("two.gif"), b"already here").unwrap();

    let fetcher = FakeFetcher::album(ALBUM_HTML);
    let summary = album::run(&config(root.path()), &fetcher).unwrap();

    assert!(matches!(&summary.outcomes[0], DownloadStatus::Downloaded { name, .. } if name == "one.jpg"));
    assert!(matches!(&summary.outcomes[1], DownloadStatus::Skipped { name } if name == "two.gif"));
    assert!(matches!(&summary.outcomes[2], DownloadStatus::Downloaded { name, .. } if name == "three.jpg"));
    assert_eq!(std::fs::read(folder.join("two.gif")).unwrap(), b"already here");
}

#[test]
fn page_error_creates_nothing() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::default().with(ALBUM_URL, Reply::Status(503));

    let err = album::run(&config(root.path()), &fetcher).unwrap_err();

    assert!(matches!(err, AlbumError::Fetch(FetchError::Status { status: 503, .. })));
    assert!(dir_listing(root.path()).is_empty());
}

#[test]
fn failed_download_leaves_no_partial_file_and_continues() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::album(ALBUM_HTML)
        .with("https://fotoshare.co/t/one.jpg", Reply::Truncated(b"half an ima".to_vec()))
        .with("https://cdn.fotoshare.co/t/two.gif", Reply::Status(404));

    let summary = album::run(&config(root.path()), &fetcher).unwrap();

    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.downloaded(), 1);
    assert!(matches!(&summary.outcomes[0], DownloadStatus::Failed { url, .. } if url == "https://fotoshare.co/t/one.jpg"));

    let folder = root.path().join("party2024");
    assert_eq!(dir_listing(&folder), ["images.csv", "three.jpg"]);
}

#[test]
fn album_without_images_writes_header_only() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = FakeFetcher::album("<html><body><p>empty</p></body></html>");

    let summary = album::run(&config(root.path()), &fetcher).unwrap();

    assert!(summary.outcomes.is_empty());
    let rows = table::read_table(&root.path().join("party2024").join("images.csv")).unwrap();
    assert!(rows.is_empty());
}
