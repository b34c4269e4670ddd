use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use tempfile::NamedTempFile;

use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::feed::FeedItem;
use crate::http::{Fetch, FetchError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat directory of `<date>.jpg` files. A file's presence is the cache hit.
pub struct WallpaperCache<'a> {
    dir: PathBuf,
    http: &'a dyn Fetch,
}

impl<'a> WallpaperCache<'a> {
    pub fn new(dir: &Path, http: &'a dyn Fetch) -> WallpaperCache<'a> {
        WallpaperCache { dir: dir.to_path_buf(), http }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.jpg", date.format(DATE_FORMAT)))
    }

    /// Returns the cached file for `item`, downloading it first if needed.
    pub fn ensure_downloaded(&self, item: &FeedItem, today: NaiveDate) -> Result<PathBuf, AppErr> {
        let date = match item.date {
            Some(ref raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .or_kind(ErrorKind::InvalidItem, &format!("feed item has an unusable date {:?}", raw))?,
            None => today,
        };

        let image_url = match item.image_url {
            Some(ref url) if !url.is_empty() => url,
            _ => return Err(AppErr::new(ErrorKind::MissingImageUrl, &format!("feed item for {} has no imageUrl", date))),
        };

        let image_path = self.path_for(date);
        if image_path.exists() {
            return Ok(image_path);
        }

        info!("Downloading {} -> {}", image_url, image_path.display());
        let bytes = self.http.get(image_url).map_err(|err| match err {
            FetchError::Status(code) => AppErr::new(ErrorKind::ImageDownload, &format!("{} returned HTTP {}", image_url, code)),
            other => AppErr::from_err(ErrorKind::ImageDownload, image_url, other),
        })?;

        self.write_atomically(&image_path, &bytes)?;
        Ok(image_path)
    }

    // Written beside the target then renamed, so a crash never leaves a short `<date>.jpg`.
    fn write_atomically(&self, target: &Path, bytes: &[u8]) -> Result<(), AppErr> {
        let context = format!("writing {}", target.display());
        let mut tmp = NamedTempFile::new_in(&self.dir).or_kind(ErrorKind::ImageDownload, &context)?;
        tmp.write_all(bytes).or_kind(ErrorKind::ImageDownload, &context)?;
        tmp.as_file().sync_all().or_kind(ErrorKind::ImageDownload, &context)?;
        tmp.persist(target).or_kind(ErrorKind::ImageDownload, &context)?;
        Ok(())
    }
}
