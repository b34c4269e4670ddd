use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};

use crate::applier::WallpaperApplier;
use crate::cache::WallpaperCache;
use crate::config::Config;
use crate::display::MonitorSource;
use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::feed::{FeedClient, FeedEntry, FeedItem};
use crate::http::Fetch;

#[derive(Debug)]
pub struct RunSummary {
    pub image_path: PathBuf,
    /// Today's feed entry, when the feed had one.
    pub item: Option<FeedItem>,
    pub monitors: Vec<String>,
    pub applied: Vec<String>,
}

/// Fetches the feed, caches images up to today's, and applies today's wallpaper.
/// Any `Err` returned here ends the run; item-level errors are logged inside.
pub fn run(
    config: &Config,
    today: NaiveDate,
    http: &dyn Fetch,
    monitor_source: &dyn MonitorSource,
    applier: &dyn WallpaperApplier,
) -> Result<RunSummary, AppErr> {
    if config.display.is_none() {
        return Err(AppErr::new(ErrorKind::SessionUnavailable, "DISPLAY is not set, is a graphical session running?"));
    }

    fs::create_dir_all(&config.wallpaper_dir)
        .or_kind(ErrorKind::Config, &format!("creating {}", config.wallpaper_dir.display()))?;

    info!("Fetching {} feed", config.country);
    let entries = FeedClient::new(http).get_feed(&config.country)?;

    let cache = WallpaperCache::new(&config.wallpaper_dir, http);
    let today_path = cache.path_for(today);
    let item = cache_until_today(&cache, &entries, today, &today_path)?;

    if !today_path.exists() {
        return Err(AppErr::new(ErrorKind::TodayImageMissing, &format!("no wallpaper found for today ({})", today)));
    }

    let monitors = monitor_source.connected_monitors()?;
    let report = applier.apply(&today_path, &monitors)?;

    Ok(RunSummary {
        image_path: today_path,
        item,
        monitors,
        applied: report.applied,
    })
}

// Walks the feed in server order and stops once today's file has been handled.
fn cache_until_today(
    cache: &WallpaperCache,
    entries: &[FeedEntry],
    today: NaiveDate,
    today_path: &Path,
) -> Result<Option<FeedItem>, AppErr> {
    for entry in entries {
        let item = match entry {
            Ok(item) => item,
            Err(err) => {
                warn!("Skipping feed item: {}", err);
                continue;
            }
        };
        match cache.ensure_downloaded(item, today) {
            Ok(ref path) if path == today_path => return Ok(Some(item.clone())),
            Ok(_) => {}
            Err(ref err) if err.is_item_level() => warn!("Skipping feed item: {}", err),
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}
