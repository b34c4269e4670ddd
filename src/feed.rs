use log::debug;
use reqwest::Url;
use serde_derive::Deserialize;
use serde_json::Value;

use crate::country::Country;
use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::http::{Fetch, FetchError};

pub const FEED_URL: &str = "https://peapix.com/bing/feed";

/// One day's entry in the peapix Bing feed.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub date: Option<String>,
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub copyright: Option<String>,
    pub page_url: Option<String>,
}

/// A feed entry that failed to decode is kept in place as an item-level error.
pub type FeedEntry = Result<FeedItem, AppErr>;

/// The country is passed through as given, percent-encoded.
pub fn feed_url(country: &Country) -> Result<String, AppErr> {
    let url = Url::parse_with_params(FEED_URL, &[("country", country.as_str())]).or_kind(ErrorKind::FeedFetch, "building feed URL")?;
    Ok(url.into())
}

pub struct FeedClient<'a> {
    http: &'a dyn Fetch,
}

impl<'a> FeedClient<'a> {
    pub fn new(http: &'a dyn Fetch) -> FeedClient<'a> {
        FeedClient { http }
    }

    /// Items come back in server order, which is newest first.
    /// The feed itself must be a JSON array; a malformed entry only spoils itself.
    pub fn get_feed(&self, country: &Country) -> Result<Vec<FeedEntry>, AppErr> {
        let url = feed_url(country)?;
        let body = self.http.get(&url).map_err(|err| match err {
            FetchError::Status(code) => AppErr::new(ErrorKind::FeedFetch, &format!("{} returned HTTP {}", url, code)),
            other => AppErr::from_err(ErrorKind::FeedFetch, &url, other),
        })?;

        let values: Vec<Value> = serde_json::from_slice(&body).or_kind(ErrorKind::FeedFetch, "parsing feed")?;
        debug!("feed for {} has {} items", country, values.len());

        let entries: Vec<FeedEntry> = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| serde_json::from_value(value).or_kind(ErrorKind::InvalidItem, &format!("feed item {}", i)))
            .collect();
        Ok(entries)
    }
}
