use std::error::Error;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// What went wrong, and whether the run can carry on past it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    SessionUnavailable,
    Config,
    FeedFetch,
    MissingImageUrl,
    InvalidItem,
    ImageDownload,
    TodayImageMissing,
    ApplyWallpaper,
}

impl ErrorKind {
    /// Item-level errors are reported and skipped; everything else ends the run.
    pub fn is_item_level(self) -> bool {
        match self {
            ErrorKind::MissingImageUrl | ErrorKind::InvalidItem | ErrorKind::ImageDownload => true,
            _ => false,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ErrorKind::SessionUnavailable => "session",
            ErrorKind::Config => "config",
            ErrorKind::FeedFetch => "feed",
            ErrorKind::MissingImageUrl => "missing-image-url",
            ErrorKind::InvalidItem => "invalid-item",
            ErrorKind::ImageDownload => "download",
            ErrorKind::TodayImageMissing => "today-missing",
            ErrorKind::ApplyWallpaper => "apply",
        }
    }
}

pub struct AppErr {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl AppErr {
    pub fn new(kind: ErrorKind, message: &str) -> AppErr {
        AppErr {
            kind,
            message: format!("[{}] {}", kind.label(), message),
            source: None,
        }
    }

    pub fn from_err<E>(kind: ErrorKind, context: &str, error: E) -> AppErr
    where
        E: Error + Send + Sync + 'static,
    {
        AppErr {
            kind,
            message: format!("[{}] {}: {}", kind.label(), context, error),
            source: Some(Box::new(error)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_item_level(&self) -> bool {
        self.kind.is_item_level()
    }
}

impl Display for AppErr {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        write!(f, "{}", self.message)
    }
}

impl Debug for AppErr {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        Display::fmt(self, f)
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.source {
            Some(ref err) => Some(err.as_ref()),
            None => None,
        }
    }
}

/// Tags a foreign error with the kind that applies at the call site.
pub trait ResultExt<T> {
    fn or_kind(self, kind: ErrorKind, context: &str) -> Result<T, AppErr>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn or_kind(self, kind: ErrorKind, context: &str) -> Result<T, AppErr> {
        self.map_err(|err| AppErr::from_err(kind, context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn only_download_errors_are_item_level() {
        assert!(ErrorKind::MissingImageUrl.is_item_level());
        assert!(ErrorKind::InvalidItem.is_item_level());
        assert!(ErrorKind::ImageDownload.is_item_level());
        assert!(!ErrorKind::FeedFetch.is_item_level());
        assert!(!ErrorKind::TodayImageMissing.is_item_level());
        assert!(!ErrorKind::SessionUnavailable.is_item_level());
        assert!(!ErrorKind::ApplyWallpaper.is_item_level());
    }

    #[test]
    fn or_kind_keeps_source_and_prefixes_message() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.or_kind(ErrorKind::Config, "creating /tmp/x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.to_string(), "[config] creating /tmp/x: gone");
        assert!(err.source().is_some());
    }
}
