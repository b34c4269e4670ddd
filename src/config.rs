use std::path::PathBuf;

use crate::country::Country;
use crate::error::{AppErr, ErrorKind};

pub const ENV_DISPLAY: &str = "DISPLAY";
pub const ENV_COUNTRY: &str = "BING_WALLPAPER_COUNTRY";
pub const ENV_PATH: &str = "BING_WALLPAPER_PATH";

const DEFAULT_DIR_NAME: &str = ".wallpapers";

/// Values given on the command line. They win over the environment.
#[derive(Default)]
pub struct Overrides {
    pub country: Option<Country>,
    pub wallpaper_dir: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Graphical session indicator, checked before anything else runs.
    pub display: Option<String>,
    pub country: Country,
    pub wallpaper_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from CLI overrides and an environment lookup.
    /// The graphical session is checked first, so a missing `DISPLAY` is reported
    /// ahead of any other configuration problem.
    /// `home` is only consulted when no wallpaper directory was given.
    pub fn resolve<F>(overrides: Overrides, lookup: F, home: Option<PathBuf>) -> Result<Config, AppErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let display = lookup(ENV_DISPLAY)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppErr::new(ErrorKind::SessionUnavailable, "DISPLAY is not set, is a graphical session running?"))?;

        let country = match overrides.country {
            Some(c) => c,
            None => Country::new(&lookup(ENV_COUNTRY).unwrap_or_default()),
        };

        let wallpaper_dir = match overrides.wallpaper_dir {
            Some(dir) => dir,
            None => match lookup(ENV_PATH).filter(|p| !p.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => home
                    .map(|h| h.join(DEFAULT_DIR_NAME))
                    .ok_or_else(|| AppErr::new(ErrorKind::Config, "cannot determine the home directory, set BING_WALLPAPER_PATH"))?,
            },
        };

        Ok(Config { display: Some(display), country, wallpaper_dir })
    }
}
