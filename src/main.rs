mod app;
mod applier;
mod cache;
mod config;
mod country;
mod display;
mod error;
mod feed;
mod http;
mod process;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use chrono::Local;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, error, info, LevelFilter};

use crate::applier::Xfconf;
use crate::config::{Config, Overrides};
use crate::country::{Country, CountryValueParser};
use crate::display::Xrandr;
use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::http::HttpClient;
use crate::process::SystemRunner;

fn main() {
    let matches = cli().get_matches();

    if let Err(err) = init_logging(&matches) {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    if let Err(err) = run(&matches) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("bing-desktop-updater")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sets today's Bing image as the XFCE wallpaper on every connected monitor")
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("CODE")
                .value_parser(CountryValueParser)
                .help("Feed country code, overrides BING_WALLPAPER_COUNTRY"),
        )
        .arg(
            Arg::new("wallpaper-dir")
                .long("wallpaper-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Where images are cached, overrides BING_WALLPAPER_PATH"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write log output to FILE instead of stderr"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log debug output"),
        )
}

fn init_logging(matches: &ArgMatches) -> Result<(), AppErr> {
    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    match matches.get_one::<PathBuf>("log-file") {
        Some(path) => simple_logging::log_to_file(path, level).or_kind(ErrorKind::Config, &format!("opening log file {}", path.display())),
        None => {
            simple_logging::log_to_stderr(level);
            Ok(())
        }
    }
}

fn overrides(matches: &ArgMatches) -> Overrides {
    Overrides {
        country: matches.get_one::<Country>("country").cloned(),
        wallpaper_dir: matches.get_one::<PathBuf>("wallpaper-dir").cloned(),
    }
}

fn run(matches: &ArgMatches) -> Result<(), AppErr> {
    // Resolving checks DISPLAY first, before any client or network setup.
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let config = Config::resolve(overrides(matches), |key| std::env::var(key).ok(), home)?;

    let http = HttpClient::new().or_kind(ErrorKind::FeedFetch, "building HTTP client")?;
    let runner = SystemRunner;
    let today = Local::now().date_naive();

    let summary = app::run(&config, today, &http, &Xrandr::new(&runner), &Xfconf::new(&runner))?;

    match summary.item.as_ref().and_then(|item| item.title.as_ref()) {
        Some(title) => info!("Wallpaper updated for {}: {}", today, title),
        None => info!("Wallpaper updated for {}", today),
    }
    if let Some(ref item) = summary.item {
        if let Some(ref copyright) = item.copyright {
            info!("{}", copyright);
        }
        if let Some(ref page) = item.page_url {
            debug!("More about today's image: {}", page);
        }
    }
    info!("{} applied to {} of {} monitors", summary.image_path.display(), summary.applied.len(), summary.monitors.len());
    Ok(())
}
