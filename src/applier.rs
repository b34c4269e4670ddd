use std::path::Path;

use log::{info, warn};

use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::process::CommandRunner;

const XFCONF: &str = "xfconf-query";
const CHANNEL: &str = "xfce4-desktop";

#[derive(Debug, Default, PartialEq)]
pub struct ApplyReport {
    pub applied: Vec<String>,
    pub failed: Vec<String>,
}

pub trait WallpaperApplier {
    fn apply(&self, image_path: &Path, monitors: &[String]) -> Result<ApplyReport, AppErr>;
}

pub fn last_image_property(monitor: &str) -> String {
    format!("/backdrop/screen0/monitor{}/workspace0/last-image", monitor)
}

/// Sets the XFCE desktop background through `xfconf-query`.
pub struct Xfconf<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Xfconf<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Xfconf<'a> {
        Xfconf { runner }
    }
}

impl<'a> WallpaperApplier for Xfconf<'a> {
    fn apply(&self, image_path: &Path, monitors: &[String]) -> Result<ApplyReport, AppErr> {
        let image = image_path.to_string_lossy();
        let mut report = ApplyReport::default();

        for monitor in monitors {
            let property = last_image_property(monitor);
            let args = ["-c", CHANNEL, "-p", property.as_str(), "-s", &*image];
            let output = self.runner.run(XFCONF, &args).or_kind(ErrorKind::ApplyWallpaper, "running xfconf-query")?;

            if output.success {
                info!("Set {} on {}", image, monitor);
                report.applied.push(monitor.clone());
            } else {
                warn!("xfconf-query failed for {}: {}", monitor, output.stderr.trim());
                report.failed.push(monitor.clone());
            }
        }

        // Single failures are tolerated; a run where nothing took is not.
        if report.applied.is_empty() && !report.failed.is_empty() {
            return Err(AppErr::new(
                ErrorKind::ApplyWallpaper,
                &format!("xfconf-query failed on every monitor ({})", report.failed.join(", ")),
            ));
        }
        Ok(report)
    }
}
