use log::{debug, warn};

use crate::error::{AppErr, ErrorKind, ResultExt};
use crate::process::CommandRunner;

/// Anything that can name the outputs currently driving a screen.
pub trait MonitorSource {
    fn connected_monitors(&self) -> Result<Vec<String>, AppErr>;
}

pub struct Xrandr<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Xrandr<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Xrandr<'a> {
        Xrandr { runner }
    }
}

impl<'a> MonitorSource for Xrandr<'a> {
    fn connected_monitors(&self) -> Result<Vec<String>, AppErr> {
        let output = self.runner.run("xrandr", &[]).or_kind(ErrorKind::ApplyWallpaper, "running xrandr")?;
        if !output.success {
            warn!("xrandr exited with an error: {}", output.stderr.trim());
        }

        let monitors = parse_connected_monitors(&output.stdout);
        if monitors.is_empty() {
            warn!("xrandr reported no connected outputs");
        } else {
            debug!("connected outputs: {}", monitors.join(", "));
        }
        Ok(monitors)
    }
}

/// First token of every line mentioning " connected", in output order.
/// " disconnected" does not match because the space must precede "connected".
pub fn parse_connected_monitors(xrandr_output: &str) -> Vec<String> {
    xrandr_output
        .lines()
        .filter(|line| line.contains(" connected"))
        .filter_map(|line| line.split_whitespace().next())
        .map(String::from)
        .collect()
}
