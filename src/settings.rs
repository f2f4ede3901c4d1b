//! Runtime settings
//!
//! Parsed once at startup from the process arguments. Bad values fall back
//! to defaults with a warning, mirroring the simulation's silent-ignore
//! posture toward invalid commands.

use std::time::Duration;

use serde::Serialize;

use crate::consts::TICK_INTERVAL_MS;

/// Startup settings for the driver loop and frontend
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Fixed RNG seed; None seeds from the wall clock
    pub seed: Option<u64>,
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Difficulty level at startup (1..=3)
    pub start_difficulty: u8,
    /// ANSI colors on/off
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_INTERVAL_MS,
            start_difficulty: 1,
            color: true,
        }
    }
}

impl Settings {
    /// Parse `--seed N`, `--tick-ms N`, `--difficulty N` and `--no-color`
    /// from an argument iterator. Unknown flags and unparsable values are
    /// warned about and skipped.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    settings.seed = parse_value(args.next(), "--seed");
                }
                "--tick-ms" => {
                    if let Some(ms) = parse_value(args.next(), "--tick-ms") {
                        settings.tick_ms = ms;
                    }
                }
                "--difficulty" => {
                    if let Some(level) = parse_value::<u8>(args.next(), "--difficulty") {
                        settings.start_difficulty = level;
                    }
                }
                "--no-color" => {
                    settings.color = false;
                }
                other => {
                    log::warn!("ignoring unknown argument {other:?}");
                }
            }
        }
        settings
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn parse_value<T: std::str::FromStr>(value: Option<String>, flag: &str) -> Option<T> {
    match value.as_deref().map(str::parse) {
        Some(Ok(parsed)) => Some(parsed),
        Some(Err(_)) => {
            log::warn!("ignoring unparsable value {:?} for {flag}", value.as_deref());
            None
        }
        None => {
            log::warn!("missing value for {flag}");
            None
        }
    }
}
