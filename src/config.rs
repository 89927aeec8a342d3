use std::time::Duration;

use log::warn;

use crate::services::ticker::{Style, ONE_SECOND};

pub const INTERVAL_VAR: &str = "CLOCK_INTERVAL_MS";
pub const STYLE_VAR: &str = "CLOCK_STYLE";
pub const FORMAT_VAR: &str = "CLOCK_FORMAT";

fn getenv(name: &str) -> String {
    match std::env::var(name) {
        Ok(var) => var,
        _ => "".to_string(),
    }
}

/// Settings for the clock binary. The library itself reads nothing from the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    pub period: Duration,
    pub style: Style,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: ONE_SECOND,
            style: Style::default(),
        }
    }
}

impl ClockConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(getenv)
    }

    /// Builds the config from `lookup`, which returns an empty string for
    /// unset variables. Bad values fall back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> String) -> Self {
        Self {
            period: parse_period(&lookup(INTERVAL_VAR)),
            style: parse_style(&lookup(STYLE_VAR), &lookup(FORMAT_VAR)),
        }
    }
}

fn parse_period(raw: &str) -> Duration {
    if raw.is_empty() {
        return ONE_SECOND;
    }
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!("{INTERVAL_VAR} must be above zero. Falling back to {ONE_SECOND:?}.");
            ONE_SECOND
        }
        Ok(millis) => Duration::from_millis(millis),
        Err(e) => {
            warn!("Could not parse {INTERVAL_VAR}={raw:?} ({e}). Falling back to {ONE_SECOND:?}.");
            ONE_SECOND
        }
    }
}

fn parse_style(style: &str, template: &str) -> Style {
    match style.trim().to_lowercase().as_str() {
        "imperative" => {
            if !template.is_empty() {
                warn!("{FORMAT_VAR} is ignored by the imperative style.");
            }
            Style::Imperative
        }
        other => {
            if !other.is_empty() && other != "composed" {
                warn!("Unknown {STYLE_VAR} {style:?}. Falling back to composed.");
            }
            if template.is_empty() {
                Style::default()
            } else {
                Style::Composed {
                    template: template.into(),
                }
            }
        }
    }
}
