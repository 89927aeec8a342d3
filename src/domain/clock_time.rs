use std::fmt::Display;

use anyhow::{anyhow, Result};
use chrono::Timelike;

use crate::compose;

use super::compose::compose;

pub const DEFAULT_TEMPLATE: &str = "hh:mm:ss tt";

/// A 24 hour wall clock reading, one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl RawTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self> {
        if hours > 23 {
            return Err(anyhow!("hours must be within 0..=23, got {hours}"));
        }
        if minutes > 59 {
            return Err(anyhow!("minutes must be within 0..=59, got {minutes}"));
        }
        if seconds > 59 {
            return Err(anyhow!("seconds must be within 0..=59, got {seconds}"));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// Raw time tagged with its period of day. Hours are only in the 12 hour
/// range once `civilian_hours` has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilianTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
    period: Period,
}

impl CivilianTime {
    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

/// The text form of each field, ready for padding and templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub period: Period,
}

impl From<CivilianTime> for ClockFace {
    fn from(time: CivilianTime) -> Self {
        ClockFace {
            hours: time.hours.to_string(),
            minutes: time.minutes.to_string(),
            seconds: time.seconds.to_string(),
            period: time.period,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayString(String);

impl DisplayString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for DisplayString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for DisplayString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn serialize_clock_time<T: Timelike>(date: &T) -> RawTime {
    // chrono folds a leap second into the nanoseconds, so second() stays below 60
    RawTime {
        hours: date.hour(),
        minutes: date.minute(),
        seconds: date.second(),
    }
}

pub fn append_ampm(time: RawTime) -> CivilianTime {
    CivilianTime {
        hours: time.hours,
        minutes: time.minutes,
        seconds: time.seconds,
        period: if time.hours >= 12 { Period::Pm } else { Period::Am },
    }
}

/// 13..=23 become 1..=11. 0 and 12 are left alone, so midnight reads "00".
pub fn civilian_hours(time: CivilianTime) -> CivilianTime {
    CivilianTime {
        hours: if time.hours > 12 {
            time.hours - 12
        } else {
            time.hours
        },
        ..time
    }
}

pub fn convert_to_civilian_time(time: RawTime) -> CivilianTime {
    compose(append_ampm, civilian_hours)(time)
}

fn pad(text: String) -> String {
    // the fields are non-negative, so one character means a value below 10
    if text.len() < 2 {
        format!("0{text}")
    } else {
        text
    }
}

pub fn prepend_zero(field: Field) -> impl Fn(ClockFace) -> ClockFace {
    move |face| match field {
        Field::Hours => ClockFace {
            hours: pad(face.hours),
            ..face
        },
        Field::Minutes => ClockFace {
            minutes: pad(face.minutes),
            ..face
        },
        Field::Seconds => ClockFace {
            seconds: pad(face.seconds),
            ..face
        },
    }
}

pub fn double_digits(time: CivilianTime) -> ClockFace {
    compose!(
        |time: CivilianTime| ClockFace::from(time),
        prepend_zero(Field::Hours),
        prepend_zero(Field::Minutes),
        prepend_zero(Field::Seconds),
    )(time)
}

/// Substitutes the first `hh`, `mm`, `ss` and `tt` of `template`.
pub fn format_clock(template: &str) -> impl Fn(ClockFace) -> DisplayString {
    let template = template.to_string();
    move |face| {
        DisplayString(
            template
                .replacen("hh", &face.hours, 1)
                .replacen("mm", &face.minutes, 1)
                .replacen("ss", &face.seconds, 1)
                .replacen("tt", &face.period.to_string(), 1),
        )
    }
}

/// The whole composed conversion, from a raw reading to the text on screen.
pub fn clock_pipeline(template: &str) -> impl Fn(RawTime) -> DisplayString {
    compose!(
        convert_to_civilian_time,
        double_digits,
        format_clock(template)
    )
}
