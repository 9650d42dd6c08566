use std::ffi::{OsStr, OsString};
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

use crate::PlaySettings;

pub const DEFAULT_VOLUME: u8 = 100;
pub const DEFAULT_REPEAT: u32 = 1;
pub const DEFAULT_GAP_MS: u64 = 10;
pub const DEFAULT_SEQUENCE_GAP_MS: u64 = 25;
pub const DEFAULT_DURATION_MS: u64 = 250;

const VOLUME_RANGE: RangeInclusive<i64> = 0..=100;
const REPEAT_RANGE: RangeInclusive<i64> = 1..=50;
const GAP_RANGE: RangeInclusive<i64> = 0..=10_000;
const DURATION_RANGE: RangeInclusive<i64> = 0..=60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub sounds: Vec<OsString>,
    pub volume: u8,
    pub repeat: u32,
    pub gap_ms: u64,
    pub sequence_gap_ms: u64,
    pub duration_ms: u64,
    pub wait: bool,
    pub help: bool,
    pub list_sounds: bool,
    pub version: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sounds: Vec::new(),
            volume: DEFAULT_VOLUME,
            repeat: DEFAULT_REPEAT,
            gap_ms: DEFAULT_GAP_MS,
            sequence_gap_ms: DEFAULT_SEQUENCE_GAP_MS,
            duration_ms: DEFAULT_DURATION_MS,
            wait: true,
            help: false,
            list_sounds: false,
            version: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("missing value for {flag}")]
    MissingValue { flag: String },
    #[error("invalid number for {flag}: {value}")]
    InvalidNumber { flag: String, value: String },
    #[error("{flag} must be between {min} and {max} (got {value})")]
    OutOfRange {
        flag: String,
        value: String,
        min: i64,
        max: i64,
    },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

impl Options {
    pub fn parse<I, S>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let flag = arg.to_string_lossy().into_owned();
            match flag.as_str() {
                "-h" | "--help" => options.help = true,
                "-l" | "--list-sounds" => options.list_sounds = true,
                "-V" | "--version" => options.version = true,
                "--wait" => options.wait = true,
                "--no-wait" => options.wait = false,
                "-s" | "--sound" => {
                    let value = take_value(&flag, &mut args)?;
                    options.sounds.push(value);
                }
                "-v" | "--volume" => {
                    let value = take_value(&flag, &mut args)?;
                    options.volume = parse_bounded(&flag, &value, VOLUME_RANGE)? as u8;
                }
                "-r" | "--repeat" => {
                    let value = take_value(&flag, &mut args)?;
                    options.repeat = parse_bounded(&flag, &value, REPEAT_RANGE)? as u32;
                }
                "--gap" => {
                    let value = take_value(&flag, &mut args)?;
                    options.gap_ms = parse_bounded(&flag, &value, GAP_RANGE)? as u64;
                }
                "--sequence-gap" => {
                    let value = take_value(&flag, &mut args)?;
                    options.sequence_gap_ms = parse_bounded(&flag, &value, GAP_RANGE)? as u64;
                }
                "-d" | "--duration-ms" => {
                    let value = take_value(&flag, &mut args)?;
                    options.duration_ms = parse_bounded(&flag, &value, DURATION_RANGE)? as u64;
                }
                other if other.starts_with('-') => {
                    return Err(ArgError::UnknownArgument(other.to_string()));
                }
                _ => options.sounds.push(arg),
            }
        }

        Ok(options)
    }

    pub fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }

    pub fn sequence_gap(&self) -> Duration {
        Duration::from_millis(self.sequence_gap_ms)
    }

    pub fn duration_cap(&self) -> Option<Duration> {
        (self.duration_ms > 0).then(|| Duration::from_millis(self.duration_ms))
    }

    pub fn play_settings(&self) -> PlaySettings {
        PlaySettings {
            volume: f32::from(self.volume) / 100.0,
            duration_cap: self.duration_cap(),
        }
    }
}

// Value flags always take the next token, so `--volume -1` is a range error.
fn take_value<I>(flag: &str, args: &mut I) -> Result<OsString, ArgError>
where
    I: Iterator<Item = OsString>,
{
    args.next().ok_or_else(|| ArgError::MissingValue {
        flag: flag.to_string(),
    })
}

fn parse_bounded(flag: &str, value: &OsStr, range: RangeInclusive<i64>) -> Result<i64, ArgError> {
    let value = value.to_string_lossy();
    let value = value.trim();
    let out_of_range = || ArgError::OutOfRange {
        flag: flag.to_string(),
        value: value.to_string(),
        min: *range.start(),
        max: *range.end(),
    };
    match value.parse::<i64>() {
        Ok(parsed) if range.contains(&parsed) => Ok(parsed),
        Ok(_) => Err(out_of_range()),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(out_of_range())
        }
        Err(_) => Err(ArgError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}
