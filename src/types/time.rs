use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

use super::BoundedText;

pub const TIMEZONE_CAPACITY: usize = 64;
const TZID_PARAM: &str = "TZID=";
const DEFAULT_TIMEZONE: &str = "UTC";

// Byte offsets inside YYYYMMDDTHHMM
const YEAR: (usize, usize) = (0, 4);
const MONTH: (usize, usize) = (4, 2);
const DAY: (usize, usize) = (6, 2);
const HOUR: (usize, usize) = (9, 2);
const MINUTE: (usize, usize) = (11, 2);
const DATE_LEN: usize = 8;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("expected at least {expected} bytes, found {found}")]
    TooShort { expected: usize, found: usize },
    #[error("invalid digit {byte:#04x} at offset {offset}")]
    InvalidDigit { offset: usize, byte: u8 },
}

/// Decode the first `width` bytes of `text` as an unsigned decimal number.
///
/// Every byte must be an ASCII digit.
pub fn decode_fixed_digits(text: &[u8], width: usize) -> Result<u32, TimeError> {
    let Some(digits) = text.get(..width) else {
        return Err(TimeError::TooShort {
            expected: width,
            found: text.len(),
        });
    };
    digits
        .iter()
        .enumerate()
        .try_fold(0u32, |acc, (offset, &byte)| {
            if !byte.is_ascii_digit() {
                return Err(TimeError::InvalidDigit { offset, byte });
            }
            Ok(acc.wrapping_mul(10).wrapping_add(u32::from(byte - b'0')))
        })
}

fn decode_at(text: &[u8], (offset, width): (usize, usize)) -> Result<u32, TimeError> {
    let Some(rest) = text.get(offset..) else {
        return Err(TimeError::TooShort {
            expected: offset + width,
            found: text.len(),
        });
    };
    decode_fixed_digits(rest, width).map_err(|err| match err {
        TimeError::TooShort { expected, .. } => TimeError::TooShort {
            expected: offset + expected,
            found: text.len(),
        },
        TimeError::InvalidDigit {
            offset: inner,
            byte,
        } => TimeError::InvalidDigit {
            offset: offset + inner,
            byte,
        },
    })
}

/// Composite ordering key over (year, month, day, hour, minute).
///
/// Only meaningful for comparisons: no calendar validation is involved.
pub const fn calendar_stamp(year: u32, month: u32, day: u32, hour: u32, min: u32) -> u64 {
    year as u64 * 100_000_000 + month as u64 * 1_000_000 + day as u64 * 10_000 + hour as u64 * 100
        + min as u64
}

/// Wall-clock date and time as written in a `DTSTART`/`DTEND` value.
///
/// The timezone is kept as the raw `TZID` label and never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub min: u32,
    pub timezone: BoundedText<TIMEZONE_CAPACITY>,
}

impl Default for CalendarTime {
    fn default() -> Self {
        Self {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            min: 0,
            timezone: BoundedText::truncated(DEFAULT_TIMEZONE),
        }
    }
}

impl CalendarTime {
    /// Parse a `YYYYMMDDTHHMM[SS][Z]` or `YYYYMMDD` value.
    ///
    /// `params` is the raw parameter string of the content line, if any. Only its `TZID` is used.
    pub fn parse(value: &str, params: Option<&str>) -> Result<Self, TimeError> {
        let bytes = value.as_bytes();
        let mut time = Self {
            year: decode_at(bytes, YEAR)?,
            month: decode_at(bytes, MONTH)?,
            day: decode_at(bytes, DAY)?,
            ..Default::default()
        };
        if bytes.len() > DATE_LEN {
            time.hour = decode_at(bytes, HOUR)?;
            time.min = decode_at(bytes, MINUTE)?;
        }
        if let Some(tzid) = params.and_then(tzid_param) {
            time.timezone.set(tzid);
        }
        Ok(time)
    }

    pub fn from_naive(datetime: NaiveDateTime, timezone: &str) -> Self {
        Self {
            year: datetime.year().max(0) as u32,
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            min: datetime.minute(),
            timezone: BoundedText::truncated(timezone),
        }
    }

    /// Current local wall-clock time.
    pub fn now_local() -> Self {
        Self::from_naive(Local::now().naive_local(), "Local")
    }

    /// `None` if the fields do not form a real date and time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(i32::try_from(self.year).ok()?, self.month, self.day)?
            .and_hms_opt(self.hour, self.min, 0)
    }

    #[inline]
    pub fn stamp(&self) -> u64 {
        calendar_stamp(self.year, self.month, self.day, self.hour, self.min)
    }

    #[inline]
    pub fn same_day(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }

    /// `DD/MM/YYYY`
    pub fn date_label(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02} {}",
            self.year, self.month, self.day, self.hour, self.min, self.timezone
        )
    }
}

/// Everything after the first `TZID=`, verbatim, including any parameters that follow it.
fn tzid_param(params: &str) -> Option<&str> {
    let start = params.find(TZID_PARAM)? + TZID_PARAM.len();
    Some(&params[start..])
}
