//! Parses the camera's `autographer.inf` info file
mod common;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use nom::{combinator::all_consuming, error::ErrorKind, sequence::tuple};

use common::*;

/// Marks the line of the info file holding the camera's clock reading.
pub const TIME_MARKER: &str = "Time=";

/// Length of a `YYYY-MM-DDTHH:MM:SS` timestamp.
const TIMESTAMP_LEN: usize = 19;

/// Parses a `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn timestamp(s: ParserInput) -> ParserResult<NaiveDateTime> {
    let (remainder, (year, month, day, hour, minute, second)) = tuple((
        digits(4),
        field('-'),
        field('-'),
        field('T'),
        field(':'),
        field(':'),
    ))(s)?;

    let datetime = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| nom::Err::Error(nom::error::Error::new(s, ErrorKind::Verify)))?;

    Ok((remainder, datetime))
}

/// Recovers the camera's clock reading from the contents of its info file.
///
/// The first line containing [`TIME_MARKER`] wins: whatever follows the last
/// `=` on that line is cut to the length of a timestamp and parsed.
pub fn camera_time(info: &str) -> Result<NaiveDateTime> {
    let line = info
        .lines()
        .find(|line| line.contains(TIME_MARKER))
        .ok_or(anyhow!("no {TIME_MARKER:?} entry in info file"))?;

    let value = line.rsplit('=').next().unwrap_or_default();
    let value = match value.char_indices().nth(TIMESTAMP_LEN) {
        Some((end, _)) => &value[..end],
        None => value,
    };

    let (_, datetime) = all_consuming(timestamp)(value)
        .map_err(|e| anyhow!("malformed camera timestamp {value:?}: {e}"))?;
    Ok(datetime)
}
