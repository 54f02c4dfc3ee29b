use std::fmt;

use crate::error::{Error, Result};

/// Parse a `hh:mm:ss` timestamp into a number of seconds.
///
/// Components are not range checked, so `"99:99:99"` is accepted and means
/// `99 * 3600 + 99 * 60 + 99` seconds.
pub fn parse_timestamp(input: &str) -> Result<u64> {
    let format_error = || Error::TimeFormat {
        input: input.to_string(),
    };

    let parts: Vec<&str> = input.split(':').collect();
    let [h, m, s] = parts[..] else {
        return Err(format_error());
    };

    let component = |part: &str| part.trim().parse::<u64>().map_err(|_| format_error());
    let (h, m, s) = (component(h)?, component(m)?, component(s)?);

    h.checked_mul(3600)
        .and_then(|h| m.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(s))
        .ok_or_else(format_error)
}

/// A half-open window `[start, end)` on the playlist timeline, in whole seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    start: u64,
    end: u64,
}

impl TimeWindow {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start >= end {
            return Err(Error::Range { start, end });
        }

        Ok(Self { start, end })
    }

    /// Build a window from two `hh:mm:ss` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }
}

impl TryFrom<(u64, u64)> for TimeWindow {
    type Error = Error;

    fn try_from(value: (u64, u64)) -> Result<Self> {
        Self::new(value.0, value.1)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}s, {}s)", self.start, self.end)
    }
}
