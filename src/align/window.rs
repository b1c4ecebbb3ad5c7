use crate::error::{Result, SyncError};

/// Wall-clock window, in seconds from the start of the recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl TimeWindow {
    /// Both bounds must be finite and non-negative. Ordering is checked at
    /// extraction time, where it is reported against the sample indices.
    pub fn new(start_secs: f64, end_secs: f64) -> Result<Self> {
        for (label, value) in [("start", start_secs), ("end", end_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SyncError::Validation(format!(
                    "{} time must be a non-negative number of seconds, got {}",
                    label, value
                )));
            }
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// Parse both bounds with [`parse_clock_time`].
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_clock_time(start)?, parse_clock_time(end)?)
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Parse `HH:MM:SS` (integer parts) or a plain number of seconds.
pub fn parse_clock_time(text: &str) -> Result<f64> {
    let text = text.trim();
    let invalid = || {
        SyncError::Validation(format!(
            "`{}` is not a time; expected HH:MM:SS or seconds",
            text
        ))
    };

    if !text.contains(':') {
        let secs: f64 = text.parse().map_err(|_| invalid())?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(invalid());
        }
        return Ok(secs);
    }

    let parts: Vec<&str> = text.split(':').collect();
    let [h, m, s] = parts.as_slice() else {
        return Err(invalid());
    };
    let parse = |p: &str| p.trim().parse::<u64>().map_err(|_| invalid());
    let (h, m, s) = (parse(*h)?, parse(*m)?, parse(*s)?);

    let total = h
        .checked_mul(3600)
        .zip(m.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(s))
        .ok_or_else(invalid)?;
    Ok(total as f64)
}
