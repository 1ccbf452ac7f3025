//! Time field parsing and the run-wide timeout accumulator.

use std::sync::OnceLock;

use regex_lite::Regex;

use super::NormalizeError;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((\d+)s\)").expect("timeout pattern compiles"))
}

/// Parsed time field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeText {
    /// Completed run, in seconds.
    Completed(f64),
    /// Run hit the timeout, in whole seconds.
    Timeout(u64),
}

/// Parse a time field: a decimal number, or text containing `timeout` and a
/// parenthesised duration like `(600s)`.
pub fn parse_time(text: &str, line_number: usize) -> Result<TimeText, NormalizeError> {
    if text.contains("timeout") {
        let seconds = duration_pattern()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(|| NormalizeError::MalformedTimeout {
                line_number,
                text: text.to_string(),
            })?;
        return Ok(TimeText::Timeout(seconds));
    }

    text.trim()
        .parse::<f64>()
        .map(TimeText::Completed)
        .map_err(|_| NormalizeError::InvalidTime {
            line_number,
            text: text.to_string(),
        })
}

/// Tracks the single timeout value of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutTracker {
    observed: Option<u64>,
}

impl TimeoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timeout; fails if it differs from one seen earlier.
    pub fn observe(&mut self, seconds: u64, line_number: usize) -> Result<(), NormalizeError> {
        match self.observed {
            Some(first) if first != seconds => Err(NormalizeError::InconsistentTimeout {
                line_number,
                first,
                second: seconds,
            }),
            _ => {
                self.observed = Some(seconds);
                Ok(())
            }
        }
    }

    /// The timeout seen so far, if any.
    pub fn observed(&self) -> Option<u64> {
        self.observed
    }
}
