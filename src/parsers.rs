//! Free-text parsers for the cooking-parameter fields.
//!
//! The recipe document keeps `duration`, `temperature` and `speed` opaque;
//! these functions derive structured values on demand. They are pure and
//! total: malformed text degrades to a zero/`None` sentinel, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// The host keyword (in its source locale) marking a simmer/low-stir speed.
pub const SIMMER_KEYWORD: &str = "mijot";
/// The host's token for the soft stirring mode.
pub const SOFT_SPEED: &str = "soft";

static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*min").unwrap());
static SECONDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*sec").unwrap());
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.?\d*)").unwrap());

/// Minutes and seconds extracted from a free-text duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepDuration {
    pub minutes: u32,
    pub seconds: u32,
}

/// Extract minutes and seconds from text like `"12 min 5 sec"`.
///
/// The two components are matched independently; either may be absent and
/// defaults to zero.
pub fn parse_duration(text: &str) -> StepDuration {
    let grab = |re: &Regex| {
        re.captures(text)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0)
    };
    StepDuration {
        minutes: grab(&MINUTES_RE),
        seconds: grab(&SECONDS_RE),
    }
}

/// Extract the first integer run from text like `"120°"`.
pub fn parse_temperature(text: &str) -> Option<u32> {
    INTEGER_RE.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Extract the host's speed token from free text.
///
/// A simmer keyword wins over any number; otherwise the first numeric
/// token (integer or decimal) is returned verbatim, since the host's radio
/// options are keyed by the literal digits.
pub fn parse_speed(text: &str) -> Option<String> {
    if text.to_lowercase().contains(SIMMER_KEYWORD) {
        return Some(SOFT_SPEED.to_string());
    }
    NUMBER_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Decompose a minute count into the hour/minute components of the host's
/// time panel.
pub fn split_hours(minutes: u32) -> (u32, u32) {
    (minutes / 60, minutes % 60)
}
