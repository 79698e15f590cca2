//! Publication dates
//!
//! Upstream scrapers emit dates in whatever shape the outlet publishes them.
//! Parsing never fails loudly: a value that matches no known format becomes
//! `ClaimDate::Unparsed`, and callers decide what that means.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time formats tried after RFC 3339, in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d-%m-%Y | %H:%M",   // 17-01-2023 | 10:06
    "%B %d, %Y %I:%M %p", // January 17, 2023 10:06 AM
];

/// Date-only formats
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Publication date of a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimDate {
    /// Successfully parsed timestamp, with the upstream text
    Parsed {
        /// Timestamp (naive values are read as UTC)
        at: DateTime<Utc>,
        /// Text as supplied upstream
        raw: String,
    },

    /// Upstream supplied a value that matches no known format
    Unparsed(String),

    /// Upstream supplied nothing
    Absent,
}

impl ClaimDate {
    /// Parse an upstream date string
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::ClaimDate;
    ///
    /// assert!(ClaimDate::parse("2025-01-17T13:44:00Z").is_parsed());
    /// assert!(ClaimDate::parse("Fri, 17 Jan 2025 13:44:00 GMT").is_parsed());
    /// assert!(!ClaimDate::parse("yesterday").is_parsed());
    /// assert_eq!(ClaimDate::parse("  "), ClaimDate::Absent);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ClaimDate::Absent;
        }

        match parse_timestamp(trimmed) {
            Some(at) => ClaimDate::Parsed {
                at,
                raw: raw.to_string(),
            },
            None => ClaimDate::Unparsed(raw.to_string()),
        }
    }

    /// Parsed timestamp, if any
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ClaimDate::Parsed { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// Whether the date parsed
    pub fn is_parsed(&self) -> bool {
        matches!(self, ClaimDate::Parsed { .. })
    }

    /// The upstream text ("" when absent)
    pub fn raw(&self) -> &str {
        match self {
            ClaimDate::Parsed { raw, .. } => raw,
            ClaimDate::Unparsed(raw) => raw,
            ClaimDate::Absent => "",
        }
    }

    /// Absolute distance in whole days (truncated toward zero)
    ///
    /// `None` unless both dates parsed.
    pub fn days_between(&self, other: &ClaimDate) -> Option<i64> {
        let (a, b) = (self.timestamp()?, other.timestamp()?);
        Some((a - b).num_days().abs())
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO values with a bare "Z" that RFC 3339 rejected (e.g. no seconds)
    let naive_input = s.strip_suffix('Z').unwrap_or(s);
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive_input, format) {
            return Some(dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    // Last resort: a leading YYYY-MM-DD followed by anything
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
