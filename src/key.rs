//! Parse the hierarchical keys of the archive.
//!
//! Objects in the bucket are stored under `YYYY/MM/DD/SITE/filename`. Listing one level of the
//! hierarchy at a time returns prefixes (or keys, at the bottom) that are matched against fixed
//! position patterns. Anything that does not match is not an error, listings legitimately
//! contain directory markers and unrelated objects.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use strum_macros::{AsStaticStr, EnumIter};

use crate::errors::NexradDataErr;

/// Levels of the archive hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsStaticStr, EnumIter)]
pub enum Level {
    /// Four digit year.
    #[strum(serialize = "year")]
    Year,
    /// Two digit month.
    #[strum(serialize = "month")]
    Month,
    /// Two digit day.
    #[strum(serialize = "day")]
    Day,
    /// Four character radar site.
    #[strum(serialize = "radar")]
    Radar,
    /// Scan file name.
    #[strum(serialize = "scan")]
    Scan,
}

/// Compiled patterns for each level of the hierarchy.
#[derive(Clone, Debug)]
pub struct KeyPatterns {
    year: Regex,
    month: Regex,
    day: Regex,
    radar: Regex,
    scan: Regex,
}

impl KeyPatterns {
    /// All scan files end with this suffix.
    pub const SCAN_SUFFIX: &'static str = ".gz";

    /// Compile the patterns.
    pub fn new() -> Result<Self, NexradDataErr> {
        Ok(KeyPatterns {
            year: Regex::new(r"^(\d{4})/")?,
            month: Regex::new(r"^\d{4}/(\d{2})/")?,
            day: Regex::new(r"^\d{4}/\d{2}/(\d{2})/")?,
            radar: Regex::new(r"^\d{4}/\d{2}/\d{2}/([^/]{4})/")?,
            scan: Regex::new(&format!(
                r"^\d{{4}}/\d{{2}}/\d{{2}}/[^/]{{4}}/([^/]+{})$",
                regex::escape(Self::SCAN_SUFFIX)
            ))?,
        })
    }

    /// Extract the component at `level` from a key or key prefix.
    ///
    /// Returns `None` if the key does not reach that level or does not fit the pattern.
    pub fn extract<'a>(&self, level: Level, key: &'a str) -> Option<&'a str> {
        self.pattern(level)
            .captures(key)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Extract the year.
    pub fn year<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.extract(Level::Year, key)
    }

    /// Extract the month.
    pub fn month<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.extract(Level::Month, key)
    }

    /// Extract the day.
    pub fn day<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.extract(Level::Day, key)
    }

    /// Extract the radar site.
    pub fn radar<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.extract(Level::Radar, key)
    }

    /// Extract the scan file name from a full key.
    pub fn scan_filename<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.extract(Level::Scan, key)
    }

    fn pattern(&self, level: Level) -> &Regex {
        match level {
            Level::Year => &self.year,
            Level::Month => &self.month,
            Level::Day => &self.day,
            Level::Radar => &self.radar,
            Level::Scan => &self.scan,
        }
    }
}

/// A partition of the archive, used to build the prefix for a listing request.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Partition<'a> {
    Root,
    Year(&'a str),
    Month(&'a str, &'a str),
    Day(&'a str, &'a str, &'a str),
    Radar(&'a str, &'a str, &'a str, &'a str),
}

impl<'a> Partition<'a> {
    /// The key prefix of this partition, always ending in the delimiter unless it is the root.
    pub fn prefix(&self) -> String {
        use Partition::*;

        match self {
            Root => String::new(),
            Year(y) => format!("{}/", y),
            Month(y, m) => format!("{}/{}/", y, m),
            Day(y, m, d) => format!("{}/{}/{}/", y, m, d),
            Radar(y, m, d, r) => format!("{}/{}/{}/{}/", y, m, d, r),
        }
    }

    /// The level of the hierarchy directly below this partition.
    pub fn child_level(&self) -> Level {
        use Partition::*;

        match self {
            Root => Level::Year,
            Year(_) => Level::Month,
            Month(_, _) => Level::Day,
            Day(_, _, _) => Level::Radar,
            Radar(_, _, _, _) => Level::Scan,
        }
    }
}

/// Zero padded year, month, and day strings for a date as they appear in keys.
pub(crate) fn date_parts(date: NaiveDate) -> (String, String, String) {
    (
        format!("{:04}", date.year()),
        format!("{:02}", date.month()),
        format!("{:02}", date.day()),
    )
}
