//! Calendar dates as they appear in the data file.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const FORMAT: &str = "%Y-%m-%d";

/// A date field of a stored word.
///
/// Stored as a `YYYY-MM-DD` string, with `""` for absent. A value that is
/// present but not a readable date is kept verbatim so it survives a save
/// and is still treated as unreadable on the next load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StoredDate {
    #[default]
    Absent,
    Valid(NaiveDate),
    Unreadable(String),
}

impl StoredDate {
    /// Parse a stored value. Only zero-padded `YYYY-MM-DD` is accepted.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Absent;
        }
        match parse_iso(raw) {
            Some(date) => Self::Valid(date),
            None => Self::Unreadable(raw.to_string()),
        }
    }

    /// The date, when present and readable.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Absent | Self::Unreadable(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<NaiveDate> for StoredDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for StoredDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Valid(date) => write!(f, "{}", date.format(FORMAT)),
            Self::Unreadable(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for StoredDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StoredDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Self::Absent);
        };
        let parsed = Self::parse(&raw);
        if let Self::Unreadable(raw) = &parsed {
            warn!("unreadable date kept as-is (value={raw:?})");
        }
        Ok(parsed)
    }
}

fn parse_iso(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| match index {
                4 | 7 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, FORMAT).ok()
}
