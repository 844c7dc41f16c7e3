//! Legacy file format versions.
//!
//! Versions are written as `MM.mm` (for example `00.12`). The active
//! version selects the physical layout of every fixed-layout record that
//! follows it.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
    major: u8,
    minor: u8,
}

impl FormatVersion {
    /// Oldest version with a registered layout.
    pub const OLDEST: Self = Self::new(0, 3);
    /// Newest version the registry was written against.
    pub const NEWEST: Self = Self::new(0, 13);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub const fn major(self) -> u8 {
        self.major
    }

    pub const fn minor(self) -> u8 {
        self.minor
    }

    /// Whether this version falls inside the registered range.
    pub fn is_known(self) -> bool {
        (Self::OLDEST..=Self::NEWEST).contains(&self)
    }

    /// Every known version, oldest first.
    pub fn known() -> impl Iterator<Item = Self> {
        (Self::OLDEST.minor..=Self::NEWEST.minor).map(|minor| Self::new(0, minor))
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.major, self.minor)
    }
}

impl FromStr for FormatVersion {
    type Err = DecodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unsupported = || DecodeError::UnsupportedFormatVersion {
            version: text.to_string(),
        };
        let (major, minor) = text.trim().split_once('.').ok_or_else(unsupported)?;
        let part = |digits: &str| {
            if digits.len() == 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
                digits.parse::<u8>().ok()
            } else {
                None
            }
        };
        match (part(major), part(minor)) {
            (Some(major), Some(minor)) => Ok(Self::new(major, minor)),
            _ => Err(unsupported()),
        }
    }
}

impl Serialize for FormatVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive range of versions sharing one record layout.
///
/// An open-ended range (no `last`) also serves as the default layout for
/// files with no version record or with a version newer than the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    first: FormatVersion,
    last: Option<FormatVersion>,
}

impl VersionRange {
    pub const ALL: Self = Self::starting(FormatVersion::OLDEST);

    pub const fn between(first: FormatVersion, last: FormatVersion) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    pub const fn starting(first: FormatVersion) -> Self {
        Self { first, last: None }
    }

    pub fn first(self) -> FormatVersion {
        self.first
    }

    pub fn last(self) -> Option<FormatVersion> {
        self.last
    }

    pub fn is_open_ended(self) -> bool {
        self.last.is_none()
    }

    pub fn contains(self, version: FormatVersion) -> bool {
        version >= self.first && self.last.is_none_or(|last| version <= last)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(last) if last == self.first => write!(f, "{}", self.first),
            Some(last) => write!(f, "{}-{}", self.first, last),
            None => write!(f, "{}+", self.first),
        }
    }
}
