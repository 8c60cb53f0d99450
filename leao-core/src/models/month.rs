use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar months, abbreviated the way the statement prints them.
///
/// The report lays out every yearly series in this positional order, so the
/// enum's discriminant order doubles as the series index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Fev,
    Mar,
    Abr,
    Mai,
    Jun,
    Jul,
    Ago,
    Set,
    Out,
    Nov,
    Dez,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Self::Jan,
        Self::Fev,
        Self::Mar,
        Self::Abr,
        Self::Mai,
        Self::Jun,
        Self::Jul,
        Self::Ago,
        Self::Set,
        Self::Out,
        Self::Nov,
        Self::Dez,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Fev => "Fev",
            Self::Mar => "Mar",
            Self::Abr => "Abr",
            Self::Mai => "Mai",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Ago => "Ago",
            Self::Set => "Set",
            Self::Out => "Out",
            Self::Nov => "Nov",
            Self::Dez => "Dez",
        }
    }

    /// Parses a Portuguese month abbreviation, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jan" => Some(Self::Jan),
            "fev" => Some(Self::Fev),
            "mar" => Some(Self::Mar),
            "abr" => Some(Self::Abr),
            "mai" => Some(Self::Mai),
            "jun" => Some(Self::Jun),
            "jul" => Some(Self::Jul),
            "ago" => Some(Self::Ago),
            "set" => Some(Self::Set),
            "out" => Some(Self::Out),
            "nov" => Some(Self::Nov),
            "dez" => Some(Self::Dez),
            _ => None,
        }
    }

    /// Zero-based calendar position (`Jan` = 0, `Dez` = 11).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Month {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
