use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparator identity shared by all test commands.
///
/// Every match type has a canonical wire name and a `not-` prefixed negated
/// counterpart; the two lookup tables are exact inverses of each other.
/// `Startswith`/`Endswith` are editor conveniences rewritten to `:matches`
/// before tagging, and `Exists` becomes its own test command, so none of the
/// three carry a SIEVE tag of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Is,
    Contains,
    Matches,
    Regex,
    Count,
    Value,
    Exists,
    Startswith,
    Endswith,
    Over,
    Under,
}

impl MatchType {
    pub const ALL: [MatchType; 11] = [
        Self::Is,
        Self::Contains,
        Self::Matches,
        Self::Regex,
        Self::Count,
        Self::Value,
        Self::Exists,
        Self::Startswith,
        Self::Endswith,
        Self::Over,
        Self::Under,
    ];

    /// Canonical comparator name on the wire.
    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::Contains => "contains",
            Self::Matches => "matches",
            Self::Regex => "regex",
            Self::Count => "count",
            Self::Value => "value",
            Self::Exists => "exists",
            Self::Startswith => "startswith",
            Self::Endswith => "endswith",
            Self::Over => "over",
            Self::Under => "under",
        }
    }

    /// Negated comparator name on the wire.
    pub fn not_id(&self) -> &'static str {
        match self {
            Self::Is => "not-is",
            Self::Contains => "not-contains",
            Self::Matches => "not-matches",
            Self::Regex => "not-regex",
            Self::Count => "not-count",
            Self::Value => "not-value",
            Self::Exists => "not-exists",
            Self::Startswith => "not-startswith",
            Self::Endswith => "not-endswith",
            Self::Over => "not-over",
            Self::Under => "not-under",
        }
    }

    /// SIEVE tag argument, where one exists.
    pub fn sieve_tag(&self) -> Option<&'static str> {
        match self {
            Self::Is => Some(":is"),
            Self::Contains => Some(":contains"),
            Self::Matches => Some(":matches"),
            Self::Regex => Some(":regex"),
            Self::Count => Some(":count"),
            Self::Value => Some(":value"),
            Self::Over => Some(":over"),
            Self::Under => Some(":under"),
            Self::Exists | Self::Startswith | Self::Endswith => None,
        }
    }

    /// Negated-name tag argument, for the command families that embed
    /// negation in the comparator tag instead of wrapping in `not`.
    pub fn not_tag(&self) -> Option<&'static str> {
        match self {
            Self::Is => Some(":not-is"),
            Self::Contains => Some(":not-contains"),
            Self::Matches => Some(":not-matches"),
            Self::Regex => Some(":not-regex"),
            Self::Count => Some(":not-count"),
            Self::Value => Some(":not-value"),
            Self::Over => Some(":not-over"),
            Self::Under => Some(":not-under"),
            Self::Exists | Self::Startswith | Self::Endswith => None,
        }
    }

    /// Accepts the canonical name, the SIEVE tag spelling and any casing.
    pub fn from_id(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix(':').unwrap_or(&lower);
        match name {
            "is" => Some(Self::Is),
            "contains" => Some(Self::Contains),
            "matches" => Some(Self::Matches),
            "regex" => Some(Self::Regex),
            "count" => Some(Self::Count),
            "value" => Some(Self::Value),
            "exists" => Some(Self::Exists),
            "startswith" => Some(Self::Startswith),
            "endswith" => Some(Self::Endswith),
            "over" => Some(Self::Over),
            "under" => Some(Self::Under),
            _ => None,
        }
    }

    /// Accepts the negated spellings (`not-is`, `:not-is`, legacy `not is`).
    pub fn from_not_id(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix(':').unwrap_or(&lower);
        let positive = name
            .strip_prefix("not-")
            .or_else(|| name.strip_prefix("not "))?;
        Self::from_id(positive)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressPart {
    All,
    Localpart,
    Domain,
    /// Subaddress extension (RFC 5233).
    User,
    Detail,
}

impl AddressPart {
    pub fn as_id(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Localpart => "localpart",
            Self::Domain => "domain",
            Self::User => "user",
            Self::Detail => "detail",
        }
    }

    pub fn sieve_tag(&self) -> &'static str {
        match self {
            Self::All => ":all",
            Self::Localpart => ":localpart",
            Self::Domain => ":domain",
            Self::User => ":user",
            Self::Detail => ":detail",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix(':').unwrap_or(&lower);
        match name {
            "all" => Some(Self::All),
            "localpart" => Some(Self::Localpart),
            "domain" => Some(Self::Domain),
            "user" => Some(Self::User),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePart {
    Date,
    Time,
    Weekday,
}

impl DatePart {
    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Weekday => "weekday",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "weekday" => Some(Self::Weekday),
            _ => None,
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}
