/// Size codec: human-entered size strings with unit suffixes to byte counts
/// and back. Units are binary (1024-based) throughout.
use crate::sieve::ast::CommandType;
use crate::sieve::error::TranslateError;
use std::fmt;

pub const KIB: i64 = 1024;
pub const MIB: i64 = 1024 * KIB;
pub const GIB: i64 = 1024 * MIB;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    K,
    M,
    G,
}

impl SizeUnit {
    pub fn factor(&self) -> i64 {
        match self {
            Self::K => KIB,
            Self::M => MIB,
            Self::G => GIB,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::K => 'K',
            Self::M => 'M',
            Self::G => 'G',
        }
    }
}

/// A signed magnitude plus an optional unit; no unit means plain bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeValue {
    pub magnitude: i64,
    pub unit: Option<SizeUnit>,
}

impl SizeValue {
    /// Parse a case-insensitive size string (`10`, `10b`, `10k`, `10kb`,
    /// `10m`, ...). An empty remainder after suffix stripping means zero.
    pub fn parse(command: CommandType, raw: &str) -> Result<Self, TranslateError> {
        let lower = raw.trim().to_lowercase();
        let (digits, unit) = strip_unit(&lower);
        if digits.is_empty() {
            return Ok(Self { magnitude: 0, unit });
        }
        let body = digits.strip_prefix('-').unwrap_or(digits);
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TranslateError::NonDigit {
                command,
                value: raw.to_string(),
            });
        }
        let magnitude = digits.parse::<i64>().map_err(|_| TranslateError::TooBig {
            command,
            value: raw.to_string(),
        })?;
        Ok(Self { magnitude, unit })
    }

    /// Byte count, overflow-checked.
    pub fn bytes(&self, command: CommandType) -> Result<i64, TranslateError> {
        let factor = self.unit.map_or(1, |u| u.factor());
        self.magnitude
            .checked_mul(factor)
            .ok_or_else(|| TranslateError::TooBig {
                command,
                value: self.to_string(),
            })
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.magnitude)?;
        if let Some(unit) = self.unit {
            write!(f, "{}", unit.letter())?;
        }
        Ok(())
    }
}

/// Express a byte count in the coarsest unit that divides evenly, or as raw
/// bytes with no suffix.
pub fn format_bytes(bytes: i64) -> String {
    if bytes != 0 {
        if bytes % GIB == 0 {
            return format!("{}G", bytes / GIB);
        }
        if bytes % MIB == 0 {
            return format!("{}M", bytes / MIB);
        }
        if bytes % KIB == 0 {
            return format!("{}K", bytes / KIB);
        }
    }
    bytes.to_string()
}

fn strip_unit(lower: &str) -> (&str, Option<SizeUnit>) {
    let suffixes = [
        ("kb", Some(SizeUnit::K)),
        ("mb", Some(SizeUnit::M)),
        ("gb", Some(SizeUnit::G)),
        ("k", Some(SizeUnit::K)),
        ("m", Some(SizeUnit::M)),
        ("g", Some(SizeUnit::G)),
        ("b", None),
    ];
    for (suffix, unit) in suffixes {
        if let Some(rest) = lower.strip_suffix(suffix) {
            return (rest, unit);
        }
    }
    (lower, None)
}
