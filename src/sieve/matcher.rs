/// Comparator normalization, the per-family negation policy and the
/// simplified-matcher codec.
///
/// A single lookup pair (`MatchType::from_id` / `from_not_id`) resolves
/// both authored comparators and comparator tag arguments, so the parse and
/// serialize directions can never disagree on whether a spelling is negated.
use crate::model::enums::MatchType;
use crate::sieve::ast::CommandType;
use crate::sieve::error::TranslateError;

/// How a command family expresses a negated comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegationPolicy {
    /// Wrap the positive test in a `not` command.
    WrapNot,
    /// Carry the negated comparator name in the tag argument itself.
    NegatedTag,
}

/// Fixed per-family policy; never inferred at runtime.
pub fn negation_policy(command: CommandType) -> NegationPolicy {
    match command {
        CommandType::Size | CommandType::Hasflag | CommandType::Body => NegationPolicy::NegatedTag,
        _ => NegationPolicy::WrapNot,
    }
}

/// Comparators each command family accepts, simplified forms included.
pub fn supported_comparisons(command: CommandType) -> &'static [MatchType] {
    use MatchType::*;
    match command {
        CommandType::Size => &[Over, Under],
        CommandType::Exists => &[Exists],
        CommandType::Header => &[Is, Contains, Matches, Regex, Startswith, Endswith, Exists],
        CommandType::Currentdate => &[Is, Contains, Matches],
        _ => &[Is, Contains, Matches, Regex, Startswith, Endswith],
    }
}

/// A comparator as authored, resolved to its canonical identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    pub match_type: MatchType,
    pub negated: bool,
}

/// Resolve a comparator spelling and check it against the family's legal
/// set; a recognized name on the wrong command is just as unknown.
pub fn normalize(command: CommandType, raw: &str) -> Result<Matcher, TranslateError> {
    let unknown = || TranslateError::UnknownComparison {
        command,
        comparison: raw.to_string(),
    };
    let matcher = if let Some(match_type) = MatchType::from_id(raw) {
        Matcher {
            match_type,
            negated: false,
        }
    } else if let Some(match_type) = MatchType::from_not_id(raw) {
        Matcher {
            match_type,
            negated: true,
        }
    } else {
        return Err(unknown());
    };
    if !supported_comparisons(command).contains(&matcher.match_type) {
        return Err(unknown());
    }
    Ok(matcher)
}

/// Wire spelling for a comparator, honoring negation.
pub fn comparison_name(match_type: MatchType, negated: bool) -> &'static str {
    if negated {
        match_type.not_id()
    } else {
        match_type.as_id()
    }
}

/// Comparator tag argument for a leaf command, plus whether the resulting
/// test must be wrapped in `not`.
pub fn comparator_tag(
    command: CommandType,
    match_type: MatchType,
    negated: bool,
) -> Result<(String, bool), TranslateError> {
    let unknown = || TranslateError::UnknownComparison {
        command,
        comparison: comparison_name(match_type, negated).to_string(),
    };
    match negation_policy(command) {
        NegationPolicy::WrapNot => {
            let tag = match_type.sieve_tag().ok_or_else(unknown)?;
            Ok((tag.to_string(), negated))
        }
        NegationPolicy::NegatedTag => {
            let tag = if negated {
                match_type.not_tag()
            } else {
                match_type.sieve_tag()
            };
            Ok((tag.ok_or_else(unknown)?.to_string(), false))
        }
    }
}

/// Rewrite `startswith`/`endswith` into `matches` by appending a wildcard to
/// the appropriate side of every value.
pub fn expand_simplified(match_type: MatchType, values: Vec<String>) -> (MatchType, Vec<String>) {
    match match_type {
        MatchType::Startswith => (
            MatchType::Matches,
            values.into_iter().map(|v| format!("{v}*")).collect(),
        ),
        MatchType::Endswith => (
            MatchType::Matches,
            values.into_iter().map(|v| format!("*{v}")).collect(),
        ),
        _ => (match_type, values),
    }
}

/// Recover `startswith`/`endswith` from a `matches` value list, when every
/// value carries the single-wildcard pattern on the same side. Anything
/// else stays generic `matches` with the values untouched.
pub fn simplify(match_type: MatchType, values: &[String]) -> (MatchType, Vec<String>) {
    if match_type == MatchType::Matches && !values.is_empty() {
        if values.iter().all(|v| single_trailing_wildcard(v)) {
            return (
                MatchType::Startswith,
                values
                    .iter()
                    .map(|v| v.strip_suffix('*').unwrap_or(v).to_string())
                    .collect(),
            );
        }
        if values.iter().all(|v| single_leading_wildcard(v)) {
            return (
                MatchType::Endswith,
                values
                    .iter()
                    .map(|v| v.strip_prefix('*').unwrap_or(v).to_string())
                    .collect(),
            );
        }
    }
    (match_type, values.to_vec())
}

fn single_trailing_wildcard(value: &str) -> bool {
    match value.strip_suffix('*') {
        Some(rest) => !rest.ends_with('*') && !value.starts_with('*'),
        None => false,
    }
}

fn single_leading_wildcard(value: &str) -> bool {
    match value.strip_prefix('*') {
        Some(rest) => !rest.starts_with('*') && !value.ends_with('*'),
        None => false,
    }
}
