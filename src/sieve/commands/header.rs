use super::{
    first_tag, lowercased, match_comparisons, require, strings_arg, CommandParser,
};
use crate::model::condition::Condition;
use crate::model::enums::MatchType;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::{matcher, registry};
use std::collections::BTreeSet;

/// Fixed header sets recognized as convenience discriminators in place of a
/// generic EXISTS test.
const NAMED_HEADER_SETS: &[(&str, &[&str])] = &[
    ("anyrecipient", &["to", "cc"]),
    (
        "mailinglist",
        &["list-id", "x-beenthere", "x-mailinglist", "x-mailing-list"],
    ),
];

/// HEADER test: comparator tag argument, then a header list and a value
/// list. A condition whose comparator is `exists` is the EXISTS test in
/// disguise and is delegated wholesale.
pub struct HeaderCommand;

impl CommandParser for HeaderCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let raw = require(CommandType::Header, "comparison", condition.comparison.as_deref())?;
        let m = matcher::normalize(CommandType::Header, raw)?;
        if m.match_type == MatchType::Exists {
            return registry::parser_for(CommandType::Exists).parse(condition);
        }
        let headers = require(CommandType::Header, "headers", condition.headers.as_deref())?;
        let values = require(CommandType::Header, "values", condition.values.as_deref())?;
        let (match_type, values) = matcher::expand_simplified(m.match_type, values.to_vec());
        let (tag, wrap) = matcher::comparator_tag(CommandType::Header, match_type, m.negated)?;
        let test = TestCommand::leaf(
            CommandType::Header,
            vec![tag],
            vec![
                Argument::Strings(headers.to_vec()),
                Argument::Strings(values),
            ],
        );
        Ok(if wrap { TestCommand::not(test) } else { test })
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let m = matcher::normalize(CommandType::Header, first_tag(CommandType::Header, command)?)?;
        let (match_type, values) =
            matcher::simplify(m.match_type, strings_arg(CommandType::Header, command, 1)?);
        let mut condition = Condition::new(CommandType::Header.as_id());
        condition.comparison =
            Some(matcher::comparison_name(match_type, m.negated ^ negate).to_string());
        condition.headers = Some(lowercased(strings_arg(CommandType::Header, command, 0)?));
        condition.values = Some(values);
        Ok(condition)
    }

    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        let mut caps = CommandCapabilities::new(CommandType::Header);
        caps.comparisons = match_comparisons(capabilities);
        caps.comparisons.push("exists");
        caps.fields = vec!["comparison", "headers", "values"];
        Some(caps)
    }
}

/// EXISTS test: a single header-name list argument. Serialization rewrites
/// to a HEADER condition with the `exists` comparator, or to a named
/// convenience discriminator when the header set matches one exactly.
pub struct ExistsCommand;

impl CommandParser for ExistsCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let negated = match condition.comparison.as_deref() {
            None => false,
            // EXISTS admits only its own comparator; normalize enforces that
            Some(raw) => matcher::normalize(CommandType::Exists, raw)?.negated,
        };
        let headers = match named_set(&condition.id) {
            Some(set) => set.iter().map(|h| h.to_string()).collect(),
            None => {
                require(CommandType::Exists, "headers", condition.headers.as_deref())?.to_vec()
            }
        };
        let test = TestCommand::leaf(
            CommandType::Exists,
            Vec::new(),
            vec![Argument::Strings(headers)],
        );
        Ok(if negated { TestCommand::not(test) } else { test })
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let headers = strings_arg(CommandType::Exists, command, 0)?;
        if !negate {
            if let Some(name) = named_set_for(headers) {
                return Ok(Condition::new(name));
            }
        }
        let mut condition = Condition::new(CommandType::Header.as_id());
        condition.comparison =
            Some(matcher::comparison_name(MatchType::Exists, negate).to_string());
        condition.headers = Some(lowercased(headers));
        Ok(condition)
    }

    fn capabilities(&self, _capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        let mut caps = CommandCapabilities::new(CommandType::Exists);
        caps.comparisons = vec!["exists"];
        caps.fields = vec!["headers"];
        Some(caps)
    }
}

fn named_set(id: &str) -> Option<&'static [&'static str]> {
    NAMED_HEADER_SETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(id))
        .map(|(_, set)| *set)
}

/// Order- and case-insensitive exact set match against the named sets.
fn named_set_for(headers: &[String]) -> Option<&'static str> {
    let given: BTreeSet<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    NAMED_HEADER_SETS
        .iter()
        .find(|(_, set)| set.len() == given.len() && set.iter().all(|h| given.contains(*h)))
        .map(|(name, _)| *name)
}
