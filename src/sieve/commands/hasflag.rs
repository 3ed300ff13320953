use super::{first_tag, match_comparisons, require, strings_arg, CommandParser};
use crate::model::condition::Condition;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::matcher;

/// HASFLAG test (RFC 5232): comparator tag argument plus a flag value list;
/// no header or source dimension. Negation lives in the comparator tag.
pub struct HasflagCommand;

impl CommandParser for HasflagCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let raw = require(CommandType::Hasflag, "comparison", condition.comparison.as_deref())?;
        let m = matcher::normalize(CommandType::Hasflag, raw)?;
        let values = require(CommandType::Hasflag, "values", condition.values.as_deref())?;
        let (match_type, values) = matcher::expand_simplified(m.match_type, values.to_vec());
        let (tag, _) = matcher::comparator_tag(CommandType::Hasflag, match_type, m.negated)?;
        Ok(TestCommand::leaf(
            CommandType::Hasflag,
            vec![tag],
            vec![Argument::Strings(values)],
        ))
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let m =
            matcher::normalize(CommandType::Hasflag, first_tag(CommandType::Hasflag, command)?)?;
        let (match_type, values) =
            matcher::simplify(m.match_type, strings_arg(CommandType::Hasflag, command, 0)?);
        let mut condition = Condition::new(CommandType::Hasflag.as_id());
        condition.comparison =
            Some(matcher::comparison_name(match_type, m.negated ^ negate).to_string());
        condition.values = Some(values);
        Ok(condition)
    }

    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        if !capabilities.has("imap4flags") {
            return None;
        }
        let mut caps = CommandCapabilities::new(CommandType::Hasflag);
        caps.comparisons = match_comparisons(capabilities);
        caps.fields = vec!["comparison", "values"];
        Some(caps)
    }
}
