use super::{require, strings_arg, CommandParser};
use crate::model::condition::Condition;
use crate::model::enums::DatePart;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::matcher;

/// CURRENTDATE test (RFC 5260): an optional `:zone` tag with its value,
/// then the comparator tag, a date-part selector and a value list. Negation
/// is resolved up front and wraps the test in `not`.
pub struct CurrentdateCommand;

impl CommandParser for CurrentdateCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let raw = require(
            CommandType::Currentdate,
            "comparison",
            condition.comparison.as_deref(),
        )?;
        let m = matcher::normalize(CommandType::Currentdate, raw)?;
        let raw_part = require(
            CommandType::Currentdate,
            "datepart",
            condition.datepart.as_deref(),
        )?;
        let part = DatePart::from_id(raw_part).ok_or_else(|| TranslateError::InvalidField {
            command: CommandType::Currentdate,
            field: "datepart",
            value: raw_part.to_string(),
        })?;
        let values = require(CommandType::Currentdate, "values", condition.values.as_deref())?;
        let mut tag_args = Vec::new();
        let mut args = Vec::new();
        if let Some(zone) = condition.zone.as_deref() {
            tag_args.push(":zone".to_string());
            args.push(Argument::Strings(vec![zone.to_string()]));
        }
        let (tag, wrap) =
            matcher::comparator_tag(CommandType::Currentdate, m.match_type, m.negated)?;
        tag_args.push(tag);
        args.push(Argument::Strings(vec![part.as_id().to_string()]));
        args.push(Argument::Strings(values.to_vec()));
        let test = TestCommand::leaf(CommandType::Currentdate, tag_args, args);
        Ok(if wrap { TestCommand::not(test) } else { test })
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let mut condition = Condition::new(CommandType::Currentdate.as_id());
        let mut tag_index = 0;
        let mut arg_index = 0;
        if command.tag_args.first().map(String::as_str) == Some(":zone") {
            let zone = strings_arg(CommandType::Currentdate, command, 0)?;
            condition.zone = zone.first().cloned();
            tag_index = 1;
            arg_index = 1;
        }
        let tag = command
            .tag_args
            .get(tag_index)
            .map(String::as_str)
            .ok_or(TranslateError::Malformed {
                command: CommandType::Currentdate,
                detail: "missing comparator tag argument",
            })?;
        let m = matcher::normalize(CommandType::Currentdate, tag)?;
        condition.comparison =
            Some(matcher::comparison_name(m.match_type, m.negated ^ negate).to_string());
        let part = strings_arg(CommandType::Currentdate, command, arg_index)?;
        condition.datepart = part.first().cloned();
        condition.values =
            Some(strings_arg(CommandType::Currentdate, command, arg_index + 1)?.to_vec());
        Ok(condition)
    }

    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        if !capabilities.has("date") {
            return None;
        }
        let mut caps = CommandCapabilities::new(CommandType::Currentdate);
        caps.comparisons = vec!["is", "contains", "matches"];
        caps.fields = vec!["comparison", "datepart", "zone", "values"];
        Some(caps)
    }
}
