use super::{first_tag, match_comparisons, require, strings_arg, CommandParser};
use crate::model::condition::Condition;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::matcher;

/// BODY test (RFC 5173): comparator and optional extension-key tag
/// arguments. `:content` carries its value as an extra positional argument
/// ahead of the value list. Negation lives in the comparator tag.
pub struct BodyCommand;

impl CommandParser for BodyCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let raw = require(CommandType::Body, "comparison", condition.comparison.as_deref())?;
        let m = matcher::normalize(CommandType::Body, raw)?;
        let values = require(CommandType::Body, "values", condition.values.as_deref())?;
        let (match_type, values) = matcher::expand_simplified(m.match_type, values.to_vec());
        let (tag, _) = matcher::comparator_tag(CommandType::Body, match_type, m.negated)?;
        let mut tag_args = vec![tag];
        let mut args = Vec::new();
        match condition.extensionskey.as_deref() {
            Some("text") => tag_args.push(":text".to_string()),
            Some("content") => {
                tag_args.push(":content".to_string());
                let value = require(
                    CommandType::Body,
                    "extensionsvalue",
                    condition.extensionsvalue.as_deref(),
                )?;
                args.push(Argument::Strings(vec![value.to_string()]));
            }
            Some(key) => {
                return Err(TranslateError::UnknownExtension {
                    command: CommandType::Body,
                    key: key.to_string(),
                })
            }
            None => {}
        }
        args.push(Argument::Strings(values));
        Ok(TestCommand::leaf(CommandType::Body, tag_args, args))
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let m = matcher::normalize(CommandType::Body, first_tag(CommandType::Body, command)?)?;
        let mut condition = Condition::new(CommandType::Body.as_id());
        let values_index = match command.tag_args.get(1).map(String::as_str) {
            Some(":text") => {
                condition.extensionskey = Some("text".to_string());
                0
            }
            Some(":content") => {
                condition.extensionskey = Some("content".to_string());
                let content = strings_arg(CommandType::Body, command, 0)?;
                condition.extensionsvalue = content.first().cloned();
                1
            }
            Some(tag) => {
                return Err(TranslateError::UnknownExtension {
                    command: CommandType::Body,
                    key: tag.to_string(),
                })
            }
            None => 0,
        };
        let (match_type, values) = matcher::simplify(
            m.match_type,
            strings_arg(CommandType::Body, command, values_index)?,
        );
        condition.comparison =
            Some(matcher::comparison_name(match_type, m.negated ^ negate).to_string());
        condition.values = Some(values);
        Ok(condition)
    }

    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        if !capabilities.has("body") {
            return None;
        }
        let mut caps = CommandCapabilities::new(CommandType::Body);
        caps.comparisons = match_comparisons(capabilities);
        caps.fields = vec!["comparison", "extensionskey", "extensionsvalue", "values"];
        Some(caps)
    }
}
