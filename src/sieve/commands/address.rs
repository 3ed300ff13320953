use super::{
    first_tag, lowercased, match_comparisons, require, strings_arg, CommandParser,
};
use crate::model::condition::Condition;
use crate::model::enums::AddressPart;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::matcher;

/// ADDRESS and ENVELOPE tests: comparator and optional address-part tag
/// arguments, then a header list and a value list. Negated comparators wrap
/// the test in `not`.
pub struct AddressCommand {
    pub(crate) command: CommandType,
}

impl CommandParser for AddressCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let raw = require(self.command, "comparison", condition.comparison.as_deref())?;
        let m = matcher::normalize(self.command, raw)?;
        let headers = require(self.command, "headers", condition.headers.as_deref())?;
        let values = require(self.command, "values", condition.values.as_deref())?;
        let (match_type, values) = matcher::expand_simplified(m.match_type, values.to_vec());
        let (tag, wrap) = matcher::comparator_tag(self.command, match_type, m.negated)?;
        let mut tag_args = vec![tag];
        if let Some(raw_part) = condition.addresspart.as_deref() {
            let part =
                AddressPart::from_id(raw_part).ok_or_else(|| TranslateError::InvalidField {
                    command: self.command,
                    field: "addresspart",
                    value: raw_part.to_string(),
                })?;
            // :all is the default and never emitted
            if part != AddressPart::All {
                tag_args.push(part.sieve_tag().to_string());
            }
        }
        let test = TestCommand::leaf(
            self.command,
            tag_args,
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
        let m = matcher::normalize(self.command, first_tag(self.command, command)?)?;
        let (match_type, values) =
            matcher::simplify(m.match_type, strings_arg(self.command, command, 1)?);
        let mut condition = Condition::new(self.command.as_id());
        condition.comparison =
            Some(matcher::comparison_name(match_type, m.negated ^ negate).to_string());
        if let Some(part_tag) = command.tag_args.get(1) {
            let part =
                AddressPart::from_id(part_tag).ok_or_else(|| TranslateError::InvalidField {
                    command: self.command,
                    field: "addresspart",
                    value: part_tag.clone(),
                })?;
            condition.addresspart = Some(part.as_id().to_string());
        }
        condition.headers = Some(lowercased(strings_arg(self.command, command, 0)?));
        condition.values = Some(values);
        Ok(condition)
    }

    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        if self.command == CommandType::Envelope && !capabilities.has("envelope") {
            return None;
        }
        let mut caps = CommandCapabilities::new(self.command);
        caps.comparisons = match_comparisons(capabilities);
        caps.fields = vec!["comparison", "headers", "values", "addresspart"];
        caps.address_parts = vec!["all", "localpart", "domain"];
        if capabilities.has("subaddress") {
            caps.address_parts.extend(["user", "detail"]);
        }
        Some(caps)
    }
}
