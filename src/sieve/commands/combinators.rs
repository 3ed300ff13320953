use super::{require, CommandParser};
use crate::model::condition::Condition;
use crate::sieve::ast::{CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;
use crate::sieve::registry;

fn wrap_not(condition: Condition) -> Condition {
    let mut outer = Condition::new(CommandType::Not.as_id());
    outer.test = Some(Box::new(condition));
    outer
}

/// NOT: wraps exactly one nested test, resolved through the registry.
pub struct NotCommand;

impl CommandParser for NotCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let nested = require(CommandType::Not, "test", condition.test.as_deref())?;
        Ok(TestCommand::not(registry::parse_condition(nested)?))
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let nested = match command.tests.as_slice() {
            [nested] => nested,
            _ => {
                return Err(TranslateError::Malformed {
                    command: CommandType::Not,
                    detail: "expects exactly one nested test",
                })
            }
        };
        // Folding this NOT into the nested command inverts whatever negation
        // the caller already requested, so stacked NOTs cancel pairwise.
        registry::parser_for(nested.command).serialize(nested, !negate)
    }

    fn capabilities(&self, _capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        let mut caps = CommandCapabilities::new(CommandType::Not);
        caps.fields = vec!["test"];
        Some(caps)
    }
}

/// ANYOF/ALLOF: one or more nested tests and no direct arguments. A
/// requested negation wraps the serialized combinator in a `not` condition.
pub struct CombinatorCommand {
    pub(crate) command: CommandType,
}

impl CommandParser for CombinatorCommand {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError> {
        let nested = require(self.command, "tests", condition.tests.as_deref())?;
        if nested.is_empty() {
            return Err(TranslateError::Malformed {
                command: self.command,
                detail: "expects at least one nested test",
            });
        }
        let tests = nested
            .iter()
            .map(registry::parse_condition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TestCommand::combinator(self.command, tests))
    }

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        if command.tests.is_empty() {
            return Err(TranslateError::Malformed {
                command: self.command,
                detail: "expects at least one nested test",
            });
        }
        let nested = command
            .tests
            .iter()
            .map(registry::serialize_test)
            .collect::<Result<Vec<_>, _>>()?;
        let mut condition = Condition::new(self.command.as_id());
        condition.tests = Some(nested);
        Ok(if negate { wrap_not(condition) } else { condition })
    }

    fn capabilities(&self, _capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        let mut caps = CommandCapabilities::new(self.command);
        caps.fields = vec!["tests"];
        Some(caps)
    }
}

/// FALSE: a pure marker with no arguments in either direction.
pub struct FalseCommand;

impl CommandParser for FalseCommand {
    fn parse(&self, _condition: &Condition) -> Result<TestCommand, TranslateError> {
        Ok(TestCommand::leaf(CommandType::False, Vec::new(), Vec::new()))
    }

    fn serialize(
        &self,
        _command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError> {
        let condition = Condition::new(CommandType::False.as_id());
        Ok(if negate { wrap_not(condition) } else { condition })
    }

    fn capabilities(&self, _capabilities: &CapabilitySet) -> Option<CommandCapabilities> {
        Some(CommandCapabilities::new(CommandType::False))
    }
}
