/// Per-command translators between JSON conditions and test commands.
mod address;
mod body;
mod combinators;
mod currentdate;
mod hasflag;
mod header;

pub use address::AddressCommand;
pub use body::BodyCommand;
pub use combinators::{CombinatorCommand, FalseCommand, NotCommand};
pub use currentdate::CurrentdateCommand;
pub use hasflag::HasflagCommand;
pub use header::{ExistsCommand, HeaderCommand};
pub use size_test::SizeCommand;
pub use string_test::StringCommand;

use crate::model::condition::Condition;
use crate::sieve::ast::{Argument, CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::error::TranslateError;

/// One translator per test command type.
///
/// `parse` builds a fresh AST node from a JSON condition; `serialize` is the
/// structural inverse. `negate` asks the serializer to fold one pending
/// logical negation into its output: leaves emit their `not-` comparator,
/// while commands without a comparator wrap themselves in a `not` condition.
pub trait CommandParser: Sync {
    fn parse(&self, condition: &Condition) -> Result<TestCommand, TranslateError>;

    fn serialize(
        &self,
        command: &TestCommand,
        negate: bool,
    ) -> Result<Condition, TranslateError>;

    /// Read-only query describing the comparators and fields this command
    /// supports under the given capability set; `None` when a required
    /// extension is missing.
    fn capabilities(&self, capabilities: &CapabilitySet) -> Option<CommandCapabilities>;
}

pub(crate) fn require<'a, T: ?Sized>(
    command: CommandType,
    field: &'static str,
    value: Option<&'a T>,
) -> Result<&'a T, TranslateError> {
    value.ok_or(TranslateError::MissingField { command, field })
}

pub(crate) fn first_tag<'a>(
    command: CommandType,
    test: &'a TestCommand,
) -> Result<&'a str, TranslateError> {
    test.tag_args
        .first()
        .map(String::as_str)
        .ok_or(TranslateError::Malformed {
            command,
            detail: "missing comparator tag argument",
        })
}

pub(crate) fn strings_arg<'a>(
    command: CommandType,
    test: &'a TestCommand,
    index: usize,
) -> Result<&'a [String], TranslateError> {
    match test.args.get(index) {
        Some(Argument::Strings(values)) => Ok(values),
        _ => Err(TranslateError::Malformed {
            command,
            detail: "expected a string list argument",
        }),
    }
}

pub(crate) fn number_arg(
    command: CommandType,
    test: &TestCommand,
    index: usize,
) -> Result<i64, TranslateError> {
    match test.args.get(index) {
        Some(Argument::Number(n)) => Ok(*n),
        _ => Err(TranslateError::Malformed {
            command,
            detail: "expected a numeric argument",
        }),
    }
}

pub(crate) fn lowercased(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

/// Positive comparator names common to the string-matching commands.
pub(crate) fn match_comparisons(capabilities: &CapabilitySet) -> Vec<&'static str> {
    let mut comparisons = vec!["is", "contains", "matches", "startswith", "endswith"];
    if capabilities.has("regex") {
        comparisons.push("regex");
    }
    comparisons
}
