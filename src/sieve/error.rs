use crate::sieve::ast::CommandType;

/// Errors surfaced by the translation entry points. Translation is
/// all-or-nothing; no partial tree is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("unknown command type '{0}'")]
    UnknownCommand(String),
    #[error("unknown comparison '{comparison}' for command '{command}'")]
    UnknownComparison {
        command: CommandType,
        comparison: String,
    },
    #[error("missing field '{field}' for command '{command}'")]
    MissingField {
        command: CommandType,
        field: &'static str,
    },
    #[error("invalid value '{value}' for field '{field}' of command '{command}'")]
    InvalidField {
        command: CommandType,
        field: &'static str,
        value: String,
    },
    #[error("unknown extension key '{key}' for command '{command}'")]
    UnknownExtension { command: CommandType, key: String },
    #[error("size value '{value}' for command '{command}' contains non-digit characters")]
    NonDigit { command: CommandType, value: String },
    #[error("number '{value}' for command '{command}' is too big")]
    TooBig { command: CommandType, value: String },
    #[error("malformed test command '{command}': {detail}")]
    Malformed {
        command: CommandType,
        detail: &'static str,
    },
}
