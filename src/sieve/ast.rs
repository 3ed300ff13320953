/// AST node types for SIEVE test commands.
///
/// Only the boolean test side of the language lives here; action commands
/// and whole-script assembly are handled elsewhere.
use std::fmt;

/// The closed set of test command types the engine translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Address,
    Envelope,
    Header,
    Body,
    Size,
    Exists,
    String,
    Hasflag,
    Currentdate,
    False,
    Not,
    Anyof,
    Allof,
}

impl CommandType {
    pub const ALL: [CommandType; 13] = [
        Self::Address,
        Self::Envelope,
        Self::Header,
        Self::Body,
        Self::Size,
        Self::Exists,
        Self::String,
        Self::Hasflag,
        Self::Currentdate,
        Self::False,
        Self::Not,
        Self::Anyof,
        Self::Allof,
    ];

    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Envelope => "envelope",
            Self::Header => "header",
            Self::Body => "body",
            Self::Size => "size",
            Self::Exists => "exists",
            Self::String => "string",
            Self::Hasflag => "hasflag",
            Self::Currentdate => "currentdate",
            Self::False => "false",
            Self::Not => "not",
            Self::Anyof => "anyof",
            Self::Allof => "allof",
        }
    }

    /// Resolve a wire discriminator. The named header-set conveniences are
    /// aliases for the EXISTS test.
    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "address" => Some(Self::Address),
            "envelope" => Some(Self::Envelope),
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            "size" => Some(Self::Size),
            "exists" => Some(Self::Exists),
            "string" => Some(Self::String),
            "hasflag" => Some(Self::Hasflag),
            "currentdate" => Some(Self::Currentdate),
            "false" => Some(Self::False),
            "not" => Some(Self::Not),
            "anyof" => Some(Self::Anyof),
            "allof" => Some(Self::Allof),
            "anyrecipient" | "mailinglist" => Some(Self::Exists),
            _ => None,
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}

/// A positional argument of a test command.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A string list.
    Strings(Vec<String>),
    /// A numeric value, in bytes.
    Number(i64),
}

/// A boolean condition node in the filtering language's AST.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCommand {
    pub command: CommandType,
    /// Bare keyword arguments (comparator, address part, extension markers).
    pub tag_args: Vec<String>,
    /// Positional arguments.
    pub args: Vec<Argument>,
    /// Nested test commands. Leaves have none, NOT has exactly one,
    /// ANYOF/ALLOF have one or more.
    pub tests: Vec<TestCommand>,
}

impl TestCommand {
    pub fn leaf(command: CommandType, tag_args: Vec<String>, args: Vec<Argument>) -> Self {
        Self {
            command,
            tag_args,
            args,
            tests: Vec::new(),
        }
    }

    pub fn not(inner: TestCommand) -> Self {
        Self {
            command: CommandType::Not,
            tag_args: Vec::new(),
            args: Vec::new(),
            tests: vec![inner],
        }
    }

    pub fn combinator(command: CommandType, tests: Vec<TestCommand>) -> Self {
        Self {
            command,
            tag_args: Vec::new(),
            args: Vec::new(),
            tests,
        }
    }
}
