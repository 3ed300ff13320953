/// Capability-driven field and choice discovery, consumed by the rule
/// editor's UI layer to populate its pick lists. A read-only side query,
/// not part of translation itself.
use crate::sieve::ast::CommandType;
use std::collections::BTreeSet;

/// The SIEVE extension names advertised by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    extensions: BTreeSet<String>,
}

impl CapabilitySet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.into().to_lowercase())
                .collect(),
        }
    }

    pub fn has(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// What a command type accepts under a given capability set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCapabilities {
    pub command: CommandType,
    /// Positive comparator names; each has a `not-` counterpart.
    pub comparisons: Vec<&'static str>,
    /// Condition fields the command reads.
    pub fields: Vec<&'static str>,
    /// Valid address parts (ADDRESS/ENVELOPE only).
    pub address_parts: Vec<&'static str>,
}

impl CommandCapabilities {
    pub fn new(command: CommandType) -> Self {
        Self {
            command,
            comparisons: Vec::new(),
            fields: Vec::new(),
            address_parts: Vec::new(),
        }
    }
}
