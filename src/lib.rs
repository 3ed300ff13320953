//! Backend translation engine for a mail filter rule editor.
//!
//! Filter conditions authored as JSON objects are translated into SIEVE test
//! command trees and back. The translation is reversible: round-tripping a
//! rule through edit/save/reload does not change its semantics, while
//! convenience comparators (`startswith`, `endswith`, named header sets)
//! that have no native SIEVE form are synthesized on the way in and
//! recognized on the way out.

pub mod model;
pub mod sieve;

pub use model::condition::Condition;
pub use sieve::ast::{Argument, CommandType, TestCommand};
pub use sieve::capability::{CapabilitySet, CommandCapabilities};
pub use sieve::commands::CommandParser;
pub use sieve::error::TranslateError;
pub use sieve::registry::{command_capabilities, parse_condition, serialize_test};
