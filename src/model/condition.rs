use serde::{Deserialize, Serialize};

/// A filter condition as authored by the rule editor.
///
/// The `id` field is the command type discriminator; every other field is
/// command specific and absent from the wire when unused. Instances are
/// immutable inputs to parsing and are produced fresh on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Source list of the STRING test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresspart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensionskey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensionsvalue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datepart: Option<String>,
    /// Nested condition of NOT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Box<Condition>>,
    /// Nested conditions of ANYOF/ALLOF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<Condition>>,
}

impl Condition {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }
}
