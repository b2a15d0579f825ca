use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw question definition as it arrives from an import source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCreateParams {
    pub question_id: String,
    pub question_name: String,
    pub question_type: String,
    #[serde(default)]
    pub question: String,
    /// String-encoded document; an inline object is accepted and re-encoded
    #[serde(default = "empty_attributes", deserialize_with = "attributes_as_text")]
    pub attributes: String,
    pub status: String,
    #[serde(default)]
    pub enable_on_mobile: bool,
    #[serde(default)]
    pub question_unique_id: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
}

fn empty_attributes() -> String {
    "{}".to_string()
}

fn attributes_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Null => Ok(empty_attributes()),
        other => Ok(other.to_string()),
    }
}
