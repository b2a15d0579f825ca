use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::model::{Form, FormQuestionItem};

/// Canonical attribute shape handed to devices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedAttributes {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<AttributeOption>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeOption {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RenderedAttributes {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Attributes holding only a value, as produced for generated kinds
    pub fn value_only(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Request-scoped view of one question; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedQuestion {
    pub question_id: String,
    pub question_type: String,
    pub question: String,
    pub attributes: RenderedAttributes,
    pub order: i32,
    pub answer_required: bool,
    pub enabled: bool,
}

impl RenderedQuestion {
    pub fn from_item(item: FormQuestionItem, attributes: RenderedAttributes) -> Self {
        Self {
            question_type: item.question.question_type.to_uppercase(),
            question_id: item.question.question_id,
            question: item.question.question,
            attributes,
            order: item.order,
            answer_required: item.answer_required,
            enabled: item.question.enable_on_mobile,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.attributes = RenderedAttributes::value_only(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedForm {
    pub questions: Vec<RenderedQuestion>,
    pub form_name: String,
    pub decrypt_password: Option<String>,
}

impl RenderedForm {
    pub fn new(form: &Form, questions: Vec<RenderedQuestion>) -> Self {
        Self {
            questions,
            form_name: form.name.clone(),
            decrypt_password: form.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_value_options_and_extras() {
        let attrs = RenderedAttributes::parse(
            r#"{"value":"v","options":[{"name":"Yes","color":"green"}],"steps":3}"#,
        )
        .unwrap();
        assert_eq!(attrs.value, "v");
        let options = attrs.options.as_ref().unwrap();
        assert_eq!(options[0].name, "Yes");
        assert_eq!(options[0].extra["color"], json!("green"));
        assert_eq!(attrs.extra["steps"], json!(3));
    }

    #[test]
    fn missing_value_defaults_to_empty() {
        let attrs = RenderedAttributes::parse(r#"{"number":5,"steps":1}"#).unwrap();
        assert_eq!(attrs.value, "");
        assert!(attrs.options.is_none());
    }

    #[test]
    fn null_value_reads_as_empty() {
        let attrs = RenderedAttributes::parse(r#"{"value":null,"hint":"x"}"#).unwrap();
        assert_eq!(attrs.value, "");
        assert_eq!(attrs.extra["hint"], json!("x"));
    }

    #[test]
    fn non_object_payloads_do_not_parse() {
        assert!(RenderedAttributes::parse("[1,2]").is_err());
        assert!(RenderedAttributes::parse("garbage").is_err());
        assert!(RenderedAttributes::parse(r#"{"value":42}"#).is_err());
    }

    #[test]
    fn value_only_serializes_without_options() {
        let v = serde_json::to_value(RenderedAttributes::value_only("A-042")).unwrap();
        assert_eq!(v, json!({"value": "A-042"}));
    }
}
