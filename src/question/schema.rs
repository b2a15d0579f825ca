//! Per-kind attribute shapes used for the minimal write-side check.
//!
//! Only the presence and JSON type of the named fields is checked; any other
//! keys in the payload are ignored and the payload itself is stored verbatim.

use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSchema {
    /// Stored without inspection
    Passthrough,
    /// `{"value": string}`
    Value,
    /// `{"options": [{"name": string}, ...]}`
    Options,
    /// `{"number": int, "steps": int}`
    Scale,
    /// `{"messaging": {"email": [string], "value3": [string], "showMessageBox": bool}}`
    Messaging,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct ValueAttributes {
    value: String,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct NamedOption {
    name: String,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct OptionsAttributes {
    options: Vec<NamedOption>,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct ScaleAttributes {
    number: i64,
    steps: i64,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct Messaging {
    email: Vec<String>,
    value3: Vec<String>,
    #[serde(rename = "showMessageBox")]
    show_message_box: bool,
}

#[allow(dead_code)]
#[derive(Deserialize)]
struct MessagingAttributes {
    messaging: Messaging,
}

impl AttributeSchema {
    /// Decode `raw` against this shape, returning the decoder's error on mismatch
    pub fn check(self, raw: &str) -> Result<(), serde_json::Error> {
        match self {
            AttributeSchema::Passthrough => Ok(()),
            AttributeSchema::Value => decode::<ValueAttributes>(raw),
            AttributeSchema::Options => decode::<OptionsAttributes>(raw),
            AttributeSchema::Scale => decode::<ScaleAttributes>(raw),
            AttributeSchema::Messaging => decode::<MessagingAttributes>(raw),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            AttributeSchema::Passthrough => "-",
            AttributeSchema::Value => "{value}",
            AttributeSchema::Options => "{options:[{name}]}",
            AttributeSchema::Scale => "{number,steps}",
            AttributeSchema::Messaging => "{messaging:{email,value3,showMessageBox}}",
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<(), serde_json::Error> {
    serde_json::from_str::<T>(raw).map(|_| ())
}
