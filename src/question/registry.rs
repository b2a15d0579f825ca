use std::collections::HashMap;

use super::error::QuestionError;
use super::kind::QuestionType;
use super::schema::AttributeSchema;

#[derive(Debug, Clone, Copy)]
struct Entry {
    schema: AttributeSchema,
    mobile_visible: bool,
}

/// Immutable lookup from wire tag to question kind, its attribute schema and
/// whether it may be surfaced on devices.
///
/// Built once at startup and shared behind an `Arc`; tests build restricted
/// registries through [`QuestionTypeRegistry::builder`].
#[derive(Debug, Clone)]
pub struct QuestionTypeRegistry {
    by_tag: HashMap<String, QuestionType>,
    entries: HashMap<QuestionType, Entry>,
}

impl QuestionTypeRegistry {
    /// Registry with every known kind and the production visibility table
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for kind in QuestionType::ALL {
            let (schema, mobile_visible) = standard_entry(*kind);
            builder = builder.register(*kind, schema, mobile_visible);
        }
        builder.alias("default", QuestionType::User).build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolve a tag (case-insensitive) to its kind
    pub fn classify(&self, tag: &str) -> Result<QuestionType, QuestionError> {
        self.by_tag
            .get(&normalize_tag(tag))
            .copied()
            .ok_or_else(|| QuestionError::UnknownType(tag.to_string()))
    }

    /// Kinds missing from the registry are never visible
    pub fn is_mobile_visible(&self, kind: QuestionType) -> bool {
        self.entries.get(&kind).map(|e| e.mobile_visible).unwrap_or(false)
    }

    pub fn schema(&self, kind: QuestionType) -> AttributeSchema {
        self.entries
            .get(&kind)
            .map(|e| e.schema)
            .unwrap_or(AttributeSchema::Passthrough)
    }

    /// Registered kinds in declaration order
    pub fn kinds(&self) -> Vec<(QuestionType, AttributeSchema, bool)> {
        QuestionType::ALL
            .iter()
            .filter_map(|kind| {
                self.entries
                    .get(kind)
                    .map(|e| (*kind, e.schema, e.mobile_visible))
            })
            .collect()
    }
}

impl Default for QuestionTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    by_tag: HashMap<String, QuestionType>,
    entries: HashMap<QuestionType, Entry>,
}

impl RegistryBuilder {
    pub fn register(mut self, kind: QuestionType, schema: AttributeSchema, mobile_visible: bool) -> Self {
        self.by_tag.insert(kind.tag().to_string(), kind);
        self.entries.insert(kind, Entry { schema, mobile_visible });
        self
    }

    /// Extra tag resolving to an already registered kind
    pub fn alias(mut self, tag: &str, kind: QuestionType) -> Self {
        if self.entries.contains_key(&kind) {
            self.by_tag.insert(normalize_tag(tag), kind);
        }
        self
    }

    pub fn build(self) -> QuestionTypeRegistry {
        QuestionTypeRegistry {
            by_tag: self.by_tag,
            entries: self.entries,
        }
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

fn standard_entry(kind: QuestionType) -> (AttributeSchema, bool) {
    use QuestionType::*;

    match kind {
        Date | Time | DateTime | DurationBackward => (AttributeSchema::Value, true),
        Scale => (AttributeSchema::Scale, true),
        Selection | MultipleChoice | SingleChoice | ChoiceToggle | DraggableList => {
            (AttributeSchema::Options, true)
        }
        SendMessage => (AttributeSchema::Messaging, true),
        // Stored for back-office use, never rendered on devices
        SendNotification => (AttributeSchema::Options, false),
        User => (AttributeSchema::Passthrough, false),
        DurationForward | QrCode | QrCodeFront | QrCodeGenerator | Text | Count | Number
        | Photo | Button | ButtonCount | ButtonList | MessageBox | ShowPics | PlayVideo
        | Section | FormSection | FormSendImmediately | Signature | Web | WebUser
        | SignUpPresetValue1 | SignUpPresetValue2 | SignUpPresetValue3 | CodeCounting
        | Randomizer | Document => (AttributeSchema::Passthrough, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_tag() {
        let registry = QuestionTypeRegistry::standard();
        for kind in QuestionType::ALL {
            assert_eq!(registry.classify(kind.tag()).unwrap(), *kind);
        }
    }

    #[test]
    fn classification_ignores_case_and_whitespace() {
        let registry = QuestionTypeRegistry::standard();
        assert_eq!(registry.classify("CODE_COUNTING").unwrap(), QuestionType::CodeCounting);
        assert_eq!(registry.classify(" Send_Notification ").unwrap(), QuestionType::SendNotification);
        assert_eq!(registry.classify("default").unwrap(), QuestionType::User);
    }

    #[test]
    fn unknown_tag_is_a_distinct_error() {
        let registry = QuestionTypeRegistry::standard();
        match registry.classify("hologram") {
            Err(QuestionError::UnknownType(tag)) => assert_eq!(tag, "hologram"),
            other => panic!("expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn send_notification_and_user_are_not_mobile_visible() {
        let registry = QuestionTypeRegistry::standard();
        assert!(!registry.is_mobile_visible(QuestionType::SendNotification));
        assert!(!registry.is_mobile_visible(QuestionType::User));
        assert!(registry.is_mobile_visible(QuestionType::Text));
        assert!(registry.is_mobile_visible(QuestionType::CodeCounting));
    }

    #[test]
    fn restricted_registry_only_knows_what_was_registered() {
        let registry = QuestionTypeRegistry::builder()
            .register(QuestionType::Text, AttributeSchema::Passthrough, false)
            .alias("default", QuestionType::User)
            .build();

        assert!(registry.classify("text").is_ok());
        assert!(registry.classify("selection").is_err());
        // alias to an unregistered kind is ignored
        assert!(registry.classify("default").is_err());
        assert!(!registry.is_mobile_visible(QuestionType::Text));
        assert_eq!(registry.kinds().len(), 1);
    }
}
