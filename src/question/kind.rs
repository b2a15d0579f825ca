use serde::{Serialize, Serializer};
use std::fmt;

/// Closed set of question kinds a form can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Date,
    Time,
    DateTime,
    DurationForward,
    DurationBackward,
    Scale,
    QrCode,
    QrCodeFront,
    QrCodeGenerator,
    Selection,
    Text,
    Count,
    Number,
    Photo,
    MultipleChoice,
    SingleChoice,
    Button,
    ButtonCount,
    ButtonList,
    MessageBox,
    ShowPics,
    PlayVideo,
    ChoiceToggle,
    Section,
    FormSection,
    FormSendImmediately,
    Signature,
    Web,
    WebUser,
    SignUpPresetValue1,
    SignUpPresetValue2,
    SignUpPresetValue3,
    DraggableList,
    SendMessage,
    SendNotification,
    CodeCounting,
    Randomizer,
    Document,
    /// Catch-all for user profile questions
    User,
}

impl QuestionType {
    pub const ALL: &'static [QuestionType] = &[
        QuestionType::Date,
        QuestionType::Time,
        QuestionType::DateTime,
        QuestionType::DurationForward,
        QuestionType::DurationBackward,
        QuestionType::Scale,
        QuestionType::QrCode,
        QuestionType::QrCodeFront,
        QuestionType::QrCodeGenerator,
        QuestionType::Selection,
        QuestionType::Text,
        QuestionType::Count,
        QuestionType::Number,
        QuestionType::Photo,
        QuestionType::MultipleChoice,
        QuestionType::SingleChoice,
        QuestionType::Button,
        QuestionType::ButtonCount,
        QuestionType::ButtonList,
        QuestionType::MessageBox,
        QuestionType::ShowPics,
        QuestionType::PlayVideo,
        QuestionType::ChoiceToggle,
        QuestionType::Section,
        QuestionType::FormSection,
        QuestionType::FormSendImmediately,
        QuestionType::Signature,
        QuestionType::Web,
        QuestionType::WebUser,
        QuestionType::SignUpPresetValue1,
        QuestionType::SignUpPresetValue2,
        QuestionType::SignUpPresetValue3,
        QuestionType::DraggableList,
        QuestionType::SendMessage,
        QuestionType::SendNotification,
        QuestionType::CodeCounting,
        QuestionType::Randomizer,
        QuestionType::Document,
        QuestionType::User,
    ];

    /// Canonical wire tag, stored in the `question_type` column
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::Date => "date",
            QuestionType::Time => "time",
            QuestionType::DateTime => "datetime",
            QuestionType::DurationForward => "duration_forward",
            QuestionType::DurationBackward => "duration_backward",
            QuestionType::Scale => "scale",
            QuestionType::QrCode => "qr_code",
            QuestionType::QrCodeFront => "qr_code_front",
            QuestionType::QrCodeGenerator => "qr_code_generator",
            QuestionType::Selection => "selection",
            QuestionType::Text => "text",
            QuestionType::Count => "count",
            QuestionType::Number => "number",
            QuestionType::Photo => "photo",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::SingleChoice => "single_choice",
            QuestionType::Button => "button",
            QuestionType::ButtonCount => "button_count",
            QuestionType::ButtonList => "button_list",
            QuestionType::MessageBox => "message_box",
            QuestionType::ShowPics => "show_pics",
            QuestionType::PlayVideo => "play_video",
            QuestionType::ChoiceToggle => "choice_toggle",
            QuestionType::Section => "section",
            QuestionType::FormSection => "form_section",
            QuestionType::FormSendImmediately => "form_send_immediately",
            QuestionType::Signature => "signature",
            QuestionType::Web => "web",
            QuestionType::WebUser => "web_user",
            QuestionType::SignUpPresetValue1 => "sign_up_preset_value_1",
            QuestionType::SignUpPresetValue2 => "sign_up_preset_value_2",
            QuestionType::SignUpPresetValue3 => "sign_up_preset_value_3",
            QuestionType::DraggableList => "draggable_list",
            QuestionType::SendMessage => "send_message",
            QuestionType::SendNotification => "send_notification",
            QuestionType::CodeCounting => "code_counting",
            QuestionType::Randomizer => "randomizer",
            QuestionType::Document => "document",
            QuestionType::User => "user",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tags_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for kind in QuestionType::ALL {
            let tag = kind.tag();
            assert!(seen.insert(tag), "duplicate tag {}", tag);
            assert_eq!(tag, tag.to_ascii_lowercase());
        }
        assert_eq!(seen.len(), QuestionType::ALL.len());
    }
}
