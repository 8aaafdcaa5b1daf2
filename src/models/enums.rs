use serde::{Deserialize, Serialize};

/// Macro to generate a serde enum with its wire string via as_str
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }
    };
}

str_enum!(MessageRole {
    System => "system",
    User => "user",
    Assistant => "assistant",
});

impl MessageRole {
    /// Speaker prefix used in the chat view and the report transcript.
    /// System turns are never shown.
    pub fn display_label(&self) -> Option<&'static str> {
        match self {
            Self::System => None,
            Self::User => Some("User"),
            Self::Assistant => Some("AI"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_match_chat_protocol() {
        assert_eq!(MessageRole::System.as_str(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let back: MessageRole = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(back, MessageRole::System);
    }

    #[test]
    fn system_role_has_no_display_label() {
        assert_eq!(MessageRole::System.display_label(), None);
        assert_eq!(MessageRole::User.display_label(), Some("User"));
        assert_eq!(MessageRole::Assistant.display_label(), Some("AI"));
    }
}
