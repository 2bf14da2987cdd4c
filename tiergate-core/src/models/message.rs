//! Chat message types for model requests.
//!
//! These types serialize directly into the hosted API's wire format:
//! a message's content is either a plain string or an ordered list of
//! typed parts (text and image-URL parts) for vision requests.

use serde::{Deserialize, Serialize};

// ============================================================================
// Role
// ============================================================================

/// Role tag for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

// ============================================================================
// Message Content
// ============================================================================

/// Content of a chat message.
///
/// Serializes as a bare string for plain text and as an array of typed
/// parts for multi-modal messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Multi-part content (text and image parts).
    Parts(Vec<ContentPart>),
}

/// One part of a multi-modal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part.
    Text {
        /// The text itself.
        text: String,
    },
    /// Image part, referenced by URL (including data URLs).
    ImageUrl {
        /// The image reference.
        image_url: ImageUrl,
    },
}

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// URL of the image; may be a `data:` URL with inline base64 content.
    pub url: String,
}

// ============================================================================
// Chat Message
// ============================================================================

/// A role-tagged message in a model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced this message.
    pub role: Role,
    /// Message content.
    pub content: MessageContent,
}

impl ChatMessage {
    /// Creates a system message with plain text content.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Creates a user message with plain text content.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Creates a user message with multi-part content.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

// ============================================================================
// Image Attachment
// ============================================================================

/// Raw image bytes handed to the OCR and vision boundaries.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// Encoded image bytes as uploaded.
    pub data: Vec<u8>,
    /// MIME type of the bytes (e.g. `image/png`).
    pub media_type: String,
}

impl ImageAttachment {
    /// Creates an attachment from bytes and a MIME type.
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }

    /// Guesses the MIME type from a file extension, defaulting to PNG.
    pub fn media_type_for_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "image/png",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_serializes_as_string_content() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_multipart_message_serializes_as_typed_parts() {
        let msg = ChatMessage::user_parts(vec![
            ContentPart::Text {
                text: "describe this".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,AAAA".to_string(),
                },
            },
        ]);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_media_type_for_extension() {
        assert_eq!(ImageAttachment::media_type_for_extension("JPG"), "image/jpeg");
        assert_eq!(ImageAttachment::media_type_for_extension("png"), "image/png");
        assert_eq!(ImageAttachment::media_type_for_extension("bmp"), "image/png");
    }
}
