//! Conversation turns and untrusted-content sanitization.
//!
//! A turn is one message in the dialogue, tagged as coming from the end
//! user or from the assistant. Turn content arrives from the public
//! internet and is bounded and normalized here before anything else in
//! the pipeline sees it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Markup-tag-like substrings are stripped from turn content.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Who produced a turn. Closed set; unknown values are coerced to
/// [`TurnRole::User`] at the boundary, never passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// End-user input.
    User,
    /// Assistant (model) reply.
    Assistant,
}

impl TurnRole {
    /// Coerces an untrusted role string to a member of the closed set.
    ///
    /// Anything other than exactly `"assistant"` becomes `User`.
    pub fn coerce(raw: &str) -> Self {
        if raw == "assistant" {
            TurnRole::Assistant
        } else {
            TurnRole::User
        }
    }

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// A turn exactly as it arrived in the request body, before any
/// validation. Role is an open string at this point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTurn {
    /// Declared role, not yet coerced.
    #[serde(default)]
    pub role: String,
    /// Declared content, not yet sanitized.
    #[serde(default)]
    pub content: String,
}

impl RawTurn {
    /// Convenience constructor for tests and internal callers.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A sanitized turn in the admitted conversation sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who sent this turn.
    pub role: TurnRole,
    /// Sanitized content, guaranteed non-empty.
    pub content: String,
}

impl ConversationTurn {
    /// Sanitizes a raw turn, returning `None` when nothing survives.
    ///
    /// Coerces the role, truncates content to `max_chars` characters,
    /// strips markup tags, and trims surrounding whitespace. A turn
    /// whose content is emptied by sanitization is dropped.
    pub fn sanitize(raw: &RawTurn, max_chars: usize) -> Option<Self> {
        let content = sanitize_content(&raw.content, max_chars);
        if content.is_empty() {
            return None;
        }
        Some(Self {
            role: TurnRole::coerce(&raw.role),
            content,
        })
    }

    /// Creates a user turn from already-trusted content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn from already-trusted content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Normalizes untrusted text: truncate to `max_chars` characters, strip
/// markup-tag-like substrings, trim surrounding whitespace.
///
/// Idempotent: sanitizing already-sanitized content yields the same
/// content.
pub fn sanitize_content(raw: &str, max_chars: usize) -> String {
    let truncated: String = raw.chars().take(max_chars).collect();
    let stripped = TAG_PATTERN.replace_all(&truncated, "");
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_coercion_accepts_assistant_only() {
        assert_eq!(TurnRole::coerce("assistant"), TurnRole::Assistant);
        assert_eq!(TurnRole::coerce("user"), TurnRole::User);
        assert_eq!(TurnRole::coerce("system"), TurnRole::User);
        assert_eq!(TurnRole::coerce("ASSISTANT"), TurnRole::User);
        assert_eq!(TurnRole::coerce(""), TurnRole::User);
    }

    #[test]
    fn sanitize_truncates_to_limit() {
        let long = "a".repeat(2000);
        assert_eq!(sanitize_content(&long, 1000).chars().count(), 1000);
    }

    #[test]
    fn sanitize_truncates_on_char_boundary() {
        let text = "é".repeat(1200);
        let out = sanitize_content(&text, 1000);
        assert_eq!(out.chars().count(), 1000);
    }

    #[test]
    fn sanitize_strips_markup_tags() {
        assert_eq!(
            sanitize_content("hello <script>alert(1)</script>world", 1000),
            "hello alert(1)world"
        );
        assert_eq!(sanitize_content("<b>bold</b>", 1000), "bold");
    }

    #[test]
    fn sanitize_keeps_unclosed_angle_bracket() {
        assert_eq!(sanitize_content("a < b", 1000), "a < b");
    }

    #[test]
    fn sanitize_trims_whitespace() {
        assert_eq!(sanitize_content("  hi there \n", 1000), "hi there");
    }

    #[test]
    fn sanitize_is_idempotent_on_nested_brackets() {
        for input in ["<<a>b>", "a<b>c<d", "x<y<z>w>", "<<>>"] {
            let once = sanitize_content(input, 1000);
            let twice = sanitize_content(&once, 1000);
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn sanitize_drops_emptied_turn() {
        let raw = RawTurn::new("user", "  <br/>  ");
        assert!(ConversationTurn::sanitize(&raw, 1000).is_none());
    }

    #[test]
    fn sanitize_keeps_surviving_turn() {
        let raw = RawTurn::new("assistant", " <b>Hi!</b> ");
        let turn = ConversationTurn::sanitize(&raw, 1000).unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.content, "Hi!");
    }

    #[test]
    fn role_serde_uses_lowercase() {
        let turn = ConversationTurn::user("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }
}
