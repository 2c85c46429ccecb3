//! Lead extractor - pulls the marker-delimited payload out of a
//! completion and strips every trace of marker syntax from the visible
//! reply.
//!
//! The closing protocol embeds at most one well-formed block:
//! `|||LEAD|||{json}|||END|||`. Generated text is not guaranteed to
//! close the block correctly, so stripping handles well-formed blocks,
//! blocks missing their closing marker, and stray marker tokens; none of
//! it may ever reach the caller-visible surface.

use crate::domain::LeadRecord;

/// Opening marker of the lead block.
pub const OPEN_MARKER: &str = "|||LEAD|||";
/// Closing marker of the lead block.
pub const CLOSE_MARKER: &str = "|||END|||";
/// The bare sigil shared by both markers; any stray occurrence truncates
/// the visible reply.
const MARKER_SIGIL: &str = "|||";

/// Result of extracting from one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Completion with all marker content removed, for the caller.
    pub visible_reply: String,
    /// Decoded lead record, when a well-formed payload decoded.
    pub lead: Option<LeadRecord>,
}

/// How the strip scan over a completion terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTerminal {
    /// No marker content, or only well-formed blocks were removed.
    Clean,
    /// An opening marker was never closed; the reply truncates there.
    Truncated,
    /// A stray marker token appeared outside a block; the reply
    /// truncates there.
    StrayTruncated,
}

/// Extracts the first well-formed payload and strips all marker content.
///
/// Payload location and stripping are independent scans: a stray token
/// early in the text must not hide a well-formed block later, and a
/// decode failure must not leak the block into the visible reply. A
/// payload that fails to decode is logged and dropped; the turn still
/// succeeds with no lead.
pub fn extract_lead(completion: &str) -> Extraction {
    let lead = match find_payload(completion) {
        Some(payload) => match serde_json::from_str::<LeadRecord>(payload.trim()) {
            Ok(lead) => Some(lead),
            Err(e) => {
                tracing::warn!(error = %e, "lead payload failed to decode, dropping");
                None
            }
        },
        None => None,
    };

    let (visible_reply, terminal) = strip_markers(completion);
    if terminal != ScanTerminal::Clean {
        tracing::debug!(?terminal, "marker content truncated from reply");
    }

    Extraction {
        visible_reply,
        lead,
    }
}

/// Locates the first well-formed open/close pair and returns the
/// candidate payload between them (shortest span).
fn find_payload(text: &str) -> Option<&str> {
    let open = text.find(OPEN_MARKER)?;
    let body = &text[open + OPEN_MARKER.len()..];
    let close = body.find(CLOSE_MARKER)?;
    Some(&body[..close])
}

/// Removes every occurrence of marker-delimited or marker-prefixed
/// trailing content from the completion.
///
/// The scan walks the text looking for the marker sigil:
/// - a well-formed `OPEN..CLOSE` block is removed and the scan continues
///   after it;
/// - an opening marker with no closing marker truncates the reply at the
///   marker ([`ScanTerminal::Truncated`]);
/// - any other sigil occurrence truncates the reply there
///   ([`ScanTerminal::StrayTruncated`]).
pub fn strip_markers(text: &str) -> (String, ScanTerminal) {
    let mut visible = String::with_capacity(text.len());
    let mut rest = text;
    let mut terminal = ScanTerminal::Clean;

    loop {
        match rest.find(MARKER_SIGIL) {
            None => {
                visible.push_str(rest);
                break;
            }
            Some(i) => {
                visible.push_str(&rest[..i]);
                let at_marker = &rest[i..];

                if let Some(body) = at_marker.strip_prefix(OPEN_MARKER) {
                    match body.find(CLOSE_MARKER) {
                        Some(j) => {
                            rest = &body[j + CLOSE_MARKER.len()..];
                        }
                        None => {
                            terminal = ScanTerminal::Truncated;
                            break;
                        }
                    }
                } else {
                    terminal = ScanTerminal::StrayTruncated;
                    break;
                }
            }
        }
    }

    (visible.trim().to_string(), terminal)
}
