//! Domain types - conversation turns, lead records, notification identity.

mod conversation;
mod lead;
mod notified;

pub use conversation::{sanitize_content, ConversationTurn, RawTurn, TurnRole};
pub use lead::{LeadRecord, QUALIFICATION_THRESHOLD, SCORE_SCALE_MAX};
pub use notified::NotifiedLeads;
