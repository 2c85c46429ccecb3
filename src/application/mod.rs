//! Application layer - use-case services orchestrating domain and ports.

mod chat;
mod dispatcher;
mod driver;
mod extractor;
mod gate;
mod notify;
mod script;

pub use chat::{ChatService, TurnReply};
pub use dispatcher::{ChannelOutcome, DispatchReport, NotificationDispatcher};
pub use driver::{DialogueDriver, DriverReply};
pub use extractor::{extract_lead, strip_markers, Extraction, ScanTerminal, CLOSE_MARKER, OPEN_MARKER};
pub use gate::{Admission, AdmissionGate, GateRejection, OriginPolicy};
pub use notify::{NotifyError, NotifyService};
pub use script::{behavioral_script, fallback_reply, DEFLECTION_REPLY};
