//! Turn orchestration: gate, drive, extract, and dispatch for one
//! inbound conversation turn.

use std::sync::Arc;

use crate::application::dispatcher::NotificationDispatcher;
use crate::application::driver::{DialogueDriver, DriverReply};
use crate::application::extractor::extract_lead;
use crate::application::gate::{Admission, AdmissionGate, GateRejection};
use crate::application::script;
use crate::domain::{NotifiedLeads, RawTurn};

/// Orchestrates one chat turn end to end.
pub struct ChatService {
    gate: AdmissionGate,
    driver: DialogueDriver,
    notified: Arc<NotifiedLeads>,
    dispatcher: Arc<NotificationDispatcher>,
}

/// What the caller receives for one admitted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Visible reply text, free of marker syntax.
    pub reply: String,
    /// Echoed notification state, when the caller supplied one. True
    /// once any turn of the session dispatched a notification.
    pub notified: Option<bool>,
}

impl ChatService {
    /// Wires the turn pipeline together.
    pub fn new(
        gate: AdmissionGate,
        driver: DialogueDriver,
        notified: Arc<NotifiedLeads>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            gate,
            driver,
            notified,
            dispatcher,
        }
    }

    /// Handles one inbound turn.
    ///
    /// Gate rejections surface as errors for the transport layer to map.
    /// Deflections and backend fallbacks both come back as ordinary
    /// replies. A notifiable lead is claimed before dispatch so a
    /// concurrent duplicate turn can never notify twice; dispatch itself
    /// runs in the background and never delays the reply.
    pub async fn handle_turn(
        &self,
        origin: Option<&str>,
        client: &str,
        turns: &[RawTurn],
        notified_flag: Option<bool>,
    ) -> Result<TurnReply, GateRejection> {
        let admitted = match self.gate.admit(origin, client, turns).await {
            Admission::Admitted(turns) => turns,
            Admission::Deflected => {
                return Ok(TurnReply {
                    reply: script::DEFLECTION_REPLY.to_string(),
                    notified: notified_flag,
                });
            }
            Admission::Rejected(rejection) => return Err(rejection),
        };

        let completion = match self.driver.drive(&admitted).await {
            DriverReply::Completion(text) => text,
            DriverReply::Fallback(text) => {
                return Ok(TurnReply {
                    reply: text,
                    notified: notified_flag,
                });
            }
        };

        let extraction = extract_lead(&completion);

        let mut dispatched = false;
        if let Some(lead) = extraction.lead {
            if lead.is_notifiable() {
                match lead.identity() {
                    Some(identity) if self.notified.claim(&identity) => {
                        tracing::info!(score = lead.score, "qualified lead claimed, dispatching");
                        self.dispatcher.dispatch_background(lead);
                        dispatched = true;
                    }
                    Some(_) => {
                        tracing::info!("lead already notified this process, skipping dispatch");
                    }
                    None => {}
                }
            } else {
                tracing::info!(
                    score = lead.score,
                    has_email = lead.has_contact_email(),
                    "lead captured but not notifiable"
                );
            }
        }

        Ok(TurnReply {
            reply: extraction.visible_reply,
            notified: notified_flag.map(|prev| prev || dispatched),
        })
    }
}
