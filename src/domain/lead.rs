//! Lead records - structured qualification data extracted from completions.
//!
//! Every field is model-generated and therefore treated as unvalidated
//! user-adjacent data until the extractor has confirmed the enclosing
//! payload decodes as this schema.

use serde::{Deserialize, Serialize};

/// Upper bound of the scoring rubric. The rubric in the behavioral
/// script sums to this value; keep the two in step.
pub const SCORE_SCALE_MAX: i32 = 12;

/// Minimum score for a lead to be eligible for notification.
/// Half the scale; scale changes must move this proportionally.
pub const QUALIFICATION_THRESHOLD: i32 = 6;

/// A prospective customer's qualification data and fit score.
///
/// All string fields default to empty so a sparse payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub timeline: String,
    /// Numeric fit score on the 0..=[`SCORE_SCALE_MAX`] scale.
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub summary: String,
}

impl LeadRecord {
    /// Whether the email field has the minimal shape of an address.
    pub fn has_contact_email(&self) -> bool {
        self.email.contains('@')
    }

    /// Whether the score clears the qualification threshold.
    pub fn is_qualified(&self) -> bool {
        self.score >= QUALIFICATION_THRESHOLD
    }

    /// Eligibility for notification dispatch: qualified score and a
    /// minimally well-formed email.
    pub fn is_notifiable(&self) -> bool {
        self.is_qualified() && self.has_contact_email()
    }

    /// Dedup identity: the lower-cased email, when one is present.
    pub fn identity(&self) -> Option<String> {
        if self.has_contact_email() {
            Some(self.email.trim().to_lowercase())
        } else {
            None
        }
    }

    /// First 30 characters of the project description for subject lines,
    /// with an ellipsis marker when truncated.
    pub fn project_snippet(&self) -> String {
        if self.project.is_empty() {
            return "New Inquiry".to_string();
        }
        let snippet: String = self.project.chars().take(30).collect();
        if self.project.chars().count() > 30 {
            format!("{}...", snippet)
        } else {
            snippet
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualified_lead() -> LeadRecord {
        LeadRecord {
            name: "Ada".to_string(),
            email: "Ada@Example.com".to_string(),
            project: "Computer vision prototype".to_string(),
            score: 9,
            ..Default::default()
        }
    }

    #[test]
    fn decodes_sparse_payload() {
        let lead: LeadRecord = serde_json::from_str(r#"{"score": 7}"#).unwrap();
        assert_eq!(lead.score, 7);
        assert!(lead.email.is_empty());
        assert!(!lead.has_contact_email());
    }

    #[test]
    fn threshold_is_half_the_scale() {
        assert_eq!(QUALIFICATION_THRESHOLD * 2, SCORE_SCALE_MAX);
    }

    #[test]
    fn qualification_at_threshold() {
        let mut lead = qualified_lead();
        lead.score = QUALIFICATION_THRESHOLD;
        assert!(lead.is_qualified());
        lead.score = QUALIFICATION_THRESHOLD - 1;
        assert!(!lead.is_qualified());
    }

    #[test]
    fn notifiable_requires_email_shape() {
        let mut lead = qualified_lead();
        assert!(lead.is_notifiable());
        lead.email = "no-separator".to_string();
        assert!(!lead.is_notifiable());
    }

    #[test]
    fn identity_is_lowercased() {
        let lead = qualified_lead();
        assert_eq!(lead.identity().unwrap(), "ada@example.com");
    }

    #[test]
    fn identity_absent_without_email() {
        let lead = LeadRecord {
            score: 10,
            ..Default::default()
        };
        assert!(lead.identity().is_none());
    }

    #[test]
    fn project_snippet_truncates_with_ellipsis() {
        let lead = LeadRecord {
            project: "A very long project description that keeps going".to_string(),
            ..Default::default()
        };
        let snippet = lead.project_snippet();
        assert_eq!(snippet, "A very long project descriptio...");
    }

    #[test]
    fn project_snippet_short_untouched() {
        let lead = LeadRecord {
            project: "CV demo".to_string(),
            ..Default::default()
        };
        assert_eq!(lead.project_snippet(), "CV demo");
    }

    #[test]
    fn project_snippet_empty_placeholder() {
        assert_eq!(LeadRecord::default().project_snippet(), "New Inquiry");
    }
}
