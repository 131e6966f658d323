use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::report::Report;
use crate::domain::user::UserRef;

/// A claimant summary nested in notifications: the latest user who filed a
/// claim against the related report. The server stringifies the id here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user: UserRef,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_report: Option<Report>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<Claimant>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The claimant id to send when resolving the related report. Sourced
    /// from the notification's claimant, never from the report owner.
    pub fn claimant_id(&self) -> Option<&str> {
        self.claimed_by.as_ref().map(|c| c.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimant_id_comes_from_the_notification() {
        let json = r#"{
            "id": 88,
            "user": {"id": 2, "username": "owner"},
            "message": "Pat Chan wants to claim the found item.",
            "detailed_message": "It has my name tag on it.",
            "related_report": null,
            "claimed_by": {"id": "31", "first_name": "Pat", "last_name": "Chan"},
            "is_read": false,
            "created_at": "2024-03-02T14:00:00Z"
        }"#;

        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.claimant_id(), Some("31"));
        assert!(!notification.is_read);
    }
}
