use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserRef;

/// A claim filed against a found report, as the claims API returns it.
/// Handover fields stay empty until staff process the claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: i64,
    pub report: i64,
    pub claimed_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_from: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervised_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub received: bool,
    pub date_claimed: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_received: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_unprocessed_claim() {
        let json = r#"{
            "id": 6,
            "report": 42,
            "claimed_by": {"id": 31, "username": "pchan"},
            "received_from": null,
            "supervised_by": null,
            "verified_by": null,
            "message": "It has my name tag on it.",
            "received": false,
            "date_claimed": "2024-03-02T14:05:00Z",
            "date_received": null
        }"#;

        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.report, 42);
        assert_eq!(claim.claimed_by.username, "pchan");
        assert!(!claim.received);
        assert_eq!(claim.date_received, None);
    }
}
