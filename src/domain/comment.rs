use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub report: i64,
    pub user: UserRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /comments/.
#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    pub report: i64,
    pub content: String,
}
