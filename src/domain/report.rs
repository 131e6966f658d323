use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Lost,
    Found,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Lost => "lost",
            ReportType::Found => "found",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lost" => Some(ReportType::Lost),
            "found" => Some(ReportType::Found),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostItem {
    pub id: i64,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub location_last_seen: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_lost: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundItem {
    pub id: i64,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub location_found: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_found: Option<NaiveDate>,
}

/// A lost-or-found report as the listing API returns it. Exactly one of
/// `lost_item` / `found_item` is populated, matching `report_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub date_time: DateTime<Utc>,
    pub status: ReportStatus,
    pub reported_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_item: Option<LostItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_item: Option<FoundItem>,
}

impl Report {
    pub fn item_name(&self) -> Option<&str> {
        match self.report_type {
            ReportType::Lost => self.lost_item.as_ref().map(|i| i.item_name.as_str()),
            ReportType::Found => self.found_item.as_ref().map(|i| i.item_name.as_str()),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self.report_type {
            ReportType::Lost => self.lost_item.as_ref().map(|i| i.description.as_str()),
            ReportType::Found => self.found_item.as_ref().map(|i| i.description.as_str()),
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self.report_type {
            ReportType::Lost => self.lost_item.as_ref().map(|i| i.category.as_str()),
            ReportType::Found => self.found_item.as_ref().map(|i| i.category.as_str()),
        }
    }

    /// Last-seen location for lost reports, found location for found ones.
    pub fn location(&self) -> Option<&str> {
        match self.report_type {
            ReportType::Lost => self
                .lost_item
                .as_ref()
                .map(|i| i.location_last_seen.as_str()),
            ReportType::Found => self.found_item.as_ref().map(|i| i.location_found.as_str()),
        }
    }

    pub fn photo_url(&self) -> Option<&str> {
        match self.report_type {
            ReportType::Lost => self
                .lost_item
                .as_ref()
                .and_then(|i| i.photo_url.as_deref()),
            ReportType::Found => self
                .found_item
                .as_ref()
                .and_then(|i| i.photo_url.as_deref()),
        }
    }
}
