use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::ApiError;
use crate::config::FeedConfig;
use crate::domain::claim::Claim;
use crate::domain::comment::{Comment, CreateComment};
use crate::domain::filter::Filter;
use crate::domain::notification::Notification;
use crate::domain::page::Page;
use crate::domain::report::Report;

/// Bearer credential for the reports API. Supplied explicitly by the caller
/// (the surrounding app owns sessions); never read from ambient storage.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// The seam the feed depends on: fetch one page of reports at an opaque
/// locator. The first-page locator is built from the Filter; every later
/// locator is exactly the `next` value the previous page returned, never
/// reconstructed by hand.
#[automock]
#[async_trait]
pub trait ReportsApi: Send + Sync {
    /// Canonical first-page locator for a filter: the listing endpoint plus
    /// the filter's serialized query parameters.
    fn first_page_locator(&self, filter: &Filter) -> String;

    async fn fetch_page(&self, locator: &str) -> Result<Page<Report>, ApiError>;
}

/// Receipt for a claim filed against a found report.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimReceipt {
    pub status: String,
    pub claim_id: i64,
}

#[derive(Clone)]
pub struct HttpReportsApi {
    client: reqwest::Client,
    base_url: Url,
    reports_endpoint: Url,
    token: AuthToken,
    timeout: Duration,
}

impl HttpReportsApi {
    pub fn new(base_url: &str, token: AuthToken) -> Result<Self, ApiError> {
        // A trailing slash matters to Url::join below.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|_| ApiError::InvalidUrl {
            url: normalized.clone(),
        })?;
        let reports_endpoint = base_url.join("reports/").map_err(|_| ApiError::InvalidUrl {
            url: format!("{}reports/", normalized),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            reports_endpoint,
            token,
            timeout: Duration::from_secs(10),
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, ApiError> {
        let mut api = Self::new(&config.base_url, AuthToken::new(&config.token))?;
        api.timeout = config.request_timeout;
        Ok(api)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|_| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.secret())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(url = %url, method = %method, "request");
        let response = self
            .client
            .request(method, url.clone())
            .bearer_auth(self.token.secret())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    // --- thin pass-throughs to the rest of the API ---

    pub async fn list_comments(&self, report_id: i64) -> Result<Page<Comment>, ApiError> {
        let endpoint = self.endpoint("comments/")?;
        let url = Url::parse_with_params(endpoint.as_str(), [("report", report_id.to_string())])
            .map_err(|_| ApiError::InvalidUrl {
                url: endpoint.to_string(),
            })?;
        self.get_json(url.as_str()).await
    }

    pub async fn create_comment(&self, body: &CreateComment) -> Result<Comment, ApiError> {
        let url = self.endpoint("comments/")?;
        self.send_json(reqwest::Method::POST, url, body).await
    }

    /// File a claim against a found report. The owner gets a notification.
    pub async fn claim_item(
        &self,
        report_id: i64,
        message: &str,
    ) -> Result<ClaimReceipt, ApiError> {
        #[derive(Serialize)]
        struct ClaimBody<'a> {
            message: &'a str,
        }

        let url = self.endpoint(&format!("reports/{}/claim_item/", report_id))?;
        self.send_json(reqwest::Method::POST, url, &ClaimBody { message })
            .await
    }

    /// Tell the owner of a lost report their item turned up.
    pub async fn item_found(&self, report_id: i64, message: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct FoundBody<'a> {
            message: &'a str,
        }

        #[derive(Deserialize)]
        struct Ack {
            #[allow(dead_code)]
            status: String,
        }

        let url = self.endpoint(&format!("reports/{}/item_found/", report_id))?;
        let _: Ack = self
            .send_json(reqwest::Method::POST, url, &FoundBody { message })
            .await?;
        Ok(())
    }

    /// Claims the current user has filed, newest first. Unpaginated on the
    /// server side.
    pub async fn my_claims(&self) -> Result<Vec<Claim>, ApiError> {
        let url = self.endpoint("claims/my-claims/")?;
        self.get_json(url.as_str()).await
    }

    pub async fn list_notifications(&self) -> Result<Page<Notification>, ApiError> {
        let url = self.endpoint("notifications/")?;
        self.get_json(url.as_str()).await
    }

    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct ReadBody {
            is_read: bool,
        }

        #[derive(Deserialize)]
        struct Ack {
            #[allow(dead_code)]
            status: String,
        }

        let url = self.endpoint(&format!("notifications/{}/", notification_id))?;
        let _: Ack = self
            .send_json(reqwest::Method::PATCH, url, &ReadBody { is_read: true })
            .await?;
        Ok(())
    }

    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        #[derive(Deserialize)]
        struct UnreadCount {
            unread_count: u64,
        }

        let url = self.endpoint("notifications/unread-count/")?;
        let count: UnreadCount = self.get_json(url.as_str()).await?;
        Ok(count.unread_count)
    }

    /// Resolve a report, handing the item to the claimant. `claimant_id`
    /// comes from the notification's claimant, not from the report owner.
    pub async fn resolve_report(
        &self,
        report_id: i64,
        claimant_id: &str,
    ) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct ResolveBody<'a> {
            claimant_id: &'a str,
        }

        #[derive(Deserialize)]
        struct Ack {
            #[allow(dead_code)]
            message: String,
        }

        let url = self.endpoint(&format!("reports/{}/resolve/", report_id))?;
        let _: Ack = self
            .send_json(reqwest::Method::POST, url, &ResolveBody { claimant_id })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ReportsApi for HttpReportsApi {
    fn first_page_locator(&self, filter: &Filter) -> String {
        let params = filter.query_params();
        if params.is_empty() {
            return self.reports_endpoint.to_string();
        }
        // The endpoint was validated at construction; re-parsing with
        // well-formed pairs cannot fail, but fall back to the bare endpoint
        // rather than panic.
        match Url::parse_with_params(self.reports_endpoint.as_str(), params) {
            Ok(url) => url.into(),
            Err(_) => self.reports_endpoint.to_string(),
        }
    }

    async fn fetch_page(&self, locator: &str) -> Result<Page<Report>, ApiError> {
        self.get_json(locator).await
    }
}
