mod client;
mod error;

pub use client::{AuthToken, ClaimReceipt, HttpReportsApi, MockReportsApi, ReportsApi};
pub use error::ApiError;
