pub mod claim;
pub mod comment;
pub mod filter;
pub mod notification;
pub mod page;
pub mod report;
pub mod user;
