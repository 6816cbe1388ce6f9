//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` (or an executor) as the first argument.

pub mod client_repo;
pub mod hosting_history_repo;
pub mod notification_log_repo;
pub mod project_repo;

pub use client_repo::ClientRepo;
pub use hosting_history_repo::HostingHistoryRepo;
pub use notification_log_repo::NotificationLogRepo;
pub use project_repo::ProjectRepo;
