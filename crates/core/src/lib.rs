//! Webdesk domain core.
//!
//! Dependency-light building blocks shared by the persistence and API
//! layers: shared type aliases, the domain error type, calendar
//! arithmetic for hosting renewals, and deadline framing for
//! notification emails.

pub mod deadline;
pub mod dates;
pub mod error;
pub mod types;
