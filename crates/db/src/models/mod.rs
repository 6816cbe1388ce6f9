//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts
//!
//! Enum-like TEXT columns map to the closed enums in [`enums`].

pub mod client;
pub mod enums;
pub mod hosting_history;
pub mod notification_log;
pub mod project;
