//! HTTP handlers, grouped per resource.

pub mod health;
pub mod hosting;
pub mod notification;
