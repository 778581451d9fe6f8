//! HTTP handlers, grouped by resource.
//!
//! Handlers extract the (optional) principal, validate input, and call
//! into the service layer; persistence routing lives there, not here.

pub mod ai;
pub mod contests;
pub mod details;
pub mod files;
pub mod notifications;
pub mod prompts;
pub mod results;
pub mod users;
