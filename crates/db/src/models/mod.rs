//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` + `Deserialize` entity struct matching the
//!   database row (`Deserialize` because the same shape round-trips
//!   through the local JSON store in unauthenticated mode)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod contest;
pub mod file;
pub mod notification;
pub mod prompt;
pub mod result;
pub mod user;
