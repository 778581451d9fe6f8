//! Domain logic for the contest tracker: shared types, the domain error
//! enum, derived-state calculations, status enumerations, detail-blob item
//! shapes, and the AI field-extraction parser.
//!
//! This crate is pure: no I/O, no async, no database types.

pub mod details;
pub mod error;
pub mod extraction;
pub mod lifecycle;
pub mod status;
pub mod types;
