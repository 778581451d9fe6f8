//! HTTP surface for the contest tracker.
//!
//! Handlers stay thin: principal extraction, input validation, then a call
//! into the dual-persistence service layer in [`services`].

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
