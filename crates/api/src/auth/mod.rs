//! Token validation. Tokens are minted by the external identity provider;
//! this server only verifies them.

pub mod jwt;
