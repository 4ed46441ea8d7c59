//! Notes API server library.
//!
//! Exposes config, state, error handling, routes and the spreadsheet
//! writer so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
