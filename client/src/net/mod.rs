//! Networking modules for the auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP round trips, `error` normalizes failures, `config`
//! holds the backend base URL, and `types` defines the wire schema.

pub mod api;
pub mod config;
pub mod error;
pub mod types;
