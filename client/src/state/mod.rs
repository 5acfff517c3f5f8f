//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the single authoritative holder of authentication state;
//! `session_ops` are the only code paths that drive it through a request.

pub mod session;
pub mod session_ops;
