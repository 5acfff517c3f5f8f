//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render presentation only; pages own the session context and
//! hand components the signals they need.

pub mod notification;
