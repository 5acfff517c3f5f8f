//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure policy from
//! page logic to improve reuse and testability.

pub mod guard;
pub mod lifecycle;
pub mod session_storage;
pub mod validate;
