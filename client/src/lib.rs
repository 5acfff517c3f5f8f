//! # client
//!
//! Leptos + WASM console for HomeDeck, the smart-home management app.
//!
//! This crate holds the authentication core: the session store, the async
//! session operations that drive it, the route guard, and the credential
//! forms. Device and organization screens consume the session store's
//! `is_authenticated`/`user_info` fields and live outside this crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
