//! Backend endpoint configuration.
//!
//! The base URL is baked in at build time from `HOMEDECK_API_BASE` so the SSR
//! render and the hydrated bundle agree on it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim().trim_end_matches('/').to_owned() }
    }

    /// Config from the `HOMEDECK_API_BASE` build variable, else `/api`.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("HOMEDECK_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    /// Absolute endpoint URL for a backend path such as `auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
