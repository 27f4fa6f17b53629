//! Request model consumed by context processors.
//!
//! Carries only what the rendering layer needs: the caller's address, the
//! language activated by locale middleware, and arbitrary middleware
//! metadata. Processors receive a shared reference and never mutate it.

use serde::Serialize;
use std::collections::HashMap;
use std::net::IpAddr;

/// Metadata key under which the CSRF middleware stores the issued token.
pub const CSRF_META_KEY: &str = "CSRF_COOKIE";

/// An incoming request as seen by template rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Request {
    remote_addr: Option<IpAddr>,
    language: Option<String>,
    meta: HashMap<String, String>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// Language activated for this request by locale middleware.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn remote_addr(&self) -> Option<IpAddr> {
        self.remote_addr
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}
