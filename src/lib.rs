//! Plinth: Template Context Processors and Management Commands
//!
//! Auxiliary building blocks for web applications: request-scoped template
//! context contribution (CSRF token, debug info, locale, static/media URLs)
//! and a small management CLI (sitemap ping, test runner dispatch).

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod csrf;
pub mod db;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod request;
pub mod runner;
pub mod sitemap;
