//! Template context: processor contract, registry, and per-render assembly.
//!
//! A context processor contributes key-value pairs to the template namespace
//! for one render. Processors are pure functions of the request plus the
//! application settings; the registry applies them in configured order and
//! merges their output, later processors overriding earlier ones on key
//! collision.

mod deprecated;
mod lazy;
pub mod processors;

pub use deprecated::{AppPermissions, PermissionsView};
pub use lazy::LazyValue;

use crate::config::AppConfig;
use crate::db::QueryLog;
use crate::error::CommandError;
use crate::request::Request;
use processors::{
    CsrfProcessor, DebugProcessor, I18nProcessor, MediaProcessor, RequestProcessor,
    StaticProcessor,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One template variable.
#[derive(Debug, Clone)]
pub enum ContextValue {
    Json(serde_json::Value),
    Lazy(Arc<LazyValue>),
    Request(Request),
}

impl ContextValue {
    /// Materialize the value. Forces lazy values; serializes the request.
    pub fn resolve(&self) -> serde_json::Value {
        match self {
            ContextValue::Json(value) => value.clone(),
            ContextValue::Lazy(lazy) => serde_json::Value::String(lazy.get().to_string()),
            ContextValue::Request(request) => {
                serde_json::to_value(request).unwrap_or(serde_json::Value::Null)
            }
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Json(serde_json::Value::Bool(value))
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Json(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Json(serde_json::Value::String(value))
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        ContextValue::Json(value)
    }
}

/// Variables contributed by one processor, or merged for one render.
pub type ContextMap = BTreeMap<String, ContextValue>;

/// Contract: read-only view of the request plus settings in, contributed
/// variables out. Must tolerate missing or partial configuration; a
/// processor degrades to sentinels or omitted keys, never an error.
pub trait ContextProcessor: Send + Sync {
    /// Registry name, as referenced from `context_processors` in settings.
    fn name(&self) -> &str;

    fn process(&self, request: &Request, config: &AppConfig) -> ContextMap;
}

/// Ordered processor registry for template rendering.
#[derive(Clone, Default)]
pub struct ContextProcessors {
    processors: Vec<Arc<dyn ContextProcessor>>,
}

impl ContextProcessors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the processor names listed in settings. Unknown names are
    /// configuration errors. The debug processor reads from `query_log`.
    pub fn from_config(config: &AppConfig, query_log: QueryLog) -> Result<Self, CommandError> {
        let mut registry = Self::new();
        for name in &config.context_processors {
            let processor: Arc<dyn ContextProcessor> = match name.as_str() {
                "csrf" => Arc::new(CsrfProcessor),
                "debug" => Arc::new(DebugProcessor::new(query_log.clone())),
                "i18n" => Arc::new(I18nProcessor),
                "static" => Arc::new(StaticProcessor),
                "media" => Arc::new(MediaProcessor),
                "request" => Arc::new(RequestProcessor),
                other => {
                    return Err(CommandError::ConfigError(format!(
                        "Unknown context processor: {}",
                        other
                    )))
                }
            };
            registry.processors.push(processor);
        }
        Ok(registry)
    }

    pub fn with(mut self, processor: impl ContextProcessor + 'static) -> Self {
        self.processors.push(Arc::new(processor));
        self
    }

    pub fn push(&mut self, processor: Arc<dyn ContextProcessor>) {
        self.processors.push(processor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.processors.iter().any(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ContextProcessor>> {
        self.processors.iter()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

/// Merged template namespace for one render. Created per render, discarded
/// after use.
#[derive(Debug)]
pub struct RequestContext {
    values: ContextMap,
}

impl RequestContext {
    /// Run every processor in order and merge the results. The CSRF
    /// processor always runs first, whether or not it is registered, so
    /// `csrf_token` is present in every context. Later processors override
    /// earlier ones on key collision.
    pub fn build(processors: &ContextProcessors, request: &Request, config: &AppConfig) -> Self {
        let mut values = ContextMap::new();
        if !processors.contains("csrf") {
            values.extend(CsrfProcessor.process(request, config));
        }
        for processor in processors.iter() {
            values.extend(processor.process(request, config));
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve every value into a plain JSON map. Forces lazy values.
    pub fn resolve(&self) -> serde_json::Map<String, serde_json::Value> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.resolve()))
            .collect()
    }
}
