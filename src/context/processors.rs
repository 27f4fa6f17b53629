//! Built-in context processors.
//!
//! Each contributes its documented keys and nothing else. Conditional keys
//! (debug) appear only under their documented conditions.

use crate::config::AppConfig;
use crate::context::{ContextMap, ContextProcessor, ContextValue, LazyValue};
use crate::csrf;
use crate::db::QueryLog;
use crate::i18n;
use crate::request::Request;
use std::sync::Arc;

/// Provides `csrf_token`: the middleware-issued token, or the
/// `NOTPROVIDED` sentinel when none was issued. The lookup is lazy so an
/// unused token is never computed.
pub struct CsrfProcessor;

impl ContextProcessor for CsrfProcessor {
    fn name(&self) -> &str {
        "csrf"
    }

    fn process(&self, request: &Request, _config: &AppConfig) -> ContextMap {
        let request = request.clone();
        let token = LazyValue::new(move || csrf::token_or_sentinel(&request));
        let mut map = ContextMap::new();
        map.insert("csrf_token".to_string(), ContextValue::Lazy(Arc::new(token)));
        map
    }
}

/// Provides `debug` and `sql_queries`, but only when debug mode is on and
/// the caller's address is allow-listed. Disclosure guard: both conditions
/// are required; a request without a remote address never matches.
pub struct DebugProcessor {
    queries: QueryLog,
}

impl DebugProcessor {
    pub fn new(queries: QueryLog) -> Self {
        Self { queries }
    }
}

impl ContextProcessor for DebugProcessor {
    fn name(&self) -> &str {
        "debug"
    }

    fn process(&self, request: &Request, config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        let allowed = request
            .remote_addr()
            .map(|addr| config.internal_ips.contains(&addr))
            .unwrap_or(false);
        if config.debug && allowed {
            map.insert("debug".to_string(), ContextValue::from(true));
            let queries = serde_json::to_value(self.queries.snapshot())
                .unwrap_or(serde_json::Value::Null);
            map.insert("sql_queries".to_string(), ContextValue::Json(queries));
        }
        map
    }
}

/// Provides `LANGUAGES`, `LANGUAGE_CODE`, and `LANGUAGE_BIDI`.
pub struct I18nProcessor;

impl ContextProcessor for I18nProcessor {
    fn name(&self) -> &str {
        "i18n"
    }

    fn process(&self, request: &Request, config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        let languages =
            serde_json::to_value(&config.languages).unwrap_or(serde_json::Value::Null);
        map.insert("LANGUAGES".to_string(), ContextValue::Json(languages));

        let language = i18n::get_language(request, config);
        map.insert(
            "LANGUAGE_BIDI".to_string(),
            ContextValue::from(i18n::get_language_bidi(&language)),
        );
        map.insert("LANGUAGE_CODE".to_string(), ContextValue::from(language));
        map
    }
}

/// Provides `STATIC_URL`.
pub struct StaticProcessor;

impl ContextProcessor for StaticProcessor {
    fn name(&self) -> &str {
        "static"
    }

    fn process(&self, _request: &Request, config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert(
            "STATIC_URL".to_string(),
            ContextValue::from(config.static_url.clone()),
        );
        map
    }
}

/// Provides `MEDIA_URL`.
pub struct MediaProcessor;

impl ContextProcessor for MediaProcessor {
    fn name(&self) -> &str {
        "media"
    }

    fn process(&self, _request: &Request, config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert(
            "MEDIA_URL".to_string(),
            ContextValue::from(config.media_url.clone()),
        );
        map
    }
}

/// Provides `request`: the request itself.
pub struct RequestProcessor;

impl ContextProcessor for RequestProcessor {
    fn name(&self) -> &str {
        "request"
    }

    fn process(&self, request: &Request, _config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert(
            "request".to_string(),
            ContextValue::Request(request.clone()),
        );
        map
    }
}
