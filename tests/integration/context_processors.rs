//! Integration tests for the context-processor registry and request context.

use plinth::config::AppConfig;
use plinth::context::{
    ContextMap, ContextProcessor, ContextProcessors, ContextValue, RequestContext,
};
use plinth::csrf;
use plinth::db::QueryLog;
use plinth::request::{Request, CSRF_META_KEY};
use std::net::IpAddr;

fn default_registry(config: &AppConfig, log: QueryLog) -> ContextProcessors {
    ContextProcessors::from_config(config, log).unwrap()
}

#[test]
fn test_default_registry_produces_documented_keys() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new());
    let context = RequestContext::build(&registry, &Request::new(), &config);

    let keys: Vec<&str> = context.keys().collect();
    assert_eq!(
        keys,
        vec![
            "LANGUAGES",
            "LANGUAGE_BIDI",
            "LANGUAGE_CODE",
            "MEDIA_URL",
            "STATIC_URL",
            "csrf_token",
            "request",
        ]
    );
}

#[test]
fn test_debug_keys_only_for_allowlisted_debug_requests() {
    let mut config = AppConfig::default();
    config.debug = true;
    config.internal_ips = vec!["127.0.0.1".parse::<IpAddr>().unwrap()];
    let registry = default_registry(&config, QueryLog::new());

    let allowed = Request::new().with_remote_addr("127.0.0.1".parse().unwrap());
    let context = RequestContext::build(&registry, &allowed, &config);
    assert!(context.contains_key("debug"));
    assert!(context.contains_key("sql_queries"));

    let outsider = Request::new().with_remote_addr("203.0.113.7".parse().unwrap());
    let context = RequestContext::build(&registry, &outsider, &config);
    assert!(!context.contains_key("debug"));
    assert!(!context.contains_key("sql_queries"));

    // Same allow-listed caller, debug disabled.
    let mut production = config.clone();
    production.debug = false;
    let registry = default_registry(&production, QueryLog::new());
    let context = RequestContext::build(&registry, &allowed, &production);
    assert!(!context.contains_key("sql_queries"));
}

#[test]
fn test_sql_queries_reflect_recorded_statements() {
    let mut config = AppConfig::default();
    config.debug = true;
    config.internal_ips = vec!["127.0.0.1".parse::<IpAddr>().unwrap()];

    let log = QueryLog::new();
    log.record("SELECT * FROM posts WHERE id = 1", 0.7);
    let registry = default_registry(&config, log);

    let request = Request::new().with_remote_addr("127.0.0.1".parse().unwrap());
    let context = RequestContext::build(&registry, &request, &config);
    let queries = context.get("sql_queries").unwrap().resolve();
    assert_eq!(queries.as_array().unwrap().len(), 1);
    assert_eq!(queries[0]["sql"], "SELECT * FROM posts WHERE id = 1");
}

#[test]
fn test_csrf_token_is_lazy_until_resolved() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new());
    let request = Request::new().with_meta(CSRF_META_KEY, "tok-abcdef");

    let context = RequestContext::build(&registry, &request, &config);
    let ContextValue::Lazy(lazy) = context.get("csrf_token").unwrap() else {
        panic!("csrf_token must be lazy");
    };

    // Building the context must not force token computation.
    assert!(!lazy.is_evaluated());
    assert_eq!(lazy.get(), "tok-abcdef");
    assert!(lazy.is_evaluated());
}

#[test]
fn test_csrf_sentinel_without_middleware_token() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new());
    let context = RequestContext::build(&registry, &Request::new(), &config);
    assert_eq!(
        context.get("csrf_token").unwrap().resolve(),
        serde_json::Value::String(csrf::NOT_PROVIDED.to_string())
    );
}

#[test]
fn test_i18n_reflects_configured_catalog() {
    let mut config = AppConfig::default();
    config.language_code = "ar".to_string();
    let registry = default_registry(&config, QueryLog::new());

    let context = RequestContext::build(&registry, &Request::new(), &config);
    assert_eq!(
        context.get("LANGUAGE_CODE").unwrap().resolve(),
        serde_json::Value::String("ar".to_string())
    );
    assert_eq!(
        context.get("LANGUAGE_BIDI").unwrap().resolve(),
        serde_json::Value::Bool(true)
    );
    let languages = context.get("LANGUAGES").unwrap().resolve();
    assert_eq!(languages[0]["code"], "en");
}

struct OverrideStatic;

impl ContextProcessor for OverrideStatic {
    fn name(&self) -> &str {
        "override_static"
    }

    fn process(&self, _request: &Request, _config: &AppConfig) -> ContextMap {
        let mut map = ContextMap::new();
        map.insert(
            "STATIC_URL".to_string(),
            ContextValue::from("https://cdn.example.com/static/"),
        );
        map
    }
}

#[test]
fn test_later_processor_overrides_earlier_key() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new()).with(OverrideStatic);

    let context = RequestContext::build(&registry, &Request::new(), &config);
    assert_eq!(
        context.get("STATIC_URL").unwrap().resolve(),
        serde_json::Value::String("https://cdn.example.com/static/".to_string())
    );
}

#[test]
fn test_request_key_carries_request_data() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new());
    let request = Request::new()
        .with_remote_addr("198.51.100.4".parse().unwrap())
        .with_meta("X-Request-Id", "req-77");

    let context = RequestContext::build(&registry, &request, &config);
    let value = context.get("request").unwrap().resolve();
    assert_eq!(value["remote_addr"], "198.51.100.4");
    assert_eq!(value["meta"]["X-Request-Id"], "req-77");
}

#[test]
fn test_resolve_produces_plain_json_map() {
    let config = AppConfig::default();
    let registry = default_registry(&config, QueryLog::new());
    let context = RequestContext::build(&registry, &Request::new(), &config);

    let resolved = context.resolve();
    assert_eq!(resolved.len(), context.len());
    assert_eq!(
        resolved.get("STATIC_URL"),
        Some(&serde_json::Value::String("/static/".to_string()))
    );
}
