//! Property tests for context merge semantics and lazy evaluation.

use plinth::config::AppConfig;
use plinth::context::{
    ContextMap, ContextProcessor, ContextProcessors, ContextValue, LazyValue, RequestContext,
};
use plinth::request::Request;
use proptest::prelude::*;
use std::collections::HashMap;

/// Processor contributing a fixed set of string pairs.
struct PairsProcessor {
    name: String,
    pairs: Vec<(String, String)>,
}

impl ContextProcessor for PairsProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, _request: &Request, _config: &AppConfig) -> ContextMap {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), ContextValue::from(v.clone())))
            .collect()
    }
}

fn key_strategy() -> impl Strategy<Value = String> {
    // Small key space to force collisions across processors.
    prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_string)
}

fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), "[a-z]{1,8}"), 0..6)
}

proptest! {
    /// Merged context equals the last-write-wins fold of processor outputs,
    /// regardless of how keys collide across processors.
    #[test]
    fn merged_context_is_last_write_wins(
        first in pairs_strategy(),
        second in pairs_strategy(),
        third in pairs_strategy(),
    ) {
        let config = AppConfig::default();
        let request = Request::new();

        let processors = ContextProcessors::new()
            .with(PairsProcessor { name: "first".to_string(), pairs: first.clone() })
            .with(PairsProcessor { name: "second".to_string(), pairs: second.clone() })
            .with(PairsProcessor { name: "third".to_string(), pairs: third.clone() });
        let context = RequestContext::build(&processors, &request, &config);

        // Reference model: apply contributions in order into a plain map.
        let mut expected: HashMap<String, String> = HashMap::new();
        for (k, v) in first.iter().chain(second.iter()).chain(third.iter()) {
            expected.insert(k.clone(), v.clone());
        }

        for (key, value) in &expected {
            prop_assert_eq!(
                context.get(key).map(|v| v.resolve()),
                Some(serde_json::Value::String(value.clone()))
            );
        }
        // No keys beyond the contributions plus the always-present token.
        prop_assert_eq!(context.len(), expected.len() + 1);
        prop_assert!(context.contains_key("csrf_token"));
    }

    /// A lazy value computes exactly once no matter how often it is read.
    #[test]
    fn lazy_value_computes_once(reads in 1usize..8, payload in "[a-z]{1,16}") {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let expected = payload.clone();
        let lazy = LazyValue::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            expected.clone()
        });

        prop_assert!(!lazy.is_evaluated());
        for _ in 0..reads {
            prop_assert_eq!(lazy.get(), payload.as_str());
        }
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
