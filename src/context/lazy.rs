//! Compute-on-first-use memoized string value.

use std::fmt;
use std::sync::OnceLock;

/// A string computed the first time it is read and memoized afterwards.
/// Used for context values whose computation should not run unless the
/// template actually references them (the CSRF token).
pub struct LazyValue {
    cell: OnceLock<String>,
    thunk: Box<dyn Fn() -> String + Send + Sync>,
}

impl LazyValue {
    pub fn new(thunk: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceLock::new(),
            thunk: Box::new(thunk),
        }
    }

    /// Force the value. The thunk runs at most once.
    pub fn get(&self) -> &str {
        self.cell.get_or_init(|| (self.thunk)())
    }

    /// Whether the value has been forced yet.
    pub fn is_evaluated(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("LazyValue").field(value).finish(),
            None => f.write_str("LazyValue(<unevaluated>)"),
        }
    }
}
