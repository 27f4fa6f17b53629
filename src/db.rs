//! Database query log.
//!
//! The database layer records executed statements into a shared log; the
//! debug context processor is the only reader, and only under the
//! debug-and-allow-listed disclosure guard.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One executed statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub sql: String,
    pub duration_ms: f64,
    pub at: DateTime<Utc>,
}

/// Shared, append-only query log. Cloning the handle shares the same log.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    inner: Arc<RwLock<Vec<QueryRecord>>>,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sql: impl Into<String>, duration_ms: f64) {
        self.inner.write().push(QueryRecord {
            sql: sql.into(),
            duration_ms,
            at: Utc::now(),
        });
    }

    pub fn snapshot(&self) -> Vec<QueryRecord> {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
