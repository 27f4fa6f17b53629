//! Deprecated permission-view re-exports.
//!
//! The permission views once lived in this module and moved to
//! `crate::auth`. These wrappers keep old import paths working: they forward
//! every call to the real implementation and log a deprecation warning the
//! first time each type is constructed. Scheduled for removal once the
//! deprecation window ends.

use crate::auth;
use crate::auth::PermissionSet;
use std::sync::Once;
use tracing::warn;

static PERMISSIONS_VIEW_WARNING: Once = Once::new();
static APP_PERMISSIONS_WARNING: Once = Once::new();

/// Log the deprecation once per call site type. Returns whether this call
/// emitted the warning.
fn warn_once(once: &Once, old_path: &str, new_path: &str) -> bool {
    let mut emitted = false;
    once.call_once(|| {
        warn!(
            deprecated = old_path,
            replacement = new_path,
            "Deprecated import path; update imports to the replacement"
        );
        emitted = true;
    });
    emitted
}

/// Deprecated alias of [`auth::PermissionsView`].
#[derive(Debug, Clone)]
pub struct PermissionsView {
    inner: auth::PermissionsView,
}

impl PermissionsView {
    pub fn new(set: PermissionSet) -> Self {
        warn_once(
            &PERMISSIONS_VIEW_WARNING,
            "plinth::context::PermissionsView",
            "plinth::auth::PermissionsView",
        );
        Self {
            inner: auth::PermissionsView::new(set),
        }
    }

    pub fn app(&self, label: &str) -> auth::AppPermissions {
        self.inner.app(label)
    }

    pub fn has_perm(&self, perm: &str) -> bool {
        self.inner.has_perm(perm)
    }

    pub fn set(&self) -> &PermissionSet {
        self.inner.set()
    }

    pub fn into_inner(self) -> auth::PermissionsView {
        self.inner
    }
}

/// Deprecated alias of [`auth::AppPermissions`].
#[derive(Debug, Clone)]
pub struct AppPermissions {
    inner: auth::AppPermissions,
}

impl AppPermissions {
    pub fn new(set: &PermissionSet, app: &str) -> Self {
        warn_once(
            &APP_PERMISSIONS_WARNING,
            "plinth::context::AppPermissions",
            "plinth::auth::AppPermissions",
        );
        Self {
            inner: auth::AppPermissions::new(set, app),
        }
    }

    pub fn app(&self) -> &str {
        self.inner.app()
    }

    pub fn allows(&self, action: &str) -> bool {
        self.inner.allows(action)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_inner(self) -> auth::AppPermissions {
        self.inner
    }
}
