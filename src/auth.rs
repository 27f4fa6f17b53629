//! Permission views exposed to templates.
//!
//! A user's permissions resolve to flat `"app.action"` strings; templates see
//! them through `PermissionsView` (whole catalog) and `AppPermissions` (one
//! application). The deprecated re-exports in `crate::context` forward here.

use std::collections::BTreeSet;

/// A user's resolved permission set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    perms: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new(perms: impl IntoIterator<Item = String>) -> Self {
        Self {
            perms: perms.into_iter().collect(),
        }
    }

    /// Exact `"app.action"` membership.
    pub fn has_perm(&self, perm: &str) -> bool {
        self.perms.contains(perm)
    }

    /// Whether any permission belongs to the given application.
    pub fn has_module_perms(&self, app: &str) -> bool {
        let prefix = format!("{}.", app);
        self.perms.iter().any(|p| p.starts_with(&prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.perms.iter().map(String::as_str)
    }
}

/// Permission view for one application (`perms.app` in templates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPermissions {
    app: String,
    actions: BTreeSet<String>,
}

impl AppPermissions {
    pub fn new(set: &PermissionSet, app: &str) -> Self {
        let prefix = format!("{}.", app);
        let actions = set
            .iter()
            .filter_map(|p| p.strip_prefix(&prefix))
            .map(str::to_string)
            .collect();
        Self {
            app: app.to_string(),
            actions,
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Whether the user holds `"<app>.<action>"`.
    pub fn allows(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// True when the user holds no permission in this application.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Whole-catalog permission view (`perms` in templates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsView {
    set: PermissionSet,
}

impl PermissionsView {
    pub fn new(set: PermissionSet) -> Self {
        Self { set }
    }

    /// Per-application view.
    pub fn app(&self, label: &str) -> AppPermissions {
        AppPermissions::new(&self.set, label)
    }

    pub fn has_perm(&self, perm: &str) -> bool {
        self.set.has_perm(perm)
    }

    pub fn set(&self) -> &PermissionSet {
        &self.set
    }
}
