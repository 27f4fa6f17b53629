//! CSRF token access for template rendering.
//!
//! Token issuance lives in the CSRF middleware; this module only looks up
//! what the middleware stored on the request.

use crate::request::{Request, CSRF_META_KEY};

/// Rendered in place of a token when none was issued for the request.
pub const NOT_PROVIDED: &str = "NOTPROVIDED";

/// Token issued for this request by the CSRF middleware, if any.
pub fn get_token(request: &Request) -> Option<String> {
    request.meta(CSRF_META_KEY).map(str::to_string)
}

/// Token or the `NOTPROVIDED` sentinel.
pub fn token_or_sentinel(request: &Request) -> String {
    get_token(request).unwrap_or_else(|| NOT_PROVIDED.to_string())
}
