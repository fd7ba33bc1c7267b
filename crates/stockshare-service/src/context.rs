//! Request context carrying the authenticated merchant.

use uuid::Uuid;

/// Who is acting in the current request.
///
/// Built by the HTTP layer after the session token has been verified and
/// the account still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Uuid,
}

impl RequestContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
