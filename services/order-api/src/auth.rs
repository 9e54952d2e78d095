use std::sync::Arc;

use domain::User;
use store::{StoreError, UserStore};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unknown user: {0}")]
    Unauthorized(Uuid),

    #[error("User {0} is not an administrator")]
    Forbidden(Uuid),

    #[error("Store error: {0}")]
    Store(StoreError),
}

/// Admin gate for catalog-mutating endpoints.
pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Fails with `Unauthorized` for unknown users and `Forbidden` for
    /// known non-admins.
    pub async fn require_admin(&self, user_id: Uuid) -> Result<User, AuthError> {
        let user = match self.users.get(user_id).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                warn!(user_id = %user_id, "Admin check for unknown user");
                return Err(AuthError::Unauthorized(user_id));
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        if !user.is_admin() {
            warn!(user_id = %user_id, "Admin access denied");
            return Err(AuthError::Forbidden(user_id));
        }

        info!(user_id = %user_id, "Admin access granted");
        Ok(user)
    }
}
