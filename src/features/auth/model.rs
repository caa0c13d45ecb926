use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The user acting on a request, as forwarded by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}
