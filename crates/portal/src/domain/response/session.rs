use serde::{Deserialize, Serialize};
use shared::model::User;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub status: String,
    pub message: String,
    pub user: Option<User>,
}

impl SessionResponse {
    pub fn authenticated(message: &str, user: User) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            user: Some(user),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            status: "success".to_string(),
            message: "Logged out".to_string(),
            user: None,
        }
    }
}
