use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;

const PASSWORD_MIN: usize = 5;

/// Request body for user registration. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.email.is_empty() || self.password.chars().count() < PASSWORD_MIN {
            return Err(ApiError::bad_request("incorrect input_data!"));
        }
        Ok(())
    }
}

/// Public view of a user, with the ids of the advertisements they own.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i32,
    pub user_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub advs: Vec<i32>,
}
