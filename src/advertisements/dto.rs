use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::ApiError;

const TITLE_MIN: usize = 8;
const DESCRIPTION_MIN: usize = 5;

/// Request body for advertisement creation. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateAdvertisement {
    pub title: String,
    pub description: String,
}

impl CreateAdvertisement {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.chars().count() < TITLE_MIN
            || self.description.chars().count() < DESCRIPTION_MIN
        {
            return Err(ApiError::bad_request("incorrect input_data!"));
        }
        Ok(())
    }
}

/// Partial update: absent fields are left untouched, never cleared.
/// `user_id` is captured only to reject attempts to reassign the owner;
/// the key is rejected whatever its value, null included.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdvertisement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "key_presence")]
    pub user_id: Option<Option<Value>>,
}

/// Maps a present key to `Some`, even when its JSON value is null. Plain
/// `Option<Value>` cannot tell `"user_id": null` apart from an absent key.
fn key_presence<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}

impl UpdateAdvertisement {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.user_id.is_some() {
            return Err(ApiError::bad_request(
                "advertisement owner cannot be changed",
            ));
        }
        if let Some(title) = &self.title {
            if title.chars().count() < TITLE_MIN {
                return Err(ApiError::bad_request("incorrect input_data!"));
            }
        }
        if let Some(description) = &self.description {
            if description.chars().count() < DESCRIPTION_MIN {
                return Err(ApiError::bad_request("incorrect input_data!"));
            }
        }
        Ok(())
    }
}

/// Public view of an advertisement.
#[derive(Debug, Serialize)]
pub struct AdvertisementResponse {
    pub adv_id: i32,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub created_by: String,
}
