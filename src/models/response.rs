use serde::{Deserialize, Serialize};

use crate::models::{Product, null_as_default};

/// Body returned by both `/api/upload` and `/api/url`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    /// Base64 JPEG of the image the backend actually matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
}

/// Body returned by `/api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HealthResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
