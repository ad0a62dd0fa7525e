use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// A catalog product returned by the matching backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Similarity to the query image in [0, 1]
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_of_ratings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Product {
    /// Whether this product is shown at the given threshold. Products without a
    /// similarity never are.
    pub fn meets(&self, threshold: f64) -> bool {
        self.similarity.is_some_and(|similarity| similarity >= threshold)
    }

    /// Similarity as a whole percentage, rounded half up.
    pub fn similarity_percent(&self) -> Option<i64> {
        self.similarity
            .map(|similarity| (similarity * 100.0).round() as i64)
    }
}
