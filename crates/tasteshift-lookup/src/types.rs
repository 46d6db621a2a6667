//! Wire types of the food-info backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupRequest<'a> {
    pub food_name: &'a str,
    pub country: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupEnvelope {
    pub success: bool,
    pub data: Option<FoodInfo>,
    pub error: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

/// A cited source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

/// One answered question with its sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSection {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// General and cultural information about one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInfo {
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub general: InfoSection,
    #[serde(default)]
    pub cultural: InfoSection,
    /// Set by the backend when it served an expired cache entry.
    #[serde(default)]
    pub stale: bool,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub info: FoodInfo,
    /// Whether the backend answered from its cache.
    pub cached: bool,
}
