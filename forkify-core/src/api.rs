//! Client for the third-party recipe API.
//!
//! Two endpoints are used:
//! - `GET {base}/search?q={query}` returning `{"count": n, "recipes": [...]}`
//! - `GET {base}/get?rId={id}` returning `{"recipe": {...}}`

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::NetworkError;
use crate::http::HttpClient;

/// Minimal recipe record shown in search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Full recipe record as returned by the detail endpoint, before any parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    /// Ingredient lines exactly as the source wrote them.
    pub ingredients: Vec<String>,
    pub servings: Option<u32>,
    pub cooking_time: Option<u32>,
}

#[derive(Deserialize)]
struct SearchResponse {
    recipes: Vec<WireRecipe>,
}

#[derive(Deserialize)]
struct DetailResponse {
    recipe: WireRecipe,
}

#[derive(Deserialize)]
struct WireRecipe {
    #[serde(deserialize_with = "string_or_number")]
    recipe_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    servings: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    cooking_time: Option<u32>,
}

impl From<WireRecipe> for RecipeSummary {
    fn from(wire: WireRecipe) -> Self {
        Self {
            id: wire.recipe_id,
            title: wire.title,
            author: wire.publisher,
            img: wire.image_url,
        }
    }
}

impl From<WireRecipe> for RecipeDetail {
    fn from(wire: WireRecipe) -> Self {
        Self {
            id: wire.recipe_id,
            title: wire.title,
            author: wire.publisher,
            img: wire.image_url,
            url: wire.source_url,
            ingredients: wire.ingredients,
            servings: wire.servings,
            cooking_time: wire.cooking_time,
        }
    }
}

/// Ids are strings in the API but some mirrors send them as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Accept a positive integer, a numeric string, or anything else as absent.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Handle to the recipe API: a base URL plus the client used to reach it.
#[derive(Clone)]
pub struct RecipeApi {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl RecipeApi {
    pub fn new(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the search endpoint for `query`.
    pub fn search_url(&self, query: &str) -> Result<String, NetworkError> {
        self.endpoint("search", "q", query)
    }

    /// URL of the detail endpoint for recipe `id`.
    pub fn recipe_url(&self, id: &str) -> Result<String, NetworkError> {
        self.endpoint("get", "rId", id)
    }

    fn endpoint(&self, path: &str, param: &str, value: &str) -> Result<String, NetworkError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair(param, value);
        Ok(url.to_string())
    }

    /// Search for recipes matching `query`, in the order the API returns them.
    pub async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, NetworkError> {
        let url = self.search_url(query)?;
        let body = self.client.get_text(&url).await?;
        let response: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| NetworkError::Malformed(format!("search response: {}", e)))?;

        tracing::debug!(query, count = response.recipes.len(), "search results received");
        Ok(response.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    /// Fetch the full record for recipe `id`.
    pub async fn get_recipe(&self, id: &str) -> Result<RecipeDetail, NetworkError> {
        let url = self.recipe_url(id)?;
        let body = self.client.get_text(&url).await?;
        let response: DetailResponse = serde_json::from_str(&body)
            .map_err(|e| NetworkError::Malformed(format!("recipe response: {}", e)))?;

        Ok(response.recipe.into())
    }
}
