use crate::error::SourceError;
use crate::model::{MealRecord, Recipe, RecipeSummary};
use crate::source::RecipeSource;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Client for the TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client for the public catalog
    pub fn new(timeout: Option<Duration>) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against a custom endpoint (proxies, mirrors, tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SourceError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; MealFinder/0.1)")
            .build()
            .map_err(|e| SourceError::SourceUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and return the `meals` field of the JSON body
    async fn fetch_meals(&self, endpoint: &str, param: (&str, &str)) -> Result<Value, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {}={}", url, param.0, param.1);

        let response = self.client.get(&url).query(&[param]).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        let text = response.text().await?;
        let mut body: Value = serde_json::from_str(&text)
            .map_err(|e| SourceError::MalformedResponse(format!("Invalid JSON: {}", e)))?;
        Ok(body
            .get_mut("meals")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeSummary>, SourceError> {
        let meals = self.fetch_meals("search.php", ("s", term.trim())).await?;
        if !meals.is_array() {
            return Err(SourceError::MalformedResponse(
                "Failed to fetch meals".to_string(),
            ));
        }

        let summaries: Vec<RecipeSummary> = serde_json::from_value(meals)
            .map_err(|e| SourceError::MalformedResponse(format!("Invalid meal record: {}", e)))?;
        debug!("Search '{}' returned {} meal(s)", term, summaries.len());
        Ok(summaries)
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Recipe, SourceError> {
        let meals = self.fetch_meals("lookup.php", ("i", id)).await?;
        let first = match meals {
            Value::Array(mut records) if !records.is_empty() => records.swap_remove(0),
            _ => return Err(SourceError::NotFound(id.to_string())),
        };

        let record: MealRecord = serde_json::from_value(first)
            .map_err(|e| SourceError::MalformedResponse(format!("Invalid meal record: {}", e)))?;
        Ok(record.into())
    }
}
