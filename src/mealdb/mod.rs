//! TheMealDB lookup client.
//!
//! Recipe search is best-effort: any transport, decoding or status failure
//! downgrades the response to an empty result list. Callers receive an
//! explicit [`RecipeLookup`] instead of an error so the degradation is
//! visible at the call site without ever reaching the HTTP surface.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Search results are capped at the first dozen meals the service returns.
pub const MAX_RESULTS: usize = 12;

/// Normalized recipe summary. Fields the upstream omits (filter.php has no
/// category or area) pass through as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
}

/// Outcome of a lookup. `Degraded` means the upstream call failed and the
/// caller should answer with an empty list rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeLookup {
    Results(Vec<RecipeSummary>),
    Degraded,
}

impl RecipeLookup {
    pub fn into_results(self) -> Vec<RecipeSummary> {
        match self {
            RecipeLookup::Results(results) => results,
            RecipeLookup::Degraded => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    // A query with no hits comes back as {"meals": null}.
    meals: Option<Vec<Meal>>,
}

#[derive(Debug, Deserialize)]
struct Meal {
    #[serde(rename = "idMeal")]
    id_meal: Option<String>,
    #[serde(rename = "strMeal")]
    str_meal: Option<String>,
    #[serde(rename = "strMealThumb")]
    str_meal_thumb: Option<String>,
    #[serde(rename = "strCategory")]
    str_category: Option<String>,
    #[serde(rename = "strArea")]
    str_area: Option<String>,
}

impl From<Meal> for RecipeSummary {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id_meal,
            title: meal.str_meal,
            thumbnail: meal.str_meal_thumb,
            category: meal.str_category,
            area: meal.str_area,
        }
    }
}

#[derive(Clone)]
pub struct MealDbClient {
    base_url: String,
    client: reqwest::Client,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build recipe lookup client")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// GET search.php?s={name} — full-text search by meal name.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<RecipeSummary>> {
        self.fetch("search.php", ("s", name)).await
    }

    /// GET filter.php?i={csv} — filter by comma-separated ingredients.
    pub async fn filter_by_ingredients(&self, csv: &str) -> Result<Vec<RecipeSummary>> {
        self.fetch("filter.php", ("i", csv)).await
    }

    /// Dispatch on the query shape and swallow upstream failures into
    /// [`RecipeLookup::Degraded`]. A request with neither a query nor
    /// ingredients yields empty results without any external call.
    pub async fn lookup(&self, query: Option<&str>, ingredients: &[String]) -> RecipeLookup {
        let outcome = match LookupPlan::for_request(query, ingredients) {
            LookupPlan::ByName(name) => self.search_by_name(&name).await,
            LookupPlan::ByIngredients(csv) => self.filter_by_ingredients(&csv).await,
            LookupPlan::Skip => return RecipeLookup::Results(Vec::new()),
        };

        match outcome {
            Ok(results) => RecipeLookup::Results(results),
            Err(e) => {
                warn!(error = %e, "Recipe lookup failed, degrading to empty results");
                RecipeLookup::Degraded
            }
        }
    }

    async fn fetch(&self, endpoint: &str, param: (&str, &str)) -> Result<Vec<RecipeSummary>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[param])
            .send()
            .await
            .context("Recipe lookup request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Recipe lookup returned {}", response.status());
        }

        let envelope: MealsEnvelope = response
            .json()
            .await
            .context("Failed to parse recipe lookup response")?;

        Ok(normalize(envelope.meals.unwrap_or_default()))
    }
}

/// Which upstream endpoint a request maps to. A non-empty query wins over
/// ingredients; with neither, no call is made at all.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LookupPlan {
    ByName(String),
    ByIngredients(String),
    Skip,
}

impl LookupPlan {
    fn for_request(query: Option<&str>, ingredients: &[String]) -> Self {
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            LookupPlan::ByName(query.to_string())
        } else if !ingredients.is_empty() {
            LookupPlan::ByIngredients(ingredients.join(","))
        } else {
            LookupPlan::Skip
        }
    }
}

fn normalize(meals: Vec<Meal>) -> Vec<RecipeSummary> {
    meals
        .into_iter()
        .take(MAX_RESULTS)
        .map(RecipeSummary::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal(n: usize) -> serde_json::Value {
        json!({
            "idMeal": format!("{n}"),
            "strMeal": format!("Meal {n}"),
            "strMealThumb": format!("https://example.com/{n}.jpg"),
            "strCategory": "Chicken",
            "strArea": "Indian",
            "strInstructions": "ignored extra field",
        })
    }

    #[test]
    fn test_normalize_drops_extra_fields() {
        let envelope: MealsEnvelope =
            serde_json::from_value(json!({"meals": [meal(1)]})).unwrap();
        let results = normalize(envelope.meals.unwrap());
        assert_eq!(
            results[0],
            RecipeSummary {
                id: Some("1".to_string()),
                title: Some("Meal 1".to_string()),
                thumbnail: Some("https://example.com/1.jpg".to_string()),
                category: Some("Chicken".to_string()),
                area: Some("Indian".to_string()),
            }
        );
    }

    #[test]
    fn test_normalize_truncates_to_twelve_preserving_order() {
        let meals: Vec<_> = (0..20).map(meal).collect();
        let envelope: MealsEnvelope =
            serde_json::from_value(json!({"meals": meals})).unwrap();
        let results = normalize(envelope.meals.unwrap());
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].id.as_deref(), Some("0"));
        assert_eq!(results[11].id.as_deref(), Some("11"));
    }

    #[test]
    fn test_null_meals_means_no_results() {
        let envelope: MealsEnvelope = serde_json::from_value(json!({"meals": null})).unwrap();
        assert!(normalize(envelope.meals.unwrap_or_default()).is_empty());
    }

    #[test]
    fn test_missing_fields_pass_through_as_null() {
        // filter.php responses omit category and area
        let envelope: MealsEnvelope = serde_json::from_value(json!({
            "meals": [{"idMeal": "7", "strMeal": "Korma", "strMealThumb": "t.jpg"}]
        }))
        .unwrap();
        let results = normalize(envelope.meals.unwrap());
        assert_eq!(results[0].category, None);
        assert_eq!(results[0].area, None);
        let wire = serde_json::to_value(&results[0]).unwrap();
        assert!(wire.get("category").unwrap().is_null());
    }

    #[tokio::test]
    async fn test_lookup_without_query_or_ingredients_skips_the_call() {
        // Unroutable base URL: if a request were made it would error and
        // degrade; an empty Results proves no call happened.
        let client =
            MealDbClient::new("http://127.0.0.1:0/api", Duration::from_millis(100)).unwrap();
        let lookup = client.lookup(None, &[]).await;
        assert_eq!(lookup, RecipeLookup::Results(Vec::new()));

        let lookup = client.lookup(Some(""), &[]).await;
        assert_eq!(lookup, RecipeLookup::Results(Vec::new()));
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades() {
        let client =
            MealDbClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        let lookup = client.lookup(Some("chicken"), &[]).await;
        assert_eq!(lookup, RecipeLookup::Degraded);
        assert!(lookup.into_results().is_empty());
    }

    #[tokio::test]
    async fn test_ingredient_lookup_failure_degrades() {
        let client =
            MealDbClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        let ingredients = vec!["chicken".to_string(), "rice".to_string()];
        let lookup = client.lookup(None, &ingredients).await;
        assert_eq!(lookup, RecipeLookup::Degraded);
    }

    #[test]
    fn test_lookup_plan_dispatch() {
        let ingredients = vec!["chicken".to_string(), "rice".to_string()];

        // ingredients alone hit the filter endpoint, comma-joined
        assert_eq!(
            LookupPlan::for_request(None, &ingredients),
            LookupPlan::ByIngredients("chicken,rice".to_string())
        );

        // a query wins over ingredients
        assert_eq!(
            LookupPlan::for_request(Some("korma"), &ingredients),
            LookupPlan::ByName("korma".to_string())
        );

        // an empty query falls through to ingredients
        assert_eq!(
            LookupPlan::for_request(Some(""), &ingredients),
            LookupPlan::ByIngredients("chicken,rice".to_string())
        );

        assert_eq!(LookupPlan::for_request(None, &[]), LookupPlan::Skip);
    }
}
