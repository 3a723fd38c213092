//! Recipe search endpoint.
//!
//! A thin proxy over TheMealDB. Upstream failures never surface here: the
//! lookup degrades to an empty result list and the route answers 200.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::mealdb::RecipeSummary;
use crate::store::RECIPE_SEARCHES;
use crate::AppState;

/// Dietary filter accepted on searches. Not forwarded upstream (TheMealDB
/// has no such filter); recorded alongside the query when persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchFoodType {
    Veg,
    NonVeg,
    Vegan,
    LactoseIntolerant,
    GlutenFree,
    Keto,
    Paleo,
    #[default]
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    /// Defaults to `any` when omitted; an explicit null stays null.
    #[serde(default = "default_food_type")]
    pub food_type: Option<SearchFoodType>,
    #[serde(default)]
    pub user_email: Option<String>,
}

fn default_food_type() -> Option<SearchFoodType> {
    Some(SearchFoodType::Any)
}

#[derive(Debug, Serialize)]
pub struct RecipeSearchResponse {
    pub results: Vec<RecipeSummary>,
}

/// Search recipes by name or by ingredient list
///
/// POST /recipes/search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecipeSearchRequest>,
) -> Json<RecipeSearchResponse> {
    let lookup = state
        .recipes
        .lookup(
            request.query.as_deref(),
            request.ingredients.as_deref().unwrap_or(&[]),
        )
        .await;

    // Record the search for known users whether or not the lookup
    // succeeded. Fire-and-forget: a failed insert only logs.
    if request.user_email.is_some() {
        if let Some(store) = &state.store {
            match serde_json::to_value(&request) {
                Ok(document) => {
                    if let Err(e) = store.insert(RECIPE_SEARCHES, document).await {
                        warn!(error = %e, "Failed to record recipe search");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to serialize recipe search"),
            }
        }
    }

    Json(RecipeSearchResponse {
        results: lookup.into_results(),
    })
}
