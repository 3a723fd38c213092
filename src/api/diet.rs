//! Diet plan endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_age, validate_positive};
use crate::diet::{generate_plan, DietIntake, DietPlan};
use crate::AppState;

/// Generate a rule-based diet plan
///
/// POST /diet/plan
///
/// Enum fields (food_type, goal) are enforced during JSON extraction;
/// numeric ranges are checked here. The generator itself cannot fail.
pub async fn diet_plan(
    State(_state): State<Arc<AppState>>,
    Json(intake): Json<DietIntake>,
) -> Result<Json<DietPlan>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_age(intake.age) {
        errors.add("age", e);
    }
    if let Err(e) = validate_positive(intake.height_cm, "height_cm") {
        errors.add("height_cm", e);
    }
    if let Err(e) = validate_positive(intake.weight_kg, "weight_kg") {
        errors.add("weight_kg", e);
    }
    errors.finish()?;

    let plan = generate_plan(&intake);
    debug!(bmi = plan.bmi, category = plan.bmi_category, "Plan generated");

    Ok(Json(plan))
}
