//! Rule-based diet plan generation.
//!
//! A pure mapping from an intake form to a BMI figure, a category, a list of
//! guidelines, and a three-meal sample day. No I/O; handlers validate the
//! intake before calling in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodType {
    Veg,
    NonVeg,
    Vegan,
    LactoseIntolerant,
    GlutenFree,
    Keto,
    Paleo,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    LoseWeight,
    GainWeight,
    Maintain,
    PostSurgeryGuidance,
    ImprovePerformance,
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DietIntake {
    pub name: String,
    pub age: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub health_issues: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    pub food_type: FoodType,
    pub goal: Goal,
    #[serde(default)]
    pub extra_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Categorize a full-precision BMI value. Boundaries belong to the
    /// higher category: 18.5 is normal, 25.0 overweight, 30.0 obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MealSlot {
    pub meal: &'static str,
    pub ideas: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DietPlan {
    pub bmi: f64,
    pub bmi_category: &'static str,
    pub guidelines: Vec<&'static str>,
    pub sample_day: Vec<MealSlot>,
}

/// Compute BMI from height in centimeters and weight in kilograms.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the plan for a validated intake.
///
/// Guidelines are cumulative across food-type branches, then exactly one
/// goal branch is appended. The sample day always has Breakfast, Lunch and
/// Dinner with three ideas each; the second idea of a slot is substituted
/// for vegan and non-veg eaters.
pub fn generate_plan(intake: &DietIntake) -> DietPlan {
    let bmi = bmi(intake.height_cm, intake.weight_kg);
    let category = BmiCategory::from_bmi(bmi);

    let mut guidelines = Vec::new();
    if matches!(intake.food_type, FoodType::Veg | FoodType::Vegan) {
        guidelines.push("Prioritize legumes, tofu, nuts, seeds for protein.");
    }
    if intake.food_type == FoodType::NonVeg {
        guidelines.push("Lean proteins like chicken, fish, eggs; minimize fried foods.");
    }
    if intake.food_type == FoodType::LactoseIntolerant {
        guidelines.push("Use lactose-free dairy or fortified plant milks.");
    }
    match intake.goal {
        Goal::LoseWeight => guidelines.extend([
            "Aim for a 300-500 kcal deficit.",
            "High-volume, low-calorie foods (salads, soups).",
            "30-40 minutes of brisk walking or cardio, 5x/week.",
        ]),
        Goal::GainWeight => guidelines.extend([
            "300-400 kcal surplus with 1.6-2.2 g/kg protein.",
            "Strength training 3-4x/week.",
            "Add calorie-dense snacks (nut butters, trail mix).",
        ]),
        Goal::PostSurgeryGuidance => guidelines.extend([
            "Focus on soft, easily digestible foods as advised.",
            "Ensure adequate protein and vitamin C for healing.",
            "Hydrate well and follow medical guidance.",
        ]),
        _ => guidelines.push("Balanced plate: half veggies, quarter protein, quarter whole grains."),
    }

    let sample_day = vec![
        MealSlot {
            meal: "Breakfast",
            ideas: vec![
                "Oatmeal with chia and berries",
                if intake.food_type == FoodType::Vegan {
                    "Tofu scramble"
                } else {
                    "Veggie omelette"
                },
                "Smoothie with spinach, banana, and plant milk",
            ],
        },
        MealSlot {
            meal: "Lunch",
            ideas: vec![
                "Quinoa bowl with beans and veggies",
                if intake.food_type == FoodType::NonVeg {
                    "Grilled chicken salad"
                } else {
                    "Chickpea salad"
                },
                "Lentil soup with whole-grain toast",
            ],
        },
        MealSlot {
            meal: "Dinner",
            ideas: vec![
                "Stir-fry veggies with tofu/tempeh",
                if intake.food_type == FoodType::NonVeg {
                    "Baked fish with steamed veggies"
                } else {
                    "Rajma with brown rice"
                },
                "Vegetable khichdi or millet upma",
            ],
        },
    ];

    DietPlan {
        bmi: round_one_decimal(bmi),
        bmi_category: category.as_str(),
        guidelines,
        sample_day,
    }
}
