//! Nutrition resolution: external lookup, local table, fixed fallback.

mod local_db;
mod openfoodfacts;
mod resolver;

pub use openfoodfacts::OpenFoodFacts;
pub use resolver::NutritionResolver;

use async_trait::async_trait;

use crate::store::models::{NutritionInfo, NutritionSource};

/// External nutrition source. Object-safe so tests can inject fakes.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn fetch(&self, food_name: &str) -> anyhow::Result<Option<NutritionFacts>>;
}

/// Nutrition values on a per-100g basis, before scaling to the logged
/// quantity. The health score is a property of the food itself and is never
/// scaled.
#[derive(Debug, Clone)]
pub struct NutritionFacts {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub salt: f64,
    pub nutriscore: Option<String>,
    pub health_score: u8,
    pub source: NutritionSource,
}

impl NutritionFacts {
    /// Fixed estimate used when nothing resolves. Resolution is best-effort
    /// and never fails the request.
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calories: 150.0,
            protein: 2.0,
            fat: 5.0,
            carbs: 25.0,
            fiber: 1.0,
            sugars: 5.0,
            salt: 0.3,
            nutriscore: None,
            health_score: 5,
            source: NutritionSource::Fallback,
        }
    }

    /// Scale linearly from the per-100g basis to the logged quantity.
    /// Calories round to whole numbers, macro grams to 1 decimal, salt to 3.
    pub fn scale(&self, detected_food: &str, quantity: f64) -> NutritionInfo {
        let m = quantity / 100.0;
        NutritionInfo {
            detected_food: detected_food.to_string(),
            source: self.source,
            calories: (self.calories * m).round() as i64,
            protein: round_to(self.protein * m, 1),
            carbs: round_to(self.carbs * m, 1),
            fat: round_to(self.fat * m, 1),
            fiber: round_to(self.fiber * m, 1),
            sugars: round_to(self.sugars * m, 1),
            salt: round_to(self.salt * m, 3),
            nutriscore: self.nutriscore.clone(),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub(crate) fn clamp_score(score: i32) -> u8 {
    score.clamp(1, 10) as u8
}
