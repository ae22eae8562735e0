use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{clamp_score, NutritionFacts, NutritionLookup};
use crate::config::NutritionConfig;
use crate::store::models::NutritionSource;

/// Open Food Facts search client. The request carries a bounded total
/// timeout; callers treat every failure as "no match".
pub struct OpenFoodFacts {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    nutriscore_grade: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(default, rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
    #[serde(default)]
    energy_100g: Option<f64>,
    #[serde(default)]
    proteins_100g: Option<f64>,
    #[serde(default)]
    fat_100g: Option<f64>,
    #[serde(default)]
    carbohydrates_100g: Option<f64>,
    #[serde(default)]
    fiber_100g: Option<f64>,
    #[serde(default)]
    sugars_100g: Option<f64>,
    #[serde(default)]
    salt_100g: Option<f64>,
}

impl OpenFoodFacts {
    pub fn new(cfg: &NutritionConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, food_name: &str) -> anyhow::Result<Option<NutritionFacts>> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", food_name),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Pick the best-ranked match: Nutri-Score grades order lexicographic
        // with "a" best; products without a grade sort as "e".
        let best = response
            .products
            .into_iter()
            .min_by_key(|p| grade_key(p.nutriscore_grade.as_deref()));
        let Some(best) = best else {
            debug!(food = food_name, "no products matched");
            return Ok(None);
        };

        Ok(Some(to_facts(best, food_name)))
    }
}

fn grade_key(grade: Option<&str>) -> String {
    grade
        .map(|g| g.to_lowercase())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| "e".into())
}

fn to_facts(product: Product, queried_name: &str) -> NutritionFacts {
    let n = product.nutriments;
    // Prefer kcal; fall back to kJ converted.
    let calories = n
        .energy_kcal_100g
        .or_else(|| n.energy_100g.map(|kj| kj / 4.184))
        .unwrap_or(0.0);
    let protein = n.proteins_100g.unwrap_or(0.0);
    let fat = n.fat_100g.unwrap_or(0.0);
    let carbs = n.carbohydrates_100g.unwrap_or(0.0);
    let fiber = n.fiber_100g.unwrap_or(0.0);
    let sugars = n.sugars_100g.unwrap_or(0.0);
    let salt = n.salt_100g.unwrap_or(0.0);

    // The product's own health rating on the per-100g numbers.
    let mut score: i32 = 5;
    if protein > 5.0 {
        score += 1;
    }
    if fiber > 3.0 {
        score += 1;
    }
    if sugars > 10.0 {
        score -= 1;
    }
    if salt > 0.5 {
        score -= 1;
    }
    if fat > 10.0 {
        score -= 1;
    }

    NutritionFacts {
        name: product
            .product_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| queried_name.to_string()),
        calories,
        protein,
        fat,
        carbs,
        fiber,
        sugars,
        salt,
        nutriscore: product.nutriscore_grade.map(|g| g.to_lowercase()),
        health_score: clamp_score(score),
        source: NutritionSource::ExternalLookup,
    }
}

#[async_trait]
impl NutritionLookup for OpenFoodFacts {
    async fn fetch(&self, food_name: &str) -> anyhow::Result<Option<NutritionFacts>> {
        self.search(food_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, grade: Option<&str>, protein: f64, sugars: f64) -> Product {
        Product {
            product_name: Some(name.into()),
            nutriscore_grade: grade.map(String::from),
            nutriments: Nutriments {
                energy_kcal_100g: Some(100.0),
                proteins_100g: Some(protein),
                sugars_100g: Some(sugars),
                ..Default::default()
            },
        }
    }

    #[test]
    fn missing_grade_ranks_worst() {
        assert_eq!(grade_key(Some("A")), "a");
        assert_eq!(grade_key(None), "e");
        assert_eq!(grade_key(Some("")), "e");
        assert!(grade_key(Some("b")) < grade_key(None));
    }

    #[test]
    fn derived_score_rewards_protein_and_punishes_sugar() {
        let facts = to_facts(product("kwark", Some("a"), 10.0, 3.0), "kwark");
        assert_eq!(facts.health_score, 6);
        let facts = to_facts(product("snoep", Some("e"), 0.0, 60.0), "snoep");
        assert_eq!(facts.health_score, 4);
    }

    #[test]
    fn derived_score_clamps_at_bounds() {
        let heavy = Product {
            product_name: Some("frituursnack".into()),
            nutriscore_grade: Some("e".into()),
            nutriments: Nutriments {
                energy_kcal_100g: Some(550.0),
                fat_100g: Some(35.0),
                sugars_100g: Some(40.0),
                salt_100g: Some(2.5),
                ..Default::default()
            },
        };
        let facts = to_facts(heavy, "frituursnack");
        assert_eq!(facts.health_score, 2);
    }

    #[test]
    fn kilojoules_convert_when_kcal_missing() {
        let p = Product {
            product_name: None,
            nutriscore_grade: None,
            nutriments: Nutriments {
                energy_100g: Some(418.4),
                ..Default::default()
            },
        };
        let facts = to_facts(p, "soep");
        assert!((facts.calories - 100.0).abs() < 0.01);
        assert_eq!(facts.name, "soep");
    }
}
