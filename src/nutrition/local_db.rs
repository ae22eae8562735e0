//! Small static food table used when the external lookup yields nothing.
//! Values are per 100g. Keys are lowercase Dutch food names.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::NutritionFacts;
use crate::store::models::NutritionSource;

struct LocalFood {
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    fiber: f64,
    sugars: f64,
    salt: f64,
    nutriscore: &'static str,
    health_score: u8,
}

const fn food(
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    fiber: f64,
    sugars: f64,
    salt: f64,
    nutriscore: &'static str,
    health_score: u8,
) -> LocalFood {
    LocalFood {
        calories,
        protein,
        fat,
        carbs,
        fiber,
        sugars,
        salt,
        nutriscore,
        health_score,
    }
}

lazy_static! {
    static ref LOCAL_FOODS: HashMap<&'static str, LocalFood> = {
        let mut m = HashMap::new();
        m.insert("banaan", food(89.0, 1.1, 0.3, 22.8, 2.6, 12.2, 0.0, "a", 8));
        m.insert("sinaasappel", food(47.0, 0.9, 0.1, 11.8, 2.4, 9.4, 0.0, "a", 8));
        m.insert("wortel", food(41.0, 0.9, 0.2, 9.6, 2.8, 4.7, 0.07, "a", 9));
        m.insert("komkommer", food(15.0, 0.7, 0.1, 3.6, 0.5, 1.7, 0.0, "a", 9));
        m.insert("salade", food(17.0, 1.2, 0.2, 3.3, 2.1, 1.2, 0.01, "a", 9));
        m.insert("yoghurt", food(61.0, 3.5, 3.3, 4.7, 0.0, 4.7, 0.1, "b", 7));
        m.insert("melk", food(64.0, 3.4, 3.6, 4.8, 0.0, 5.1, 0.1, "b", 6));
        m.insert("ei", food(155.0, 13.0, 11.0, 1.1, 0.0, 1.1, 0.3, "b", 7));
        m.insert("kipfilet", food(165.0, 31.0, 3.6, 0.0, 0.0, 0.0, 0.1, "a", 8));
        m.insert("boterham", food(265.0, 9.0, 3.2, 49.0, 2.7, 5.0, 1.2, "c", 5));
        m.insert("kaas", food(402.0, 25.0, 33.0, 1.3, 0.0, 0.5, 1.8, "d", 4));
        m.insert("pizza", food(266.0, 11.0, 10.0, 33.0, 2.3, 3.6, 1.5, "d", 3));
        m.insert("patat", food(312.0, 3.4, 15.0, 41.0, 3.8, 0.3, 0.6, "d", 3));
        m.insert("friet", food(312.0, 3.4, 15.0, 41.0, 3.8, 0.3, 0.6, "d", 3));
        m.insert("chocolade", food(546.0, 4.9, 31.0, 61.0, 7.0, 48.0, 0.02, "e", 2));
        m.insert("snoep", food(394.0, 0.0, 0.2, 98.0, 0.0, 76.0, 0.01, "e", 1));
        m.insert("cola", food(42.0, 0.0, 0.0, 10.6, 0.0, 10.6, 0.01, "e", 2));
        m
    };
}

pub fn lookup(name: &str) -> Option<NutritionFacts> {
    let key = name.trim().to_lowercase();
    LOCAL_FOODS.get(key.as_str()).map(|f| NutritionFacts {
        name: key.clone(),
        calories: f.calories,
        protein: f.protein,
        fat: f.fat,
        carbs: f.carbs,
        fiber: f.fiber,
        sugars: f.sugars,
        salt: f.salt,
        nutriscore: Some(f.nutriscore.to_string()),
        health_score: f.health_score,
        source: NutritionSource::LocalDatabase,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("Wortel").is_some());
        assert!(lookup("  BANAAN ").is_some());
        assert!(lookup("ruimteschip").is_none());
    }

    #[test]
    fn entries_carry_local_source_and_valid_scores() {
        for key in ["banaan", "kaas", "snoep"] {
            let facts = lookup(key).unwrap();
            assert_eq!(facts.source, NutritionSource::LocalDatabase);
            assert!((1..=10).contains(&facts.health_score));
        }
    }
}
