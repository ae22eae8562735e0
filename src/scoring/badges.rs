use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ScoringConfig;
use crate::store::models::{FoodEntry, User};

/// Static badge catalog. Unlock thresholds live in [`ScoringConfig`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const BADGE_CATALOG: &[BadgeSpec] = &[
    BadgeSpec {
        id: "gezonde_keuze",
        name: "Gezonde Keuze",
        description: "Eerste gezonde maaltijd gelogd",
    },
    BadgeSpec {
        id: "gezondheidsfreak",
        name: "Gezondheidsfreak",
        description: "5 gezonde maaltijden gelogd",
    },
    BadgeSpec {
        id: "variatie",
        name: "Variatie",
        description: "5 verschillende soorten voedsel gelogd",
    },
    BadgeSpec {
        id: "week_streak",
        name: "Week Streak",
        description: "7 dagen achter elkaar een maaltijd gelogd",
    },
    BadgeSpec {
        id: "voedingsdeskundige",
        name: "Voedingsdeskundige",
        description: "20 voedselitems gelogd",
    },
    BadgeSpec {
        id: "fotograaf",
        name: "Fotograaf",
        description: "5 foto's geüpload",
    },
    BadgeSpec {
        id: "level_5",
        name: "Level 5",
        description: "Level 5 bereikt",
    },
    BadgeSpec {
        id: "level_10",
        name: "Level 10",
        description: "Level 10 bereikt",
    },
    BadgeSpec {
        id: "quiz_kampioen",
        name: "Quiz Kampioen",
        description: "10 quizvragen goed beantwoord",
    },
];

/// Evaluates badge predicates against a user's full entry history (including
/// the entry just written). Held badges are always excluded, so re-running
/// the evaluation is a no-op.
pub struct BadgeEvaluator {
    cfg: Arc<ScoringConfig>,
}

impl BadgeEvaluator {
    pub fn new(cfg: Arc<ScoringConfig>) -> Self {
        Self { cfg }
    }

    /// `entries` must be the entries belonging to `user`, oldest first is
    /// not required. `user.points` and `user.streak_days` must already
    /// reflect the submission being evaluated.
    pub fn evaluate(&self, user: &User, entries: &[FoodEntry]) -> Vec<String> {
        let mut unlocked = Vec::new();
        let mut grant = |id: &str, condition: bool| {
            if condition && !user.badges.iter().any(|b| b == id) {
                unlocked.push(id.to_string());
            }
        };

        let healthy_count = entries
            .iter()
            .filter(|e| e.ai_analysis_result.ai_score >= self.cfg.healthy_score)
            .count();
        let distinct_foods: HashSet<String> = entries
            .iter()
            .map(|e| e.food_name.trim().to_lowercase())
            .collect();
        let photo_count = entries.iter().filter(|e| e.image_url.is_some()).count();
        let level = self.cfg.level_for(user.points);

        grant("gezonde_keuze", healthy_count >= 1);
        grant("gezondheidsfreak", healthy_count >= self.cfg.badge_healthy_entries);
        grant("variatie", distinct_foods.len() >= self.cfg.badge_distinct_foods);
        grant("week_streak", user.streak_days >= self.cfg.badge_streak_days);
        grant("voedingsdeskundige", entries.len() >= self.cfg.badge_total_entries);
        grant("fotograaf", photo_count >= self.cfg.badge_photo_entries);
        grant("level_5", level >= 5);
        grant("level_10", level >= 10);
        grant(
            "quiz_kampioen",
            user.quiz_correct_answers >= self.cfg.badge_quiz_correct,
        );

        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{
        AiAnalysis, MealType, NutritionInfo, NutritionSource, Role,
    };
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn evaluator() -> BadgeEvaluator {
        BadgeEvaluator::new(Arc::new(ScoringConfig::default()))
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "emma".into(),
            password_hash: "hash".into(),
            class_code: "klasA".into(),
            role: Role::Student,
            points: 0,
            level: 1,
            badges: vec![],
            streak_days: 0,
            last_entry_date: None,
            quiz_correct_answers: 0,
            food_history: vec![],
        }
    }

    fn entry(food: &str, score: u8, with_image: bool) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            food_name: food.into(),
            quantity: 100.0,
            meal_type: MealType::Snack,
            notes: None,
            timestamp: OffsetDateTime::now_utc(),
            image_url: with_image.then(|| "/uploads/x.jpg".into()),
            ai_analysis_result: AiAnalysis {
                ai_score: score,
                ai_feedback: String::new(),
                ai_suggestions: vec![],
                nutrition_info: NutritionInfo {
                    detected_food: food.into(),
                    source: NutritionSource::Fallback,
                    calories: 100,
                    protein: 0.0,
                    carbs: 0.0,
                    fat: 0.0,
                    fiber: 0.0,
                    sugars: 0.0,
                    salt: 0.0,
                    nutriscore: None,
                },
            },
            points_earned: 10,
        }
    }

    #[test]
    fn first_healthy_entry_unlocks_gezonde_keuze() {
        let unlocked = evaluator().evaluate(&user(), &[entry("appel", 8, false)]);
        assert_eq!(unlocked, vec!["gezonde_keuze"]);
    }

    #[test]
    fn held_badges_are_never_regranted() {
        let mut u = user();
        u.badges = vec!["gezonde_keuze".into()];
        let unlocked = evaluator().evaluate(&u, &[entry("appel", 8, false)]);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut u = user();
        let entries = vec![entry("appel", 8, false)];
        let first = evaluator().evaluate(&u, &entries);
        u.badges.extend(first.clone());
        let second = evaluator().evaluate(&u, &entries);
        assert_eq!(first, vec!["gezonde_keuze"]);
        assert!(second.is_empty());
    }

    #[test]
    fn variatie_fires_exactly_at_fifth_distinct_food() {
        let ev = evaluator();
        let mut u = user();
        let foods = ["appel", "banaan", "kaas", "melk", "wortel"];
        let mut entries = Vec::new();
        for (i, food) in foods.iter().enumerate() {
            entries.push(entry(food, 5, false));
            let unlocked = ev.evaluate(&u, &entries);
            if i < 4 {
                assert!(!unlocked.contains(&"variatie".to_string()), "too early at {i}");
            } else {
                assert!(unlocked.contains(&"variatie".to_string()));
            }
            u.badges.extend(unlocked);
        }
        // A sixth distinct food must not re-grant it.
        entries.push(entry("ei", 5, false));
        assert!(!ev.evaluate(&u, &entries).contains(&"variatie".to_string()));
    }

    #[test]
    fn duplicate_food_names_count_once_for_variety() {
        let entries: Vec<_> = (0..5).map(|_| entry("Appel", 5, false)).collect();
        let unlocked = evaluator().evaluate(&user(), &entries);
        assert!(!unlocked.contains(&"variatie".to_string()));
    }

    #[test]
    fn gezondheidsfreak_needs_five_healthy_entries() {
        let mut u = user();
        u.badges = vec!["gezonde_keuze".into()];
        let four: Vec<_> = (0..4).map(|i| entry(&format!("f{i}"), 9, false)).collect();
        assert!(!evaluator()
            .evaluate(&u, &four)
            .contains(&"gezondheidsfreak".to_string()));
        let five: Vec<_> = (0..5).map(|i| entry(&format!("f{i}"), 9, false)).collect();
        assert!(evaluator()
            .evaluate(&u, &five)
            .contains(&"gezondheidsfreak".to_string()));
    }

    #[test]
    fn streak_and_photo_badges() {
        let mut u = user();
        u.streak_days = 7;
        let entries: Vec<_> = (0..5).map(|i| entry(&format!("f{i}"), 5, true)).collect();
        let unlocked = evaluator().evaluate(&u, &entries);
        assert!(unlocked.contains(&"week_streak".to_string()));
        assert!(unlocked.contains(&"fotograaf".to_string()));
    }

    #[test]
    fn level_badges_follow_points() {
        let mut u = user();
        u.points = 450;
        let unlocked = evaluator().evaluate(&u, &[]);
        assert!(unlocked.contains(&"level_5".to_string()));
        assert!(!unlocked.contains(&"level_10".to_string()));

        u.points = 950;
        let unlocked = evaluator().evaluate(&u, &[]);
        assert!(unlocked.contains(&"level_10".to_string()));
    }

    #[test]
    fn quiz_kampioen_at_ten_cumulative_correct() {
        let mut u = user();
        u.quiz_correct_answers = 9;
        assert!(evaluator().evaluate(&u, &[]).is_empty());
        u.quiz_correct_answers = 10;
        assert_eq!(evaluator().evaluate(&u, &[]), vec!["quiz_kampioen"]);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for spec in BADGE_CATALOG {
            assert!(seen.insert(spec.id), "duplicate badge id {}", spec.id);
        }
    }
}
