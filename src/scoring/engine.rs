use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::nutrition::{clamp_score, NutritionFacts};
use crate::store::models::NutritionSource;

/// Result of one scoring pass. Frozen into the entry; never recomputed.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub ai_score: u8,
    pub points_earned: i64,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

/// Converts resolved nutrition facts into a 1-10 health score, a point
/// award, and readable feedback. All thresholds come from the injected
/// config.
pub struct ScoringEngine {
    cfg: Arc<ScoringConfig>,
}

impl ScoringEngine {
    pub fn new(cfg: Arc<ScoringConfig>) -> Self {
        Self { cfg }
    }

    pub fn score(&self, food_name: &str, facts: &NutritionFacts) -> ScoreOutcome {
        match facts.source {
            NutritionSource::Fallback => self.score_fallback(food_name),
            _ => self.score_resolved(food_name, facts),
        }
    }

    /// Nothing resolved: neutral score, an honest apology, and a nudge
    /// towards a better description. Entry creation is never blocked.
    fn score_fallback(&self, food_name: &str) -> ScoreOutcome {
        let ai_score = 5;
        ScoreOutcome {
            ai_score,
            points_earned: self.points_for(ai_score),
            feedback: format!(
                "Je hebt {food_name} gelogd. Kon geen gedetailleerde informatie vinden over {food_name}."
            ),
            suggestions: vec![
                "Probeer een specifiekere omschrijving of een foto te maken voor een betere analyse."
                    .to_string(),
            ],
        }
    }

    fn score_resolved(&self, food_name: &str, facts: &NutritionFacts) -> ScoreOutcome {
        // Rules run on the per-100g values so the score stays independent of
        // the logged quantity.
        let mut score = clamp_score(facts.health_score as i32) as i32;
        let mut feedback_parts: Vec<String> = Vec::new();
        let mut suggestions: Vec<String> = Vec::new();

        if let Some(grade) = &facts.nutriscore {
            feedback_parts.push(format!("Nutri-Score: {}", grade.to_uppercase()));
        }

        if facts.protein > 10.0 {
            feedback_parts.push("rijk aan eiwitten".into());
            if score < 8 {
                score += 1;
            }
        }

        if facts.fiber > 3.0 {
            feedback_parts.push("vezelrijk".into());
            if score < 9 {
                score += 1;
            }
        } else if facts.fiber < 1.0 {
            suggestions.push("Kies vaker voor volkoren producten voor meer vezels.".into());
        }

        if facts.sugars > 10.0 {
            feedback_parts.push("bevat veel suiker".into());
            suggestions.push("Kies vaker voor producten met minder toegevoegde suikers.".into());
            if score > 2 {
                score -= 1;
            }
        }

        if facts.salt > 0.3 {
            feedback_parts.push("bevat veel zout".into());
            suggestions
                .push("Let op je zoutinname, te veel zout is niet goed voor je bloeddruk.".into());
            if score > 2 {
                score -= 1;
            }
        }

        let ai_score = clamp_score(score);

        let mut feedback = if feedback_parts.is_empty() {
            format!("Je hebt {food_name} gelogd.")
        } else {
            format!("{food_name} is {}.", feedback_parts.join(", "))
        };

        if ai_score >= self.cfg.healthy_score {
            feedback.push_str(" Goede keuze!");
        } else if ai_score <= self.cfg.unhealthy_score {
            feedback.push_str(" Kijk uit, dit is een minder gezonde keuze.");
        }

        if suggestions.is_empty() {
            suggestions.push("Probeer gevarieerd te eten voor een uitgebalanceerd dieet.".into());
        }

        ScoreOutcome {
            ai_score,
            points_earned: self.points_for(ai_score),
            feedback,
            suggestions,
        }
    }

    /// Base award for logging plus a tier bonus, never negative in total.
    fn points_for(&self, ai_score: u8) -> i64 {
        let bonus = if ai_score >= self.cfg.healthy_score {
            self.cfg.bonus_healthy
        } else if ai_score <= self.cfg.unhealthy_score {
            self.cfg.bonus_unhealthy
        } else {
            self.cfg.bonus_neutral
        };
        (self.cfg.points_base + bonus).max(0)
    }
}
