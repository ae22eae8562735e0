use std::sync::Arc;

use axum::{extract::State, Json};
use rand::seq::SliceRandom;
use tracing::{info, instrument};

use super::dto::{SanitizedOption, SanitizedQuestion, SubmitRequest, SubmitResponse};
use super::services;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::scoring::BadgeEvaluator;
use crate::state::AppState;

const QUIZ_SIZE: usize = 5;

/// GET /quiz/questions: a random subset with the answer key stripped.
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn get_questions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SanitizedQuestion>>> {
    let mut questions = state.store.read().await.questions().await?.questions;
    questions.shuffle(&mut rand::thread_rng());
    questions.truncate(QUIZ_SIZE);

    let sanitized = questions
        .into_iter()
        .map(|q| SanitizedQuestion {
            id: q.id,
            question: q.question,
            options: q
                .options
                .into_iter()
                .map(|o| SanitizedOption {
                    id: o.id,
                    text: o.text,
                })
                .collect(),
        })
        .collect();
    Ok(Json(sanitized))
}

/// POST /quiz/submit: grade answers, award points, evaluate badges.
#[instrument(skip(state, body), fields(user_id = %auth.user_id))]
pub async fn submit_answers(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    if body.answers.is_empty() {
        return Err(ApiError::Validation("answers must not be empty".into()));
    }

    let scoring_cfg = Arc::new(state.config.scoring.clone());

    let txn = state.store.write().await;
    let questions = txn.questions().await?.questions;
    let mut users = txn.users().await?;
    let Some(user_idx) = users.iter().position(|u| u.id == auth.user_id) else {
        return Err(ApiError::NotFound("User not found".into()));
    };

    let summary = services::grade(
        &body.answers,
        &questions,
        scoring_cfg.points_per_correct_answer,
    );

    let entries = txn.entries().await?;
    let user_entries: Vec<_> = entries
        .into_iter()
        .filter(|e| e.user_id == auth.user_id)
        .collect();

    let user = &mut users[user_idx];
    user.points += summary.total_points;
    user.level = scoring_cfg.level_for(user.points);
    user.quiz_correct_answers += summary.correct_count;

    let new_badges = BadgeEvaluator::new(scoring_cfg).evaluate(user, &user_entries);
    user.badges.extend(new_badges.iter().cloned());
    let user_points = user.points;

    txn.save_users(&users).await?;

    info!(
        user_id = %auth.user_id,
        correct = summary.correct_count,
        points = summary.total_points,
        "quiz graded"
    );

    Ok(Json(SubmitResponse {
        total_points: summary.total_points,
        results: summary.results,
        new_badges,
        user_points,
    }))
}
