use super::dto::{AnswerResult, AnswerSubmission};
use crate::store::models::QuizQuestion;

pub struct GradeSummary {
    pub total_points: i64,
    pub correct_count: u32,
    pub results: Vec<AnswerResult>,
}

/// Grades submitted answers against the question catalog. Unknown question
/// ids are skipped; an answer is correct iff the chosen option carries the
/// correct flag. Questions without an explicit point value award
/// `default_points`.
pub fn grade(
    answers: &[AnswerSubmission],
    questions: &[QuizQuestion],
    default_points: i64,
) -> GradeSummary {
    let mut total_points = 0;
    let mut correct_count = 0;
    let mut results = Vec::with_capacity(answers.len());

    for answer in answers {
        let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };

        let selected = question.options.iter().find(|o| o.id == answer.option_id);
        let is_correct = selected.map(|o| o.correct).unwrap_or(false);
        if is_correct {
            total_points += question.points.unwrap_or(default_points);
            correct_count += 1;
        }

        results.push(AnswerResult {
            question_id: question.id.clone(),
            question: question.question.clone(),
            selected_option: selected.map(|o| o.text.clone()),
            is_correct,
            correct_answer: question
                .options
                .iter()
                .find(|o| o.correct)
                .map(|o| o.text.clone()),
            explanation: question.explanation.clone(),
        });
    }

    GradeSummary {
        total_points,
        correct_count,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::QuizOption;

    fn question(id: &str, correct_option: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            question: format!("Vraag {id}?"),
            options: vec![
                QuizOption {
                    id: "a".into(),
                    text: "Antwoord A".into(),
                    correct: correct_option == "a",
                },
                QuizOption {
                    id: "b".into(),
                    text: "Antwoord B".into(),
                    correct: correct_option == "b",
                },
            ],
            points: None,
            explanation: Some("Omdat het zo is.".into()),
        }
    }

    fn answer(question_id: &str, option_id: &str) -> AnswerSubmission {
        AnswerSubmission {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }

    #[test]
    fn three_correct_of_five_scores_thirty() {
        let questions: Vec<QuizQuestion> =
            (1..=5).map(|i| question(&i.to_string(), "a")).collect();
        let answers = vec![
            answer("1", "a"),
            answer("2", "a"),
            answer("3", "a"),
            answer("4", "b"),
            answer("5", "b"),
        ];
        let summary = grade(&answers, &questions, 10);
        assert_eq!(summary.total_points, 30);
        assert_eq!(summary.correct_count, 3);
        let flags: Vec<bool> = summary.results.iter().map(|r| r.is_correct).collect();
        assert_eq!(flags, vec![true, true, true, false, false]);
    }

    #[test]
    fn per_question_points_override_the_default() {
        let mut q = question("1", "b");
        q.points = Some(25);
        let summary = grade(&[answer("1", "b")], &[q], 10);
        assert_eq!(summary.total_points, 25);
    }

    #[test]
    fn unknown_questions_and_options_score_nothing() {
        let questions = vec![question("1", "a")];
        let summary = grade(
            &[answer("99", "a"), answer("1", "zzz")],
            &questions,
            10,
        );
        assert_eq!(summary.total_points, 0);
        // The unknown question is skipped entirely; the unknown option is
        // reported as incorrect.
        assert_eq!(summary.results.len(), 1);
        assert!(!summary.results[0].is_correct);
        assert!(summary.results[0].selected_option.is_none());
    }

    #[test]
    fn results_carry_the_answer_key() {
        let summary = grade(&[answer("1", "b")], &[question("1", "a")], 10);
        let result = &summary.results[0];
        assert_eq!(result.correct_answer.as_deref(), Some("Antwoord A"));
        assert_eq!(result.selected_option.as_deref(), Some("Antwoord B"));
        assert_eq!(result.explanation.as_deref(), Some("Omdat het zo is."));
    }
}
