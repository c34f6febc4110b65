//! Scoring of submitted quiz answers. Pure functions, no I/O.

use crate::models::assessment::{QuestionResult, QuizQuestion};

/// Options every generated question must offer.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Pairs each question with the answer at the same index. Answers are compared
/// after trimming; an unanswered question is wrong.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<String>]) -> Vec<QuestionResult> {
    questions
        .iter()
        .zip(answers)
        .map(|(q, answer)| {
            let user_answer = answer
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string);
            QuestionResult {
                question: q.question.clone(),
                correct_answer: q.correct_answer.clone(),
                is_correct: user_answer.as_deref() == Some(q.correct_answer.trim()),
                user_answer,
                explanation: q.explanation.clone(),
            }
        })
        .collect()
}

/// Percentage of correct answers, rounded to one decimal. Zero for an empty quiz.
pub fn score(results: &[QuestionResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let correct = results.iter().filter(|r| r.is_correct).count();
    let pct = correct as f64 * 100.0 / results.len() as f64;
    (pct * 10.0).round() / 10.0
}

/// A generated question is usable only if it has the expected number of distinct
/// options and its answer is one of them.
pub fn is_well_formed(q: &QuizQuestion) -> bool {
    let mut options: Vec<&str> = q.options.iter().map(|o| o.trim()).collect();
    options.sort_unstable();
    options.dedup();
    !q.question.trim().is_empty()
        && options.len() == OPTIONS_PER_QUESTION
        && options.contains(&q.correct_answer.trim())
}
