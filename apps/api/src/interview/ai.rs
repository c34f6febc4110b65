//! AI operations for mock interviews.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::interview::grading::is_well_formed;
use crate::interview::prompts;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, WRITER_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::assessment::{QuestionResult, QuizQuestion};
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Drops malformed questions. A quiz with none left is an LLM failure.
    fn validated(self) -> Result<Self, LlmError> {
        let total = self.questions.len();
        let questions: Vec<QuizQuestion> =
            self.questions.into_iter().filter(is_well_formed).collect();
        if questions.len() < total {
            warn!("Dropped {} malformed quiz questions", total - questions.len());
        }
        if questions.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(Self { questions })
    }
}

/// A quiz for the user's industry and skills, optionally narrowed to `topics`.
/// Cached briefly so a reload does not pay for a new generation.
pub async fn generate_quiz(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    topics: &[String],
) -> Result<Quiz, AppError> {
    let key = keys::interview_quiz(user.id, topics);
    cache
        .get_or_compute(&key, TtlTier::Short, || async {
            let prompt = prompts::quiz_prompt(user.industry_label(), &user.skills, topics);
            let quiz = llm.call_json::<Quiz>(&prompt, JSON_ONLY_SYSTEM).await?;
            Ok::<_, AppError>(quiz.validated()?)
        })
        .await
}

/// One or two sentences on what to practise, based on the wrong answers.
///
/// Optional: `None` when everything was right, no client is configured, or the
/// call fails. A failed tip never fails the submission.
pub async fn improvement_tip(
    llm: Option<&LlmClient>,
    user: &User,
    results: &[QuestionResult],
) -> Option<String> {
    let wrong: Vec<QuestionResult> = results.iter().filter(|r| !r.is_correct).cloned().collect();
    if wrong.is_empty() {
        return None;
    }
    let llm = llm?;
    let prompt = prompts::improvement_tip_prompt(user.industry_label(), &wrong);
    match llm.complete_text(&prompt, WRITER_SYSTEM).await {
        Ok(tip) => Some(tip),
        Err(e) => {
            warn!("Improvement tip generation failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Which one?".into(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.into(),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_validated_drops_malformed_questions() {
        let quiz = Quiz {
            questions: vec![question("A"), question("Z"), question("D")],
        };
        let quiz = quiz.validated().unwrap();
        assert_eq!(quiz.questions.len(), 2);
    }

    #[test]
    fn test_quiz_with_no_usable_question_is_an_error() {
        let quiz = Quiz {
            questions: vec![question("Z")],
        };
        assert!(matches!(quiz.validated(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_quiz_parses_model_json() {
        let raw = r#"{"questions":[{"question":"q","options":["a","b","c","d"],"correctAnswer":"b","explanation":"e"}]}"#;
        let quiz: Quiz = serde_json::from_str(raw).unwrap();
        assert_eq!(quiz.questions[0].correct_answer, "b");
    }

    #[tokio::test]
    async fn test_no_tip_without_wrong_answers_or_client() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::from_u128(1),
            "external_id": "ext",
            "email": "a@example.com",
            "industry": "Software",
            "experience": 3,
            "bio": null,
            "skills": [],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let right = QuestionResult {
            question: "q".into(),
            correct_answer: "A".into(),
            user_answer: Some("A".into()),
            is_correct: true,
            explanation: String::new(),
        };
        let wrong = QuestionResult {
            is_correct: false,
            user_answer: Some("B".into()),
            ..right.clone()
        };

        let client = LlmClient::new("sk-test".to_string()).unwrap();
        assert_eq!(improvement_tip(Some(&client), &user, &[right]).await, None);
        assert_eq!(improvement_tip(None, &user, &[wrong]).await, None);
    }
}
