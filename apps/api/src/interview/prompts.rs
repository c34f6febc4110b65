use crate::interview::grading::OPTIONS_PER_QUESTION;
use crate::models::assessment::QuestionResult;

/// Questions per generated quiz.
pub const QUIZ_LENGTH: usize = 10;

pub fn quiz_prompt(industry: &str, skills: &[String], topics: &[String]) -> String {
    let expertise = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };
    let focus = if topics.is_empty() {
        String::new()
    } else {
        format!("\nOnly ask about these topics: {}.", topics.join(", "))
    };
    format!(
        r#"Generate {QUIZ_LENGTH} technical interview questions for a {industry} professional{expertise}.{focus}

Each question should be multiple choice with {OPTIONS_PER_QUESTION} options.
The correct answer must be copied exactly from the options.

Respond in this JSON format:
{{
  "questions": [
    {{
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }}
  ]
}}"#
    )
}

pub fn improvement_tip_prompt(industry: &str, wrong: &[QuestionResult]) -> String {
    let mistakes = wrong
        .iter()
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect Answer: \"{}\"\nUser Answer: \"{}\"",
                r.question,
                r.correct_answer,
                r.user_answer.as_deref().unwrap_or("(no answer)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        r#"The user got the following {industry} technical interview questions wrong:

{mistakes}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by these wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes; focus on what to learn or practice."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_includes_topics_without_skills() {
        let prompt = quiz_prompt("Fintech", &[], &["Kafka".to_string()]);
        assert!(prompt.contains("for a Fintech professional."));
        assert!(prompt.contains("Only ask about these topics: Kafka."));
        assert!(prompt.contains("\"correctAnswer\""));
    }

    #[test]
    fn test_tip_prompt_lists_unanswered() {
        let wrong = [QuestionResult {
            question: "What is a mutex?".into(),
            correct_answer: "A lock".into(),
            user_answer: None,
            is_correct: false,
            explanation: String::new(),
        }];
        let prompt = improvement_tip_prompt("Software", &wrong);
        assert!(prompt.contains("User Answer: \"(no answer)\""));
    }
}
