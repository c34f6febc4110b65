//! Cache key builders, one per cached resource.
//!
//! Read paths and invalidation paths both call these, so the two can never drift.
//! Shape: `<feature>:<ownerId>[:<discriminator>]`. Every user-scoped key embeds the
//! owner id; free-form inputs only ever appear as a fingerprint.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hex characters of the SHA-256 digest kept in a key (128 bits).
const FINGERPRINT_LEN: usize = 32;

/// Stable digest of one or more inputs.
///
/// Each part is length-prefixed, so `("ab", "c")` and `("a", "bc")` differ.
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FINGERPRINT_LEN);
    digest
}

/// Lowercases and replaces every non-alphanumeric run with a single `-`, so that
/// user-supplied labels cannot inject `:` separators or glob characters.
pub fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

// ── Resume ──────────────────────────────────────────────────────────────────

pub fn resume(user_id: Uuid) -> String {
    format!("resume:{user_id}")
}

pub fn resume_improve(user_id: Uuid, section: &str, current: &str) -> String {
    format!(
        "improve:{user_id}:{}:{}",
        slug(section),
        fingerprint(&[current])
    )
}

pub fn resume_analyze(user_id: Uuid, content: &str) -> String {
    format!("analyze:{user_id}:{}", fingerprint(&[content]))
}

pub fn resume_tailor(user_id: Uuid, resume_content: &str, job_description: &str) -> String {
    format!(
        "tailor:{user_id}:{}:{}",
        fingerprint(&[resume_content]),
        fingerprint(&[job_description])
    )
}

// ── Cover letters ───────────────────────────────────────────────────────────

pub fn cover_letters(user_id: Uuid) -> String {
    format!("coverLetters:{user_id}")
}

/// Scoped by owner as well as id: the read filters by owner, so an id-only key
/// would hand one user's cached row to another.
pub fn cover_letter(user_id: Uuid, cover_letter_id: Uuid) -> String {
    format!("coverLetter:{user_id}:{cover_letter_id}")
}

pub fn cover_letter_improve(user_id: Uuid, part: &str, current: &str) -> String {
    format!(
        "improve:coverLetter:{user_id}:{}:{}",
        slug(part),
        fingerprint(&[current])
    )
}

pub fn cover_letter_analyze(user_id: Uuid, content: &str) -> String {
    format!("analyze:coverLetter:{user_id}:{}", fingerprint(&[content]))
}

pub fn cover_letter_tailor(user_id: Uuid, letter_content: &str, job_description: &str) -> String {
    format!(
        "tailor:coverLetter:{user_id}:{}:{}",
        fingerprint(&[letter_content]),
        fingerprint(&[job_description])
    )
}

pub fn cover_letter_generate(
    user_id: Uuid,
    job_title: &str,
    company_name: &str,
    job_description: &str,
    resume_content: &str,
) -> String {
    format!(
        "generate:coverLetter:{user_id}:{}",
        fingerprint(&[job_title, company_name, job_description, resume_content])
    )
}

// ── Insights ────────────────────────────────────────────────────────────────

pub fn dashboard_insights(user_id: Uuid) -> String {
    format!("dashboard:insights:{user_id}")
}

/// Shared across users: industry insights are not personal data.
///
/// The slug keeps keys readable; the fingerprint of the trimmed label keeps
/// industries whose slugs coincide (`C++`, `C#`) apart.
pub fn industry_insights(industry: &str) -> String {
    let industry = industry.trim();
    format!(
        "insights:industry:{}:{}",
        slug(industry),
        fingerprint(&[industry])
    )
}

// ── Interview ───────────────────────────────────────────────────────────────

/// Quiz for a topic selection. Topic order does not matter.
pub fn interview_quiz(user_id: Uuid, topics: &[String]) -> String {
    let mut topics: Vec<String> = topics.iter().map(|t| t.trim().to_lowercase()).collect();
    topics.sort();
    topics.dedup();
    let parts: Vec<&str> = topics.iter().map(String::as_str).collect();
    format!("quiz:{user_id}:{}", fingerprint(&parts))
}

pub fn assessments(user_id: Uuid) -> String {
    format!("assessments:{user_id}")
}

// ── Patterns ────────────────────────────────────────────────────────────────

/// Globs covering every AI-derived entry for a user. Their prompts embed the
/// user's profile, so a profile change makes all of them stale.
pub fn user_ai_patterns(user_id: Uuid) -> Vec<String> {
    vec![
        format!("improve:{user_id}:*"),
        format!("analyze:{user_id}:*"),
        format!("tailor:{user_id}:*"),
        format!("improve:coverLetter:{user_id}:*"),
        format!("analyze:coverLetter:{user_id}:*"),
        format!("tailor:coverLetter:{user_id}:*"),
        format!("generate:coverLetter:{user_id}:*"),
        format!("quiz:{user_id}:*"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint(&["hello"]), fingerprint(&["hello"]));
        assert_eq!(fingerprint(&["hello"]).len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_is_length_prefixed() {
        assert_ne!(fingerprint(&["ab", "c"]), fingerprint(&["a", "bc"]));
    }

    #[test]
    fn test_shared_prefix_inputs_get_distinct_keys() {
        // The first 15 bytes (20 base64 chars) are identical.
        let a = "Led a team of five engineers to ship the billing service";
        let b = "Led a team of five engineers to migrate the data warehouse";
        assert_ne!(
            resume_improve(uid(1), "experience", a),
            resume_improve(uid(1), "experience", b)
        );
        assert_ne!(resume_analyze(uid(1), a), resume_analyze(uid(1), b));
    }

    #[test]
    fn test_user_scoped_keys_embed_owner() {
        let user = uid(42);
        let letter = uid(7);
        let owner = user.to_string();
        for key in [
            resume(user),
            resume_improve(user, "summary", "x"),
            resume_analyze(user, "x"),
            resume_tailor(user, "x", "y"),
            cover_letters(user),
            cover_letter(user, letter),
            cover_letter_improve(user, "body", "x"),
            cover_letter_analyze(user, "x"),
            cover_letter_tailor(user, "x", "y"),
            cover_letter_generate(user, "t", "c", "j", "r"),
            dashboard_insights(user),
            interview_quiz(user, &[]),
            assessments(user),
        ] {
            assert!(key.contains(&owner), "{key} is missing the owner id");
        }
    }

    #[test]
    fn test_same_input_different_users_never_collide() {
        assert_ne!(resume(uid(1)), resume(uid(2)));
        assert_ne!(
            cover_letter(uid(1), uid(9)),
            cover_letter(uid(2), uid(9))
        );
        assert_ne!(
            cover_letter_generate(uid(1), "t", "c", "j", ""),
            cover_letter_generate(uid(2), "t", "c", "j", "")
        );
    }

    #[test]
    fn test_generate_key_tracks_resume_content() {
        assert_ne!(
            cover_letter_generate(uid(1), "t", "c", "j", "resume v1"),
            cover_letter_generate(uid(1), "t", "c", "j", "resume v2")
        );
    }

    #[test]
    fn test_tailor_inputs_are_independent() {
        assert_ne!(
            cover_letter_tailor(uid(1), "letter", "job"),
            cover_letter_tailor(uid(1), "job", "letter")
        );
    }

    #[test]
    fn test_slug_strips_separators_and_globs() {
        assert_eq!(slug("  Software Engineering "), "software-engineering");
        assert_eq!(slug("tech:*finance?"), "tech-finance");
        assert!(industry_insights("Tech / AI").starts_with("insights:industry:tech-ai:"));
    }

    #[test]
    fn test_industries_with_equal_slugs_get_distinct_keys() {
        assert_eq!(slug("C++"), slug("C#"));
        assert_ne!(industry_insights("C++"), industry_insights("C#"));
        assert_ne!(industry_insights("Tech / AI"), industry_insights("tech-ai"));
        assert_eq!(industry_insights(" Fintech "), industry_insights("Fintech"));
    }

    #[test]
    fn test_key_shapes() {
        let user = uid(3);
        assert_eq!(resume(user), format!("resume:{user}"));
        assert_eq!(dashboard_insights(user), format!("dashboard:insights:{user}"));
        assert!(resume_improve(user, "Summary", "x").starts_with(&format!("improve:{user}:summary:")));
        assert!(cover_letter_improve(user, "body", "x")
            .starts_with(&format!("improve:coverLetter:{user}:body:")));
    }

    #[test]
    fn test_quiz_key_ignores_topic_order_and_case() {
        let user = uid(4);
        let a = vec!["Rust".to_string(), "SQL".to_string()];
        let b = vec!["sql".to_string(), " rust ".to_string()];
        assert_eq!(interview_quiz(user, &a), interview_quiz(user, &b));
        assert_ne!(interview_quiz(user, &a), interview_quiz(user, &[]));
        assert!(interview_quiz(user, &a).starts_with(&format!("quiz:{user}:")));
    }

    #[test]
    fn test_user_patterns_do_not_cross_feature_namespaces() {
        let user = uid(5);
        let patterns = user_ai_patterns(user);
        assert!(patterns.contains(&format!("improve:{user}:*")));
        assert!(patterns.contains(&format!("generate:coverLetter:{user}:*")));
        assert!(!patterns.iter().any(|p| p.starts_with("resume:")));
        assert!(!patterns.iter().any(|p| p.starts_with("coverLetters:")));
        assert!(!patterns.iter().any(|p| p.starts_with("assessments:")));
    }
}
