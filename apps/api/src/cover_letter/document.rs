//! Structured view of a markdown cover letter.
//!
//! Generated letters are split into named sections once, and edits (AI tailoring,
//! accepted suggestions) replace a section by key. Nothing pattern-matches prose
//! after parsing.

use serde::{Deserialize, Serialize};

/// Sections in document order. `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Title,
    /// Sender/recipient block and date above the salutation.
    Header,
    Salutation,
    Introduction,
    Body,
    Closing,
    SignOff,
}

impl SectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Title => "title",
            SectionKey::Header => "header",
            SectionKey::Salutation => "salutation",
            SectionKey::Introduction => "introduction",
            SectionKey::Body => "body",
            SectionKey::Closing => "closing",
            SectionKey::SignOff => "sign_off",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: SectionKey,
    pub text: String,
}

/// Invariant: at most one section per key, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterDocument {
    sections: Vec<Section>,
}

const SALUTATIONS: &[&str] = &["dear ", "to whom", "hello", "hi ", "greetings"];
const SIGN_OFFS: &[&str] = &[
    "sincerely",
    "yours sincerely",
    "yours truly",
    "best regards",
    "kind regards",
    "warm regards",
    "regards",
    "best,",
    "respectfully",
    "with gratitude",
    "thank you,",
];

impl CoverLetterDocument {
    pub fn parse(markdown: &str) -> Self {
        let mut paragraphs = split_paragraphs(markdown);
        let mut doc = Self::default();

        if paragraphs.first().is_some_and(|p| p.starts_with('#')) {
            doc.set(SectionKey::Title, paragraphs.remove(0));
        }

        if let Some(pos) = paragraphs.iter().position(|p| starts_with_any(p, SALUTATIONS)) {
            let mut rest = paragraphs.split_off(pos);
            if !paragraphs.is_empty() {
                doc.set(SectionKey::Header, paragraphs.join("\n\n"));
            }
            let salutation = rest.remove(0);
            let (greeting, remainder) = split_first_line(&salutation);
            doc.set(SectionKey::Salutation, greeting);
            if let Some(remainder) = remainder {
                rest.insert(0, remainder);
            }
            paragraphs = rest;
        }

        if let Some(last) = paragraphs.pop() {
            match sign_off_line(&last) {
                Some(0) => doc.set(SectionKey::SignOff, last),
                Some(i) => {
                    let lines: Vec<&str> = last.lines().collect();
                    paragraphs.push(lines[..i].join("\n"));
                    doc.set(SectionKey::SignOff, lines[i..].join("\n"));
                }
                None => paragraphs.push(last),
            }
        }

        match paragraphs.len() {
            0 => {}
            1 => doc.set(SectionKey::Introduction, paragraphs.remove(0)),
            n => {
                let closing = paragraphs.remove(n - 1);
                let introduction = paragraphs.remove(0);
                doc.set(SectionKey::Introduction, introduction);
                if !paragraphs.is_empty() {
                    doc.set(SectionKey::Body, paragraphs.join("\n\n"));
                }
                doc.set(SectionKey::Closing, closing);
            }
        }

        doc
    }

    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.sections
            .binary_search_by_key(&key, |s| s.key)
            .ok()
            .map(|i| self.sections[i].text.as_str())
    }

    /// Replaces the section at `key`, or inserts it in document order.
    /// Blank text removes the section.
    pub fn set(&mut self, key: SectionKey, text: impl Into<String>) {
        let text = text.into().trim().to_string();
        match self.sections.binary_search_by_key(&key, |s| s.key) {
            Ok(i) if text.is_empty() => {
                self.sections.remove(i);
            }
            Ok(i) => self.sections[i].text = text,
            Err(_) if text.is_empty() => {}
            Err(i) => self.sections.insert(i, Section { key, text }),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn split_paragraphs(markdown: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in markdown.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }
    paragraphs
}

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    let lower = text.trim_start_matches(['*', '_']).to_lowercase();
    prefixes.iter().any(|p| lower.starts_with(p))
}

fn split_first_line(paragraph: &str) -> (String, Option<String>) {
    match paragraph.split_once('\n') {
        Some((first, rest)) if !rest.trim().is_empty() => {
            (first.to_string(), Some(rest.trim().to_string()))
        }
        _ => (paragraph.to_string(), None),
    }
}

/// Index of the first line of `paragraph` that opens a sign-off, if any.
fn sign_off_line(paragraph: &str) -> Option<usize> {
    paragraph
        .lines()
        .position(|line| line.len() <= 40 && starts_with_any(line, SIGN_OFFS))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: &str = "# Application for Backend Engineer

Jane Doe
jane@example.com

Dear Hiring Manager,

I am excited to apply for the Backend Engineer role at Acme.

At Globex I led the migration of our billing service to Rust.

I also mentor two junior engineers.

I would welcome the chance to discuss how I can help Acme.

Sincerely,
Jane Doe
";

    #[test]
    fn test_parse_full_letter() {
        let doc = CoverLetterDocument::parse(LETTER);
        let keys: Vec<SectionKey> = doc.sections().iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                SectionKey::Title,
                SectionKey::Header,
                SectionKey::Salutation,
                SectionKey::Introduction,
                SectionKey::Body,
                SectionKey::Closing,
                SectionKey::SignOff,
            ]
        );
        assert_eq!(doc.get(SectionKey::Salutation), Some("Dear Hiring Manager,"));
        assert_eq!(
            doc.get(SectionKey::Body),
            Some("At Globex I led the migration of our billing service to Rust.\n\nI also mentor two junior engineers.")
        );
        assert_eq!(doc.get(SectionKey::SignOff), Some("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_render_round_trips() {
        let doc = CoverLetterDocument::parse(LETTER);
        assert_eq!(CoverLetterDocument::parse(&doc.render()), doc);
        assert_eq!(doc.render(), LETTER.trim_end());
    }

    #[test]
    fn test_set_replaces_only_target_section() {
        let mut doc = CoverLetterDocument::parse(LETTER);
        doc.set(SectionKey::Closing, "Let's talk soon.");
        let rendered = doc.render();
        assert!(rendered.contains("Let's talk soon.\n\nSincerely,"));
        assert!(!rendered.contains("welcome the chance"));
        assert!(rendered.contains("I also mentor two junior engineers."));
    }

    #[test]
    fn test_set_inserts_missing_section_in_order() {
        let mut doc = CoverLetterDocument::parse("Dear Team,\n\nShort intro.");
        doc.set(SectionKey::Closing, "Thanks for reading.");
        doc.set(SectionKey::Body, "Middle paragraph.");
        assert_eq!(
            doc.render(),
            "Dear Team,\n\nShort intro.\n\nMiddle paragraph.\n\nThanks for reading."
        );
    }

    #[test]
    fn test_blank_text_removes_section() {
        let mut doc = CoverLetterDocument::parse(LETTER);
        doc.set(SectionKey::Title, "  ");
        assert_eq!(doc.get(SectionKey::Title), None);
        assert!(doc.render().starts_with("Jane Doe"));
    }

    #[test]
    fn test_salutation_sharing_paragraph_with_intro() {
        let doc = CoverLetterDocument::parse("Dear Ms. Lee,\nI am applying for the role.\n\nThank you,\nSam");
        assert_eq!(doc.get(SectionKey::Salutation), Some("Dear Ms. Lee,"));
        assert_eq!(doc.get(SectionKey::Introduction), Some("I am applying for the role."));
        assert_eq!(doc.get(SectionKey::SignOff), Some("Thank you,\nSam"));
    }

    #[test]
    fn test_sign_off_inside_closing_paragraph() {
        let doc = CoverLetterDocument::parse("Intro.\n\nBody.\n\nHope to hear from you.\nBest regards,\nSam");
        assert_eq!(doc.get(SectionKey::Closing), Some("Hope to hear from you."));
        assert_eq!(doc.get(SectionKey::SignOff), Some("Best regards,\nSam"));
        assert_eq!(doc.get(SectionKey::Body), Some("Body."));
    }

    #[test]
    fn test_two_paragraphs_are_intro_and_closing() {
        let doc = CoverLetterDocument::parse("First.\n\nLast.");
        assert_eq!(doc.get(SectionKey::Introduction), Some("First."));
        assert_eq!(doc.get(SectionKey::Body), None);
        assert_eq!(doc.get(SectionKey::Closing), Some("Last."));
    }

    #[test]
    fn test_empty_input() {
        let doc = CoverLetterDocument::parse("  \n\n ");
        assert!(doc.sections().is_empty());
        assert_eq!(doc.render(), "");
    }
}
