//! AI operations on resumes. Each is cached under a key derived from its full input.

use serde::{Deserialize, Serialize};

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, WRITER_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::DocumentAnalysis;
use crate::models::user::User;
use crate::resume::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSection {
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
}

impl ResumeSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeSection::Summary => "summary",
            ResumeSection::Skills => "skills",
            ResumeSection::Experience => "experience",
            ResumeSection::Education => "education",
            ResumeSection::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEdit {
    pub index: u32,
    pub description: String,
}

/// Sections the model chose to rewrite. Absent fields need no change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TailoredResume {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEdit>,
}

pub async fn improve_section(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    section: ResumeSection,
    current: &str,
) -> Result<String, AppError> {
    let key = keys::resume_improve(user.id, section.as_str(), current);
    cache
        .get_or_compute(&key, TtlTier::Medium, || async {
            let prompt = prompts::improve_prompt(section, user.industry_label(), current);
            Ok::<_, AppError>(llm.complete_text(&prompt, WRITER_SYSTEM).await?)
        })
        .await
}

pub async fn analyze(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    content: &str,
) -> Result<DocumentAnalysis, AppError> {
    let key = keys::resume_analyze(user.id, content);
    cache
        .get_or_compute(&key, TtlTier::Medium, || async {
            let prompt = prompts::analyze_prompt(user.industry_label(), content);
            let analysis = llm
                .call_json::<DocumentAnalysis>(&prompt, JSON_ONLY_SYSTEM)
                .await?;
            Ok::<_, AppError>(analysis)
        })
        .await
}

pub async fn tailor(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    resume_content: &str,
    job_description: &str,
) -> Result<TailoredResume, AppError> {
    let key = keys::resume_tailor(user.id, resume_content, job_description);
    cache
        .get_or_compute(&key, TtlTier::Medium, || async {
            let prompt = prompts::tailor_prompt(resume_content, job_description);
            let tailored = llm
                .call_json::<TailoredResume>(&prompt, JSON_ONLY_SYSTEM)
                .await?;
            Ok::<_, AppError>(tailored)
        })
        .await
}
