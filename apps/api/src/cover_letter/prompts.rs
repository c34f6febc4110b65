use crate::models::user::User;

pub fn improve_prompt(part: &str, industry: &str, current: &str) -> String {
    format!(
        r#"Improve the following cover letter {part} for a {industry} professional.
Make it impactful, specific, and aligned with industry standards.
Current content: "{current}"

Requirements:
1. Use action verbs
2. Include metrics and results where possible
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords

Respond with a single paragraph."#
    )
}

pub fn analyze_prompt(industry: &str, content: &str) -> String {
    format!(
        r#"Review the following cover letter for a {industry} professional and score it.

Cover letter content:
{content}

Respond in this JSON format:
{{
  "overall": 0-100,
  "sections": [{{ "name": "Introduction", "score": 0-100, "feedback": "..." }}],
  "suggestions": [
    {{ "id": "s1", "type": "introduction|body|closing",
       "section": "Human readable name", "content": "Suggested text", "reason": "Why" }}
  ]
}}
Give 3 to 5 suggestions focused on content, not formatting."#
    )
}

pub fn tailor_prompt(letter_content: &str, job_description: &str) -> String {
    format!(
        r#"Tailor the following cover letter to the job description. Identify the key skills
and requirements of the job and rewrite only the parts that should change.

Cover letter content:
{letter_content}

Job description:
{job_description}

Respond in this JSON format, omitting parts that need no change:
{{
  "introduction": "...",
  "body": "...",
  "closing": "..."
}}
"body" replaces every paragraph between the introduction and the closing."#
    )
}

pub fn generate_prompt(
    user: &User,
    job_title: &str,
    company_name: &str,
    job_description: &str,
    resume_content: &str,
) -> String {
    let industry = user.industry_label();
    let experience = user
        .experience
        .map(|years| format!("{years} years"))
        .unwrap_or_else(|| "Not specified".to_string());
    let skills = if user.skills.is_empty() {
        "Not specified".to_string()
    } else {
        user.skills.join(", ")
    };
    let resume_block = if resume_content.trim().is_empty() {
        String::new()
    } else {
        format!("Resume content (for reference):\n{resume_content}\n\n")
    };

    format!(
        r#"Write a professional cover letter for a {industry} professional applying for the
{job_title} position at {company_name}.

Job description:
{job_description}

{resume_block}Candidate:
- Industry: {industry}
- Experience: {experience}
- Skills: {skills}

Structure:
1. A salutation line
2. A personalized introduction naming the company and position
3. 2-3 body paragraphs on relevant skills and experience
4. A closing paragraph with a call to action
5. A sign-off

Use markdown with blank lines between paragraphs. Aim for 300-400 words."#
    )
}
