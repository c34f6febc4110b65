use crate::resume::ai::ResumeSection;

pub fn improve_prompt(section: ResumeSection, industry: &str, current: &str) -> String {
    if section == ResumeSection::Skills {
        return format!(
            r#"Improve the following skills section for a {industry} professional.
Make it impactful and aligned with industry standards.
Current content: "{current}"

Group the skills by domain, one category per line, in this format:
Languages: ...
Frameworks: ...
Tools: ...
Other Skills: ...
Omit any category with no skills."#
        );
    }
    format!(
        r#"Improve the following {section} description for a {industry} professional.
Make it impactful, quantifiable, and aligned with industry standards.
Current content: "{current}"

Requirements:
1. Use action verbs
2. Include metrics and results where possible
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords

Respond with a single paragraph."#,
        section = section.as_str()
    )
}

pub fn analyze_prompt(industry: &str, content: &str) -> String {
    format!(
        r#"Review the following resume for a {industry} professional and score it.

Resume content:
{content}

Respond in this JSON format:
{{
  "overall": 0-100,
  "sections": [{{ "name": "Summary", "score": 0-100, "feedback": "..." }}],
  "suggestions": [
    {{ "id": "s1", "type": "summary|skills|experience|education|projects",
       "section": "Human readable name", "content": "Suggested text",
       "reason": "Why", "index": 0 }}
  ]
}}
"index" is only present for entries of list sections such as experience.
Give 3 to 5 suggestions focused on content, not formatting."#
    )
}

pub fn tailor_prompt(resume_content: &str, job_description: &str) -> String {
    format!(
        r#"Tailor the following resume to the job description. Identify the key skills and
requirements of the job and rewrite only the sections that should change.

Resume content:
{resume_content}

Job description:
{job_description}

Respond in this JSON format, omitting sections that need no change:
{{
  "summary": "...",
  "skills": "...",
  "experience": [{{ "index": 0, "description": "..." }}]
}}"#
    )
}
