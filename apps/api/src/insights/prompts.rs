pub fn industry_insights_prompt(industry: &str) -> String {
    format!(
        r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format:
{{
  "salaryRanges": [
    {{ "role": "string", "min": number, "max": number, "median": number, "location": "string" }}
  ],
  "growthRate": number,
  "demandLevel": "HIGH" | "MEDIUM" | "LOW",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}}

Include at least 5 common roles for salary ranges.
Growth rate is a percentage.
Include at least 5 skills and 5 trends."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_industry_and_keeps_json_braces() {
        let prompt = industry_insights_prompt("Fintech");
        assert!(prompt.contains("the Fintech industry"));
        assert!(prompt.contains("\"salaryRanges\": ["));
        assert!(prompt.contains("{ \"role\""));
    }
}
