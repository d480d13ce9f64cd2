use crate::enrich::{EnrichClient, EnrichError, Profile, ProfileQuality};
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

const DESCRIPTION: &str = "\
Fetch professional background data from a LinkedIn profile URL.

USE WHEN: You need to research a person's professional background,
including their name, current title, company, work history, or education.
This is typically the first step in prospect research.

RETURNS ON SUCCESS: name, headline, current company and title, location,
industry, work history, education, and a profile_quality assessment
(completeness_score, data_quality, suggestions).

RETURNS ON ERROR: a message explaining the failure (URL invalid, profile
not found, API timeout, rate limited) with suggestions for how to proceed,
such as trying URL variations.

INPUT FORMAT: Full LinkedIn URL, e.g. https://www.linkedin.com/in/username.

NOTE: Some profiles may have incomplete data if privacy settings restrict
access. Check the profile_quality field to assess data completeness.";

pub struct FetchProfileTool {
    client: EnrichClient,
}

impl FetchProfileTool {
    pub fn new(client: EnrichClient) -> Self {
        Self { client }
    }

    fn summarize(profile: &Profile) -> String {
        let quality = ProfileQuality::analyze(profile);

        let summary = json!({
            "first_name": profile.first_name,
            "last_name": profile.last_name,
            "headline": profile.headline,
            "company": profile.current_company(),
            "title": profile.current_title(),
            "location": profile.location,
            "industry": profile.industry,
            "experiences": profile.experiences,
            "education": profile.education,
            "profile_quality": quality,
        });

        format!(
            "Successfully fetched LinkedIn profile:\n{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        )
    }

    fn describe_failure(error: EnrichError) -> String {
        match error {
            EnrichError::NotFound => "Error: Profile not found. The username may be incorrect \
                 or the profile may be private.\n\nSuggestions:\n\
                 - Try removing hyphens from the username\n\
                 - Try common variations (firstname-lastname, firstnamelastname)\n\
                 - Use web search to find the correct profile URL"
                .to_string(),
            EnrichError::RateLimited => "Error: Rate limited. Too many requests to the API.\n\n\
                 Suggestion: Wait a moment and try again, or proceed with available information."
                .to_string(),
            EnrichError::Api { status, body } => {
                format!("Error fetching profile: API returned {}: {}", status, body)
            }
            EnrichError::Network(e) if e.is_timeout() => {
                "Error: Request timed out. The API may be slow or unavailable.\n\n\
                 Suggestion: Try again or proceed with what you already know."
                    .to_string()
            }
            EnrichError::Network(e) => format!("Error: request failed: {}", e),
        }
    }
}

#[async_trait]
impl Tool for FetchProfileTool {
    fn name(&self) -> &str {
        "fetch_linkedin_profile"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "profile_url": {
                    "type": "string",
                    "description": "The LinkedIn profile URL to fetch"
                }
            },
            "required": ["profile_url"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let profile_url = extract_string_arg(&args, "profile_url")?;

        match self.client.fetch_profile(&profile_url).await {
            Ok(profile) => {
                info!(
                    name = %profile.full_name(),
                    company = profile.current_company().unwrap_or("Unknown"),
                    "profile fetched"
                );
                Ok(ToolResult::success(Self::summarize(&profile)))
            }
            Err(error) => Ok(ToolResult::error(Self::describe_failure(error))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Experience;

    #[test]
    fn summary_includes_quality_assessment() {
        let profile = Profile {
            first_name: Some("Jane".into()),
            experiences: vec![Experience {
                company: Some("Acme Corp".into()),
                title: Some("CEO".into()),
                description: None,
            }],
            ..Default::default()
        };

        let summary = FetchProfileTool::summarize(&profile);
        assert!(summary.contains("Acme Corp"));
        assert!(summary.contains("profile_quality"));
        assert!(summary.contains("completeness_score"));
    }

    #[test]
    fn not_found_failure_suggests_url_variations() {
        let message = FetchProfileTool::describe_failure(EnrichError::NotFound);
        assert!(message.contains("removing hyphens"));
    }

    #[test]
    fn rate_limit_failure_suggests_waiting() {
        let message = FetchProfileTool::describe_failure(EnrichError::RateLimited);
        assert!(message.contains("Wait a moment"));
    }

    #[test]
    fn api_failure_carries_status() {
        let message = FetchProfileTool::describe_failure(EnrichError::Api {
            status: 500,
            body: "server error".into(),
        });
        assert!(message.contains("500"));
    }
}
