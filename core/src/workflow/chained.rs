use crate::enrich::{EnrichClient, Profile};
use crate::prompts;
use crate::traits::{ChatMessage, ChatRequest, Provider};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

const TECH_KEYWORDS: &[&str] = &["tech", "software", "computer", "ai"];
const TECH_COMPANIES: &[&str] = &["nvidia", "microsoft", "google"];

#[derive(Debug, Clone)]
pub struct ExtractedProfile {
    pub first_name: String,
    pub company: String,
    pub description: String,
    pub is_tech: bool,
}

/// Hardcoded field extraction with no fallback: a missing field fails the
/// whole pipeline. The agentic workflow exists because of this brittleness.
pub fn extract_fields(profile: &Profile) -> Result<ExtractedProfile> {
    let first_name = profile
        .first_name
        .clone()
        .context("profile has no first_name")?;

    let current = profile
        .experiences
        .first()
        .context("profile has no work experience")?;

    let company = current
        .company
        .clone()
        .context("current experience has no company")?;

    let description = current
        .description
        .clone()
        .context("current experience has no description")?;

    let industry = profile.industry.as_deref().unwrap_or("").to_lowercase();
    let headline = profile.headline.as_deref().unwrap_or("").to_lowercase();
    let company_lower = company.to_lowercase();

    let is_tech = TECH_KEYWORDS
        .iter()
        .any(|k| industry.contains(k) || headline.contains(k))
        || TECH_COMPANIES.iter().any(|c| company_lower.contains(c));

    Ok(ExtractedProfile {
        first_name,
        company,
        description,
        is_tech,
    })
}

/// The "script follower": fetch, extract, generate - a fixed sequence with
/// no self-correction. Fast and cheap, breaks on unexpected inputs.
pub struct ChainedOutreach {
    provider: Arc<dyn Provider>,
    enrich: EnrichClient,
}

impl ChainedOutreach {
    pub fn new(provider: Arc<dyn Provider>, enrich: EnrichClient) -> Self {
        Self { provider, enrich }
    }

    pub async fn run(&self, linkedin_url: &str) -> Result<String> {
        info!(linkedin_url, "chained workflow: fetching profile");
        let profile = self
            .enrich
            .fetch_profile(linkedin_url)
            .await
            .context("profile fetch failed")?;

        let extracted = extract_fields(&profile)?;
        info!(
            name = %extracted.first_name,
            company = %extracted.company,
            is_tech = extracted.is_tech,
            "chained workflow: generating message"
        );

        let prompt = prompts::outreach_message_prompt(
            &extracted.first_name,
            &extracted.company,
            &extracted.description,
            extracted.is_tech,
        );
        let messages = [ChatMessage::user(prompt)];

        let response = self
            .provider
            .chat(ChatRequest {
                system: "",
                messages: &messages,
                tools: None,
            })
            .await?;

        response
            .text()
            .context("generation service returned no text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Experience;

    fn profile(industry: Option<&str>, headline: Option<&str>, company: &str) -> Profile {
        Profile {
            first_name: Some("Jane".into()),
            industry: industry.map(String::from),
            headline: headline.map(String::from),
            experiences: vec![Experience {
                company: Some(company.into()),
                title: Some("CEO".into()),
                description: Some("Leads the company".into()),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn extracts_complete_profile() {
        let extracted = extract_fields(&profile(Some("Retail"), None, "Acme Bakery")).unwrap();
        assert_eq!(extracted.first_name, "Jane");
        assert_eq!(extracted.company, "Acme Bakery");
        assert!(!extracted.is_tech);
    }

    #[test]
    fn tech_detected_from_industry() {
        let extracted =
            extract_fields(&profile(Some("Computer Software"), None, "Acme")).unwrap();
        assert!(extracted.is_tech);
    }

    #[test]
    fn tech_detected_from_headline() {
        let extracted =
            extract_fields(&profile(None, Some("Building AI products"), "Acme")).unwrap();
        assert!(extracted.is_tech);
    }

    #[test]
    fn tech_detected_from_known_company() {
        let extracted = extract_fields(&profile(None, None, "NVIDIA")).unwrap();
        assert!(extracted.is_tech);
    }

    #[test]
    fn missing_first_name_fails_hard() {
        let mut p = profile(None, None, "Acme");
        p.first_name = None;
        assert!(extract_fields(&p).is_err());
    }

    #[test]
    fn missing_experience_fails_hard() {
        let mut p = profile(None, None, "Acme");
        p.experiences.clear();
        assert!(extract_fields(&p).is_err());
    }

    #[test]
    fn missing_description_fails_hard() {
        let mut p = profile(None, None, "Acme");
        p.experiences[0].description = None;
        assert!(extract_fields(&p).is_err());
    }
}
