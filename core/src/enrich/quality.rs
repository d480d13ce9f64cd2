use crate::enrich::Profile;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    High,
    Medium,
    Low,
}

/// Data-quality signals the model could not infer by reasoning alone:
/// which fields came back empty and how complete the profile is overall.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileQuality {
    pub completeness_score: u8,
    pub missing_fields: Vec<&'static str>,
    pub data_quality: DataQuality,
    pub suggestions: Vec<String>,
}

const SCORED_FIELDS: u8 = 5;

impl ProfileQuality {
    pub fn analyze(profile: &Profile) -> Self {
        let mut missing_fields = Vec::new();
        let mut suggestions = Vec::new();

        if profile.first_name.is_none() {
            missing_fields.push("first_name");
            suggestions.push("Name not found - verify URL is correct".to_string());
        }

        if profile.experiences.is_empty() {
            missing_fields.push("work_experience");
            suggestions.push("No work history - may need web search for context".to_string());
        } else if profile.experiences.len() < 2 {
            suggestions.push(
                "Limited work history - consider supplementing with other sources".to_string(),
            );
        }

        if profile.headline.is_none() {
            missing_fields.push("headline");
            suggestions.push("No headline - role may be unclear".to_string());
        }

        if profile.education.is_empty() {
            missing_fields.push("education");
        }

        if profile.location.is_none() {
            missing_fields.push("location");
        }

        let present = SCORED_FIELDS - missing_fields.len() as u8;
        let completeness_score = (present as u16 * 100 / SCORED_FIELDS as u16) as u8;

        let data_quality = if completeness_score >= 80 {
            DataQuality::High
        } else if completeness_score >= 50 {
            DataQuality::Medium
        } else {
            suggestions.push(
                "Profile data is incomplete - consider alternative research methods".to_string(),
            );
            DataQuality::Low
        };

        Self {
            completeness_score,
            missing_fields,
            data_quality,
            suggestions,
        }
    }
}
