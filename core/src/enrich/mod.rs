pub mod quality;

pub use quality::{DataQuality, ProfileQuality};

use serde::{Deserialize, Serialize};
use tracing::debug;

const ENRICH_BASE_URL: &str = "https://enrichlayer.com";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("profile not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: Option<String>,
    pub degree_name: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub headline: Option<String>,
    pub occupation: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

impl Profile {
    /// Current company and title come from the most recent experience.
    pub fn current_company(&self) -> Option<&str> {
        self.experiences
            .first()
            .and_then(|e| e.company.as_deref())
    }

    pub fn current_title(&self) -> Option<&str> {
        self.experiences.first().and_then(|e| e.title.as_deref())
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => "Unknown".to_string(),
        }
    }
}

pub struct EnrichClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl EnrichClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: ENRICH_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch_profile(&self, profile_url: &str) -> Result<Profile, EnrichError> {
        debug!(profile_url, "fetching profile");

        let response = self
            .client
            .get(format!("{}/api/v2/profile", self.base_url))
            .query(&[("profile_url", profile_url)])
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200 => Ok(response.json().await?),
            404 => Err(EnrichError::NotFound),
            429 => Err(EnrichError::RateLimited),
            code => {
                let body = response.text().await.unwrap_or_default();
                let body = body.chars().take(200).collect();
                Err(EnrichError::Api { status: code, body })
            }
        }
    }
}
