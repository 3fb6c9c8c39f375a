use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::brief::CampaignBrief;
use crate::config::GenerationConfig;
use crate::error::Error;
use crate::plan::{ContentPlan, PlanDraft};
use crate::schedule::ScheduleSlot;

use super::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use super::{GenerationMode, Generator};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ATTEMPTS: u32 = 2;
const TEMPERATURE: f32 = 0.8;

/// Generates plans through the Gemini `generateContent` REST endpoint.
///
/// Each call is retried once when the request fails in transit or the
/// service answers 429 or 5xx. Every request is bounded by the configured
/// timeout.
#[derive(Clone)]
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiGenerator {
    pub fn new(api_key: String, config: &GenerationConfig) -> Result<GeminiGenerator, Error> {
        let endpoint = config
            .api_url
            .join(&format!("models/{}:generateContent", config.model))
            .map_err(|_| Error::InvalidConfig {
                name: "GEMINI_MODEL".into(),
                value: config.model.clone(),
            })?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(GeminiGenerator {
            api_key,
            model: config.model.clone(),
            endpoint,
            client,
        })
    }

    async fn request_text(&self, request: &GenerateContentRequest) -> Result<String, Error> {
        let mut attempt = 1;
        loop {
            match self.send(request).await {
                Err(err) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                    warn!("generation attempt {} failed, retrying: {}", attempt, err);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send(&self, request: &GenerateContentRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GenerationServiceFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reply: GenerateContentResponse = serde_json::from_str(&body)?;

        let text = reply.text();
        if text.trim().is_empty() {
            return Err(Error::GenerationEmptyResponse);
        }

        Ok(text)
    }
}

fn is_retryable(error: &Error) -> bool {
    match error {
        Error::GenerationRequestFailed(err) => err.is_timeout() || err.is_connect() || err.is_request(),
        Error::GenerationServiceFailed { status } => *status == 429 || *status >= 500,
        _ => false,
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Live
    }

    #[tracing::instrument(skip(self, brief, slots), fields(model = %self.model, campaign = %brief.campaign_name))]
    async fn generate(
        &self,
        brief: &CampaignBrief,
        slots: &[ScheduleSlot],
    ) -> Result<ContentPlan, Error> {
        let request = GenerateContentRequest {
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
            contents: vec![Content::text(Some("user"), &build_prompt(brief, slots))],
            generation_config: GenerationParams {
                response_mime_type: "application/json",
                temperature: TEMPERATURE,
            },
        };

        let text = self.request_text(&request).await?;
        debug!("received {} bytes of generated text", text.len());

        PlanDraft::parse(&text)?.into_plan(slots)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Content {
        Content {
            role: role.map(String::from),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
