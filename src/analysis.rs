//! Production analysis written by a generative-AI model.
//!
//! The model receives the orders, machines and materials as JSON and answers with
//! an HTML fragment. [`analyze`] never fails: an empty answer or any error is
//! replaced by a fixed message, so the rest of the plant is unaffected.

use crate::config::AiConfig;
use crate::model::{Machine, Material, ProductionOrder};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

pub const UNAVAILABLE_MESSAGE: &str = "<p>Unable to generate the analysis at the moment.</p>";
pub const ERROR_MESSAGE: &str = "<p>Error while communicating with the AI assistant.</p>";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Failed to encode plant data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Turns a prompt into generated text. An empty string means the model had nothing to say.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Builds the request sent to the model.
pub fn build_prompt(
    orders: &[ProductionOrder],
    machines: &[Machine],
    materials: &[Material],
) -> Result<String, AnalysisError> {
    let orders = serde_json::to_string(orders)?;
    let machines = serde_json::to_string(machines)?;
    let materials = serde_json::to_string(materials)?;

    Ok(format!(
        "Act as an industrial production management expert (Lean Manufacturing).
Analyse the following JSON data about our plant:

1. Production orders: {orders}
2. Machines: {machines}
3. Raw material stock: {materials}

Give a concise analysis (plain HTML without html/body tags, using <h3>, <ul>, <li>, <strong>) covering:
- Potential or confirmed bottlenecks.
- Machines needing immediate attention (breakdowns, maintenance).
- Stock-out risks.
- 3 priority recommendations to improve OEE and reduce lead times.

Be direct, professional and solution oriented."
    ))
}

/// Runs the analysis, answering with a fallback message instead of failing.
#[instrument(skip_all, fields(orders = orders.len(), machines = machines.len(), materials = materials.len()))]
pub async fn analyze(
    summarizer: &dyn Summarizer,
    orders: &[ProductionOrder],
    machines: &[Machine],
    materials: &[Material],
) -> String {
    let result = match build_prompt(orders, machines, materials) {
        Ok(prompt) => summarizer.summarize(&prompt).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(text) if text.trim().is_empty() => UNAVAILABLE_MESSAGE.to_string(),
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Error fetching AI analysis");
            ERROR_MESSAGE.to_string()
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Calls the Gemini `generateContent` REST endpoint.
pub struct GeminiSummarizer {
    http: reqwest::Client,
    config: AiConfig,
}

impl GeminiSummarizer {
    pub fn new(config: AiConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn summarize(&self, prompt: &str) -> Result<String, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingApiKey)?;

        debug!(prompt_len = prompt.len(), "Sending generateContent request");
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}
