//! Client for the Gemini generative language REST API.
//!
//! One poster generation makes up to three calls in sequence:
//!
//! 1. copywriting (`generateContent`, JSON schema for heading/description/cta)
//! 2. design concept (`generateContent`, JSON schema constrained to the known
//!    fonts and layout styles)
//! 3. background image (Imagen `predict`), skipped when the user supplied one
//!
//! Nothing is retried; the first failure ends the cycle.

use async_trait::async_trait;
use poster_core::{
    DesignConcept, GeneratedText, GenerationError, GenerationResult, LayoutStyle, PosterGenerator,
    KNOWN_FONTS,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;

use crate::config::GeminiConfig;

/// Shown when the copywriting call fails.
pub const TEXT_FAILURE_MESSAGE: &str =
    "AI failed to generate valid text content. Please try again.";

/// Shown when the design call fails.
pub const DESIGN_FAILURE_MESSAGE: &str = "AI failed to generate a valid design. Please try again.";

/// Shown when no image comes back.
pub const IMAGE_FAILURE_MESSAGE: &str =
    "Image generation failed. The AI could not create an image for the given prompt.";

/// Errors that can occur when talking to Gemini.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The endpoint URL is invalid.
    #[error("invalid Gemini endpoint: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with an error status.
    #[error("Gemini API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
    /// A payload could not be parsed.
    #[error("failed to parse Gemini payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The response held no usable content.
    #[error("empty Gemini response: {0}")]
    Empty(String),
}

/// Asynchronous Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::InvalidUrl`] if the endpoint is malformed.
    /// Returns [`GeminiError::Http`] if the HTTP client fails to build.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut endpoint =
            Url::parse(&config.endpoint).map_err(|e| GeminiError::InvalidUrl(e.to_string()))?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let http = Client::builder()
            .user_agent(format!("poster-studio/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
            text_model: config.text_model,
            image_model: config.image_model,
        })
    }

    /// Write a heading, description and call to action for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is not valid copy.
    pub async fn generate_text(&self, prompt: &str) -> Result<GeneratedText, GeminiError> {
        let instruction = format!(
            "You write social media copy. From the brief below, write a catchy headline \
             (at most 10 words), a compelling description (at most 30 words) and a short \
             call to action. Keep the tone engaging and professional. Reply with JSON only.\n\n\
             Brief: \"{prompt}\""
        );
        let raw = self
            .generate_json(&self.text_model, &instruction, text_schema())
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Propose colors, fonts, layout and an image prompt for `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is not a design.
    pub async fn generate_design(
        &self,
        text: &GeneratedText,
    ) -> Result<DesignConcept, GeminiError> {
        let instruction = format!(
            "You design social media posters. Create a design concept for this copy:\n\
             - Heading: \"{heading}\"\n\
             - Description: \"{description}\"\n\
             - Call to action: \"{cta}\"\n\n\
             Choose a modern, high-contrast background and text color, a heading font and a \
             body font that pair well (from: {fonts}), a layout style, and a concrete, \
             descriptive prompt for a background image that reinforces the heading \
             \"{heading}\". Avoid generic abstract backgrounds. Reply with JSON only.",
            heading = text.heading,
            description = text.description,
            cta = text.cta,
            fonts = KNOWN_FONTS.join(", "),
        );
        let raw = self
            .generate_json(&self.text_model, &instruction, design_schema())
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Generate one PNG background and return it as a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no image comes back.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = self.model_url(&self.image_model, "predict")?;
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "sampleCount": 1, "outputMimeType": "image/png" },
        });
        let response: PredictResponse = self.post(url, &body).await?;
        let prediction = response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
            .ok_or_else(|| GeminiError::Empty("no image in prediction".to_string()))?;
        let mime = prediction.mime_type.as_deref().unwrap_or("image/png");
        let bytes = prediction.bytes_base64_encoded.unwrap_or_default();
        Ok(format!("data:{mime};base64,{bytes}"))
    }

    async fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GeminiError> {
        let url = self.model_url(model, "generateContent")?;
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };
        let response: GenerateContentResponse = self.post(url, &body).await?;
        let text: String = response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();
        let text = text.trim();
        if text.is_empty() {
            return Err(GeminiError::Empty("no text in candidates".to_string()));
        }
        Ok(text.to_string())
    }

    async fn post<B, R>(&self, url: Url, body: &B) -> Result<R, GeminiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {}", url.path());
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn model_url(&self, model: &str, method: &str) -> Result<Url, GeminiError> {
        self.endpoint
            .join(&format!("v1beta/models/{model}:{method}"))
            .map_err(|e| GeminiError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl PosterGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        background_image: Option<&str>,
    ) -> Result<GenerationResult, GenerationError> {
        let text = self.generate_text(prompt).await.map_err(|e| {
            tracing::error!("Copywriting call failed: {e}");
            GenerationError::new(TEXT_FAILURE_MESSAGE)
        })?;
        let design = self.generate_design(&text).await.map_err(|e| {
            tracing::error!("Design call failed: {e}");
            GenerationError::new(DESIGN_FAILURE_MESSAGE)
        })?;

        let image = match background_image {
            Some(image) => image.to_string(),
            None => self.generate_image(&design.image_prompt).await.map_err(|e| {
                tracing::error!("Image call failed: {e}");
                GenerationError::new(IMAGE_FAILURE_MESSAGE)
            })?,
        };

        Ok(GenerationResult { text, design, image })
    }
}

fn text_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "heading": { "type": "STRING", "description": "Catchy headline, at most 10 words." },
            "description": { "type": "STRING", "description": "Compelling description, at most 30 words." },
            "cta": { "type": "STRING", "description": "Short call to action such as \"Shop Now\"." }
        },
        "required": ["heading", "description", "cta"]
    })
}

fn design_schema() -> Value {
    let layouts = LayoutStyle::ALL.map(LayoutStyle::as_str);
    json!({
        "type": "OBJECT",
        "properties": {
            "backgroundColor": { "type": "STRING", "description": "Background hex color, e.g. #FFFFFF." },
            "textColor": { "type": "STRING", "description": "Text hex color with high contrast against the background." },
            "headingFont": { "type": "STRING", "enum": KNOWN_FONTS },
            "bodyFont": { "type": "STRING", "enum": KNOWN_FONTS },
            "layoutStyle": { "type": "STRING", "enum": layouts },
            "imagePrompt": { "type": "STRING", "description": "Descriptive prompt for the background image." }
        },
        "required": ["backgroundColor", "textColor", "headingFont", "bodyFont", "layoutStyle", "imagePrompt"]
    })
}
