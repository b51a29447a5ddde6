use serde::Serialize;

use super::config::{GenerationConfig, ResponseModality, SafetySetting};

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationParameters,
    pub safety_settings: Vec<SafetySetting>,
}

/// One conversation turn.
#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub response_modalities: Vec<ResponseModality>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Build the request for a single design document.
///
/// The document is the only user turn; everything else comes from `config`.
pub fn build_request(config: &GenerationConfig, document: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(Some("user"), document)],
        system_instruction: Content::text(None, config.system_instruction.as_str()),
        generation_config: GenerationParameters {
            temperature: config.temperature,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            response_modalities: vec![config.response_modality],
        },
        safety_settings: config.safety_settings.clone(),
    }
}

/// Vertex AI endpoint for `generateContent` on a Google-published model.
pub fn endpoint_url(project: &str, location: &str, model: &str) -> String {
    format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent"
    )
}
