use serde::Deserialize;

/// `generateContent` response body. Only the fields needed to recover the
/// answer text are modelled.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("prompt was blocked: {0}")]
    Blocked(String),

    #[error("response contained no candidates")]
    NoCandidates,

    #[error("response contained no text (finish reason: {0})")]
    NoText(String),
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its text parts concatenated.
    pub fn text(&self) -> Result<String, ResponseError> {
        let Some(candidate) = self.candidates.first() else {
            return Err(match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
            {
                Some(reason) => ResponseError::Blocked(reason),
                None => ResponseError::NoCandidates,
            });
        };

        let parts: Vec<&str> = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            let reason = candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "unspecified".to_string());
            return Err(ResponseError::NoText(reason));
        }

        Ok(parts.concat())
    }
}
