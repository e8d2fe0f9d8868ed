//! Gemini REST client for critique generation and speech synthesis.
//!
//! Talks to the generative-language API directly over HTTPS. Text generation
//! uses `generateContent`; speech uses `streamGenerateContent` with SSE
//! framing. The speech consumer stops at the first chunk carrying inline
//! audio data and abandons the rest of the stream — the API's contract is a
//! single-shot payload per request, so chunks are never concatenated.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelProvider, SpeechAudio};
use crate::error::AgentError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for critique and filename suggestion
const TEXT_MODEL: &str = "gemini-2.0-flash-exp";

/// Model used for speech synthesis
const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Prebuilt voice for spoken feedback
const TTS_VOICE: &str = "Charon";

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Build the URL for a model method
    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// One non-streaming text generation request; returns the first
    /// candidate's text.
    async fn generate_text(
        &self,
        model: &str,
        prompt: String,
        config: GenerationConfig,
    ) -> Result<String, AgentError> {
        let request = GenerateRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: config,
        };

        let response = self
            .client
            .post(self.model_url(model, "generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::provider("gemini", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::provider(
                "gemini",
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AgentError::provider("gemini", e))?;

        parsed
            .first_text()
            .map(|t| t.to_string())
            .ok_or_else(|| AgentError::provider("gemini", "no text in response"))
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn critique(&self, system_prompt: &str, idea: &str) -> Result<String, AgentError> {
        let prompt = format!(
            "{}\n\nHere is the business idea for you to analyze:\n\n{}",
            system_prompt, idea
        );

        self.generate_text(
            TEXT_MODEL,
            prompt,
            GenerationConfig {
                temperature: 0.7,
                max_output_tokens: Some(2048),
                ..Default::default()
            },
        )
        .await
    }

    async fn suggest_slug(&self, idea: &str) -> Result<String, AgentError> {
        let prompt = format!(
            "Based on this business idea, suggest a short, descriptive filename \
             (2-4 words, kebab-case) that captures the essence of the idea:\n\n{}\n\n\
             Respond with ONLY the filename suggestion, no explanation. Examples: \
             \"ai-fitness-coach\", \"smart-plant-monitor\", \"crypto-learning-app\".",
            idea
        );

        self.generate_text(
            TEXT_MODEL,
            prompt,
            GenerationConfig {
                temperature: 0.3,
                max_output_tokens: Some(50),
                ..Default::default()
            },
        )
        .await
    }

    async fn synthesize(
        &self,
        instruction: &str,
        text: &str,
    ) -> Result<SpeechAudio, AgentError> {
        let request = GenerateRequest {
            contents: vec![Content::user_text(format!("{}\n\n{}", instruction, text))],
            generation_config: GenerationConfig {
                temperature: 1.0,
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: TTS_VOICE.to_string(),
                        },
                    },
                }),
                ..Default::default()
            },
        };

        let response = self
            .client
            .post(format!(
                "{}?alt=sse",
                self.model_url(TTS_MODEL, "streamGenerateContent")
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::provider("gemini", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::provider(
                "gemini",
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        // Read SSE lines until the first chunk with inline audio data, then
        // drop the response, abandoning the remainder of the stream.
        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AgentError::provider("gemini", e))?;
            buf.extend_from_slice(&chunk);

            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                if let Some(audio) = parse_sse_line(&line)? {
                    debug!(mime_type = %audio.mime_type, bytes = audio.data.len(), "Received audio chunk");
                    return Ok(audio);
                }
            }
        }

        Err(AgentError::provider("gemini", "no audio data received"))
    }
}

/// Parse one SSE line; returns audio when the chunk's first part carries
/// inline data.
fn parse_sse_line(line: &[u8]) -> Result<Option<SpeechAudio>, AgentError> {
    let line = String::from_utf8_lossy(line);
    let Some(payload) = line.trim().strip_prefix("data:") else {
        return Ok(None);
    };

    let chunk: GenerateResponse = match serde_json::from_str(payload.trim()) {
        Ok(chunk) => chunk,
        // Keep-alive or non-JSON event data; wait for the next line
        Err(_) => return Ok(None),
    };

    let Some(inline) = chunk.first_inline_data() else {
        return Ok(None);
    };
    if inline.data.is_empty() {
        return Ok(None);
    }

    let data = BASE64
        .decode(&inline.data)
        .map_err(|e| AgentError::provider("gemini", format!("invalid audio payload: {}", e)))?;

    Ok(Some(SpeechAudio {
        data,
        mime_type: inline.mime_type.clone(),
    }))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate's first part
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Inline data of the first candidate's first part
    fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .inline_data
            .as_ref()
    }
}
