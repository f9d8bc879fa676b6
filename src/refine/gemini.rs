//! Gemini `generateContent` transport.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::RefineConfig;
use crate::refine::{
    client::RefineTransport,
    types::{ContentPart, GenerateRequest, GenerateResponse, RefineError},
};

/// Sends refinement requests to the Gemini API over HTTPS.
pub struct GeminiTransport {
    http_client: reqwest::Client,
    url: Url,
    api_key: String,
}

impl GeminiTransport {
    /// Builds a transport from config and an explicitly supplied API key.
    pub fn new(
        config: &RefineConfig,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RefineError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RefineError::Configuration("empty API key".to_string()));
        }

        let base = config.endpoint.trim_end_matches('/');
        let url = Url::parse(&format!("{}/models/{}:generateContent", base, config.model))
            .map_err(|e| {
                RefineError::Configuration(format!("invalid endpoint '{}': {}", config.endpoint, e))
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RefineError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            url,
            api_key,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RefineTransport for GeminiTransport {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, RefineError> {
        let body = WireRequest::from(&request);
        debug!("POST {}", self.url);

        let response = self
            .http_client
            .post(self.url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RefineError::Transport(format!("{}: {}", status, body)));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| RefineError::Transport(format!("unexpected response body: {}", e)))?;
        Ok(wire.into())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct WireRequest {
    contents: Vec<WireContent>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireBlob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
}

impl From<&GenerateRequest> for WireRequest {
    fn from(request: &GenerateRequest) -> Self {
        let image = WirePart {
            inline_data: Some(WireBlob {
                mime_type: request.mime_type.clone(),
                data: STANDARD.encode(&request.image),
            }),
            ..Default::default()
        };
        let text = WirePart {
            text: Some(request.instruction.clone()),
            ..Default::default()
        };
        Self {
            contents: vec![WireContent {
                parts: vec![image, text],
            }],
        }
    }
}

impl From<WireResponse> for GenerateResponse {
    fn from(wire: WireResponse) -> Self {
        let parts = wire
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| match (part.inline_data, part.text) {
                (Some(blob), _) => Some(ContentPart::InlineImage {
                    mime_type: blob.mime_type,
                    data: blob.data,
                }),
                (None, Some(text)) => Some(ContentPart::Text(text)),
                (None, None) => None,
            })
            .collect();
        Self { parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_image_then_instruction() {
        let request = GenerateRequest {
            image: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
            instruction: "draw it nicely".to_string(),
        };
        let json = serde_json::to_value(WireRequest::from(&request)).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert!(parts[0].get("text").is_none());
        assert_eq!(parts[1]["text"], "draw it nicely");
    }

    #[test]
    fn response_parts_keep_order() {
        let wire: WireResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here you go"},
                {"inlineData":{"mimeType":"image/png","data":"QUJD"}}
            ]}}]}"#,
        )
        .unwrap();
        let response = GenerateResponse::from(wire);

        assert_eq!(response.parts.len(), 2);
        assert_eq!(response.parts[0], ContentPart::Text("here you go".into()));
        assert_eq!(response.first_image(), Some("QUJD"));
    }

    #[test]
    fn empty_response_has_no_parts() {
        let wire: WireResponse = serde_json::from_str("{}").unwrap();
        assert!(GenerateResponse::from(wire).parts.is_empty());
    }

    #[test]
    fn url_is_built_from_endpoint_and_model() {
        let config = RefineConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..RefineConfig::default()
        };
        let transport = GeminiTransport::new(&config, "key", None).unwrap();
        assert_eq!(
            transport.url().as_str(),
            "https://example.test/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn blank_key_or_bad_endpoint_is_rejected() {
        let config = RefineConfig::default();
        assert!(matches!(
            GeminiTransport::new(&config, "  ", None),
            Err(RefineError::Configuration(_))
        ));

        let config = RefineConfig {
            endpoint: "not a url".to_string(),
            ..RefineConfig::default()
        };
        assert!(matches!(
            GeminiTransport::new(&config, "key", None),
            Err(RefineError::Configuration(_))
        ));
    }
}
