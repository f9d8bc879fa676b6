use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::refine::{
    style::{Style, build_instruction},
    types::{GenerateRequest, GenerateResponse, RefineError},
};
use crate::util;

/// Abstraction over the remote image model.
#[async_trait]
pub trait RefineTransport: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, RefineError>;
}

/// Turns a sketch into a refined image with a single model call.
#[derive(Clone)]
pub struct RefineClient {
    transport: Arc<dyn RefineTransport>,
    timeout: Option<Duration>,
}

impl RefineClient {
    pub fn new(transport: Arc<dyn RefineTransport>) -> Self {
        Self {
            transport,
            timeout: None,
        }
    }

    /// Bounds each model call; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Refines `image` (a data URL or bare base64 payload) in the named style.
    ///
    /// Unknown style names fall back to pencil. Returns the first image the
    /// model produced as a `data:image/png;base64,` URL.
    pub async fn refine(
        &self,
        image: &str,
        style: &str,
        details: Option<&str>,
    ) -> Result<String, RefineError> {
        self.refine_styled(image, Style::resolve(style), details)
            .await
    }

    pub async fn refine_styled(
        &self,
        image: &str,
        style: Style,
        details: Option<&str>,
    ) -> Result<String, RefineError> {
        let (mime_type, bytes) =
            util::decode_data_url(image).map_err(|e| RefineError::InvalidImage(e.to_string()))?;
        if bytes.is_empty() {
            return Err(RefineError::InvalidImage("empty image".to_string()));
        }

        let request = GenerateRequest {
            image: bytes,
            mime_type,
            instruction: build_instruction(style, details),
        };
        debug!(
            "Sending {} byte {} sketch for {} refinement",
            request.image.len(),
            request.mime_type,
            style
        );

        let call = self.transport.generate(request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                warn!("Refinement timed out after {:?}", limit);
                RefineError::Timeout(limit)
            })??,
            None => call.await?,
        };

        let payload = response.first_image().ok_or(RefineError::NoImageReturned)?;
        info!("Received refined {} image", style);
        Ok(util::wrap_base64(util::DEFAULT_IMAGE_MIME, payload))
    }
}
