use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{
    client::RefineTransport,
    types::{ContentPart, GenerateRequest, GenerateResponse, RefineError},
};

/// Transport double that records requests and replays a canned response.
#[derive(Clone)]
pub(crate) struct MockTransport {
    pub response: GenerateResponse,
    pub error: Arc<Mutex<Option<RefineError>>>,
    pub delay: Option<Duration>,
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockTransport {
    /// Responds with a single inline image carrying `payload`.
    pub fn returning_image(payload: &str) -> Self {
        Self::returning(GenerateResponse {
            parts: vec![ContentPart::InlineImage {
                mime_type: "image/png".to_string(),
                data: payload.to_string(),
            }],
        })
    }

    pub fn returning(response: GenerateResponse) -> Self {
        Self {
            response,
            error: Arc::new(Mutex::new(None)),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: RefineError) -> Self {
        let mock = Self::returning(GenerateResponse::default());
        *mock.error.lock().unwrap() = Some(error);
        mock
    }

    pub fn recorded(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RefineTransport for MockTransport {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, RefineError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.error.lock().unwrap().take() {
            Err(err)
        } else {
            Ok(self.response.clone())
        }
    }
}
