pub mod gemini;
pub mod media;

use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use media::InlineImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    Text(String),
    InlineImage(InlineImage),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResponse {
    pub segments: Vec<ContentSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviceResponse {
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn edit_image(
        &self,
        image: &InlineImage,
        instruction: &str,
    ) -> Result<EditResponse, BackendError>;

    async fn advise(
        &self,
        image: &InlineImage,
        instruction: &str,
    ) -> Result<AdviceResponse, BackendError>;
}
