//! Generative-content seam and the post-writing assistant built on it.
//!
//! # Responsibility
//! - Define the only interface core uses to reach a text/image generator.
//! - Build post prompts and turn every failure mode into one error shape.
//!
//! # Invariants
//! - One attempt per request; no retry and no backoff.
//! - Empty text and missing image data are failures, not content.
//! - Prompts and generated text are never logged.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transport-level failure reported by a generator implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No credentials or endpoint configured.
    NotConfigured,
    /// The remote call failed.
    Service(String),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "content generator is not configured"),
            Self::Service(message) => write!(f, "content generator failed: {message}"),
        }
    }
}

impl Error for GenerationError {}

/// External text/image generator.
pub trait ContentGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;
    /// Returns an image reference (URL or `data:` URI), or `None` when the
    /// service answered without image data.
    fn generate_image(&self, prompt: &str) -> Result<Option<String>, GenerationError>;
}

/// Generator used when no API key is available. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

impl ContentGenerator for UnconfiguredGenerator {
    fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }

    fn generate_image(&self, _prompt: &str) -> Result<Option<String>, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

/// Which body field a text request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Excerpt,
    Article,
}

impl TextTarget {
    fn as_str(self) -> &'static str {
        match self {
            Self::Excerpt => "excerpt",
            Self::Article => "article",
        }
    }
}

/// Assistant failure as surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistError {
    /// Neither a title nor a category was given to build a prompt from.
    MissingSubject,
    /// Blank free-form prompt.
    EmptyPrompt,
    /// Generator failed or produced nothing usable.
    ExternalService(String),
}

impl Display for AssistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSubject => write!(f, "enter a title or category before generating"),
            Self::EmptyPrompt => write!(f, "enter a prompt before generating"),
            Self::ExternalService(message) => write!(f, "{message}"),
        }
    }
}

impl Error for AssistError {}

/// Post-writing assistant over any [`ContentGenerator`].
pub struct AssistService<G: ContentGenerator> {
    generator: G,
}

impl<G: ContentGenerator> AssistService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generates an excerpt or a full article for a post subject.
    pub fn generate_post_text(
        &self,
        target: TextTarget,
        title: &str,
        category: &str,
    ) -> Result<String, AssistError> {
        require_subject(title, category)?;
        let prompt = post_text_prompt(target, title, category);
        match self.generator.generate_text(&prompt) {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "event=assist_text module=assist status=ok target={} chars={}",
                    target.as_str(),
                    text.chars().count()
                );
                Ok(text)
            }
            Ok(_) => {
                warn!(
                    "event=assist_text module=assist status=error target={} error_code=empty_response",
                    target.as_str()
                );
                Err(AssistError::ExternalService(
                    "no content generated".to_string(),
                ))
            }
            Err(err) => {
                warn!(
                    "event=assist_text module=assist status=error target={} error={}",
                    target.as_str(),
                    err
                );
                Err(AssistError::ExternalService(err.to_string()))
            }
        }
    }

    /// Generates a cover image reference for a post subject.
    pub fn generate_cover_image(&self, title: &str, category: &str) -> Result<String, AssistError> {
        require_subject(title, category)?;
        self.generate_image(&cover_image_prompt(title, category))
    }

    /// Generates an image from a free-form prompt.
    pub fn generate_image(&self, prompt: &str) -> Result<String, AssistError> {
        if prompt.trim().is_empty() {
            return Err(AssistError::EmptyPrompt);
        }
        match self.generator.generate_image(prompt) {
            Ok(Some(reference)) if !reference.trim().is_empty() => {
                info!("event=assist_image module=assist status=ok");
                Ok(reference)
            }
            Ok(_) => {
                warn!("event=assist_image module=assist status=error error_code=no_image_data");
                Err(AssistError::ExternalService(
                    "failed to generate image".to_string(),
                ))
            }
            Err(err) => {
                warn!("event=assist_image module=assist status=error error={}", err);
                Err(AssistError::ExternalService(err.to_string()))
            }
        }
    }
}

fn require_subject(title: &str, category: &str) -> Result<(), AssistError> {
    if title.trim().is_empty() && category.trim().is_empty() {
        return Err(AssistError::MissingSubject);
    }
    Ok(())
}

/// Prompt for an excerpt (50-70 words) or an article (~300 words).
pub fn post_text_prompt(target: TextTarget, title: &str, category: &str) -> String {
    let length = match target {
        TextTarget::Excerpt => "excerpt (around 50-70 words)",
        TextTarget::Article => "article (around 300 words)",
    };
    format!(
        "Write a blog post {length} about \"{title}\" in the category of \"{category}\". \
         Focus on engaging the reader and providing valuable information. \
         If it's an excerpt, make it concise and enticing."
    )
}

/// Prompt for a post cover image.
pub fn cover_image_prompt(title: &str, category: &str) -> String {
    format!(
        "A blog post cover image related to \"{title}\" in the theme of \"{category}\". \
         Make it visually appealing and relevant."
    )
}
