//! Bridge to the external constrained generator
//!
//! The generator itself (a language model behind some API) lives outside
//! this crate. It is called once per request; retries and timeouts belong
//! to the caller.

use serde_json::Value;
use thiserror::Error;

use crate::config::UiConfig;
use crate::renderer::render_markup;
use crate::schema::{ui_schema, Ui};
use crate::UiError;

const SYSTEM_PROMPT: &str = "You are a user interface assistant. You help users visualize \
website and app ideas by describing UI components that match their intent.";

/// Failure reported by, or about, the generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator failed: {0}")]
    Failed(String),
    #[error("generator returned no output")]
    Empty,
}

impl GeneratorError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Everything a generator needs to produce one UI document
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// JSON Schema the output must follow
    pub schema: Value,
}

impl GenerationRequest {
    /// Build the request for a free-form description of the wanted UI
    pub fn for_intent(intent: &str) -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: format!(
                "Generate a JSON representation of UI components for this intent: {}. \
                 Respond with json only.",
                intent.trim()
            ),
            schema: ui_schema(),
        }
    }
}

/// Producer of raw (untrusted) UI documents
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

impl<F> Generator for F
where
    F: Fn(&GenerationRequest) -> Result<String, GeneratorError>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self(request)
    }
}

/// Ask `generator` for a UI matching `intent` and validate the answer
pub fn generate_ui<G>(generator: &G, intent: &str, config: &UiConfig) -> Result<Ui, UiError>
where
    G: Generator + ?Sized,
{
    let request = GenerationRequest::for_intent(intent);
    tracing::debug!(intent = intent.trim(), "requesting UI from generator");

    let raw = generator.generate(&request).map_err(|e| {
        tracing::warn!(error = %e, "generator call failed");
        e
    })?;
    if raw.trim().is_empty() {
        tracing::warn!("generator returned empty output");
        return Err(GeneratorError::Empty.into());
    }

    crate::parse_ui_with_config(&raw, config)
}

/// [`generate_ui`] followed by markup rendering
pub fn generate_markup<G>(generator: &G, intent: &str, config: &UiConfig) -> Result<String, UiError>
where
    G: Generator + ?Sized,
{
    let ui = generate_ui(generator, intent, config)?;
    Ok(render_markup(&ui, &config.markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::cell::Cell;

    const BUTTON: &str = r#"{"components": [{"type": "button", "label": "Go"}]}"#;

    #[test]
    fn test_request_embeds_intent_and_schema() {
        let request = GenerationRequest::for_intent("  a login page ");
        assert!(request.user_prompt.contains("intent: a login page."));
        assert!(request.system_prompt.contains("user interface assistant"));
        assert_eq!(request.schema, ui_schema());
    }

    #[test]
    fn test_generate_ui_from_closure() {
        let generator = |request: &GenerationRequest| -> Result<String, GeneratorError> {
            assert!(request.user_prompt.contains("one button"));
            Ok(BUTTON.to_string())
        };
        let ui = generate_ui(&generator, "one button", &UiConfig::default()).unwrap();
        assert_eq!(ui.count(), 1);
    }

    #[test]
    fn test_generator_called_once() {
        let calls = Cell::new(0);
        let generator = |_: &GenerationRequest| -> Result<String, GeneratorError> {
            calls.set(calls.get() + 1);
            Err(GeneratorError::failed("rate limited"))
        };
        let err = generate_ui(&generator, "x", &UiConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalFailure);
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_output_is_external_failure() {
        let generator =
            |_: &GenerationRequest| -> Result<String, GeneratorError> { Ok("  \n".to_string()) };
        let err = generate_ui(&generator, "x", &UiConfig::default()).unwrap_err();
        assert!(matches!(err, UiError::External(GeneratorError::Empty)));
    }

    #[test]
    fn test_malformed_output_is_not_trusted() {
        let generator = |_: &GenerationRequest| -> Result<String, GeneratorError> {
            Ok(r#"{"components": [{"type": "carousel", "label": ""}]}"#.to_string())
        };
        let err = generate_ui(&generator, "x", &UiConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    }

    #[test]
    fn test_generate_markup() {
        let generator =
            |_: &GenerationRequest| -> Result<String, GeneratorError> { Ok(BUTTON.to_string()) };
        let markup = generate_markup(&generator, "x", &UiConfig::default()).unwrap();
        assert_eq!(markup, "<button>\n  Go\n</button>\n");
    }

    struct Canned(&'static str);

    impl Generator for Canned {
        fn generate(&self, _request: &GenerationRequest) -> Result<String, GeneratorError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_trait_object_generator() {
        let generator: Box<dyn Generator> = Box::new(Canned(BUTTON));
        let ui = generate_ui(generator.as_ref(), "x", &UiConfig::default()).unwrap();
        assert_eq!(ui.components()[0].label(), "Go");
    }
}
