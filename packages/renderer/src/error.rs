use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("text layer '{layer}' has no resolvable typography token and its fallback is missing {}", missing.join(", "))]
    MissingFallback { layer: String, missing: Vec<String> },
}

impl RenderError {
    pub fn missing_fallback(layer: impl Into<String>, missing: &[&str]) -> Self {
        Self::MissingFallback {
            layer: layer.into(),
            missing: missing.iter().map(|field| field.to_string()).collect(),
        }
    }
}
