use serde::{Deserialize, Serialize};
use std::fmt;

/// Paint or type slot a token is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSlot {
    Fill,
    Stroke,
    Typography,
}

impl fmt::Display for TokenSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSlot::Fill => write!(f, "fill"),
            TokenSlot::Stroke => write!(f, "stroke"),
            TokenSlot::Typography => write!(f, "typography"),
        }
    }
}

/// Non-fatal note recorded while rendering a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderCondition {
    pub layer: String,
    #[serde(flatten)]
    pub kind: ConditionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "kebab-case")]
pub enum ConditionKind {
    /// Token did not resolve and no fallback covers the slot; the slot is left empty
    TokenMissing { slot: TokenSlot, token: String },
    /// Token resolved to a style of the wrong kind for the slot
    TokenKindMismatch {
        slot: TokenSlot,
        token: String,
        found: String,
    },
    /// Variant override was not applied
    SuppressedOverride { reason: String },
    /// Layer could not be rendered and was left out
    RenderFailed { message: String },
}

impl RenderCondition {
    pub fn new(layer: impl Into<String>, kind: ConditionKind) -> Self {
        Self {
            layer: layer.into(),
            kind,
        }
    }

    pub fn token_missing(
        layer: impl Into<String>,
        slot: TokenSlot,
        token: impl Into<String>,
    ) -> Self {
        Self::new(
            layer,
            ConditionKind::TokenMissing {
                slot,
                token: token.into(),
            },
        )
    }

    pub fn suppressed_override(layer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            layer,
            ConditionKind::SuppressedOverride {
                reason: reason.into(),
            },
        )
    }
}

impl fmt::Display for RenderCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConditionKind::TokenMissing { slot, token } => write!(
                f,
                "layer '{}': {} token '{}' did not resolve and no fallback is set",
                self.layer, slot, token
            ),
            ConditionKind::TokenKindMismatch { slot, token, found } => write!(
                f,
                "layer '{}': {} token '{}' resolved to a {} style",
                self.layer, slot, token, found
            ),
            ConditionKind::SuppressedOverride { reason } => {
                write!(f, "layer '{}': override skipped, {}", self.layer, reason)
            }
            ConditionKind::RenderFailed { message } => {
                write!(f, "layer '{}' not rendered: {}", self.layer, message)
            }
        }
    }
}
