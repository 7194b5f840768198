use crate::error::{PluginError, PluginResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use swatch_schema::ComponentSpec;

/// Wire shape shared by both directions: `{ "type": ..., "payload"?: {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Envelope {
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Message sent from the plugin UI
#[derive(Debug, Clone, PartialEq)]
pub enum PluginMessage {
    UiReady,
    CreateRectangle { count: u32 },
    RenderSpec(RenderRequest),
    UnscopeCollections { prefix: String },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub spec: ComponentSpec,
    /// Provenance for the summary, `"ui"` when the UI does not say
    pub source: String,
}

#[derive(Deserialize)]
struct CreateRectanglePayload {
    #[serde(default = "default_rectangle_count")]
    count: u32,
}

fn default_rectangle_count() -> u32 {
    5
}

/// Largest batch a single create-rectangle message may ask for
pub const MAX_RECTANGLE_COUNT: u32 = 1000;

#[derive(Deserialize)]
struct RenderSpecPayload {
    spec: Value,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Deserialize)]
struct UnscopePayload {
    prefix: String,
}

impl PluginMessage {
    /// Decode an envelope by its `type`.
    ///
    /// Unknown types are [`PluginError::UnknownMessageType`]; a known type whose
    /// payload does not fit is [`PluginError::InvalidPayload`].
    pub fn decode(envelope: &Envelope) -> PluginResult<Self> {
        match envelope.message_type.as_str() {
            "ui-ready" => Ok(PluginMessage::UiReady),
            "close" => Ok(PluginMessage::Close),
            "create-rectangle" => {
                let payload: CreateRectanglePayload = decode_payload(envelope)?;
                if payload.count > MAX_RECTANGLE_COUNT {
                    return Err(invalid_payload(
                        envelope,
                        format!(
                            "count must be at most {}, got {}",
                            MAX_RECTANGLE_COUNT, payload.count
                        ),
                    ));
                }
                Ok(PluginMessage::CreateRectangle {
                    count: payload.count,
                })
            }
            "render-spec" => {
                let payload: RenderSpecPayload = decode_payload(envelope)?;
                let spec = swatch_schema::from_value(payload.spec)
                    .map_err(|e| invalid_payload(envelope, e.to_string()))?;
                Ok(PluginMessage::RenderSpec(RenderRequest {
                    spec,
                    source: payload.source.unwrap_or_else(|| "ui".to_string()),
                }))
            }
            "unscope-collections" => {
                let payload: UnscopePayload = decode_payload(envelope)?;
                Ok(PluginMessage::UnscopeCollections {
                    prefix: payload.prefix,
                })
            }
            other => Err(PluginError::UnknownMessageType(other.to_string())),
        }
    }

    pub fn message_type(&self) -> &'static str {
        match self {
            PluginMessage::UiReady => "ui-ready",
            PluginMessage::CreateRectangle { .. } => "create-rectangle",
            PluginMessage::RenderSpec(_) => "render-spec",
            PluginMessage::UnscopeCollections { .. } => "unscope-collections",
            PluginMessage::Close => "close",
        }
    }
}

fn decode_payload<T: DeserializeOwned>(envelope: &Envelope) -> PluginResult<T> {
    let payload = envelope
        .payload
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()));
    serde_json::from_value(payload).map_err(|e| invalid_payload(envelope, e.to_string()))
}

fn invalid_payload(envelope: &Envelope, message: String) -> PluginError {
    PluginError::InvalidPayload {
        message_type: envelope.message_type.clone(),
        message,
    }
}

/// Message posted back to the plugin UI. Failures always carry an `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum UiMessage {
    Ready,
    #[serde(rename_all = "camelCase")]
    Rendered {
        id: String,
        node_ids: Vec<String>,
        warnings: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    RenderFailed { id: String, errors: Vec<String> },
    #[serde(rename_all = "camelCase")]
    RectanglesCreated { node_ids: Vec<String> },
    #[serde(rename_all = "camelCase")]
    CollectionsUnscoped { collections: usize, variables: usize },
    #[serde(rename_all = "camelCase")]
    Error { errors: Vec<String> },
}

impl UiMessage {
    /// Errors carried by a failure message
    pub fn errors(&self) -> Option<&[String]> {
        match self {
            UiMessage::RenderFailed { errors, .. } | UiMessage::Error { errors } => Some(errors),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.errors().is_some()
    }
}
