//! Component spec documents
//!
//! The JSON document a designer authors for a component: metadata, the frame, an
//! ordered list of rectangle/text layers and an optional variant configuration.

pub mod error;
pub mod spec;
pub mod variant;

pub use error::{SchemaError, SchemaResult};
pub use spec::{
    ComponentDefinition, ComponentSpec, FrameSpec, LayerKind, LayerSpec, LayerTokens, Padding,
    RectangleFallback, RectangleLayer, SpecMeta, TextFallback, TextLayer,
};
pub use variant::{
    FallbackOverride, VariantConfiguration, VariantLayerOverride, VariantNodeSpec,
    VariantOverrideSpec, VariantProperty,
};

use std::path::Path;

/// Parse a spec document from JSON text
pub fn from_str(source: &str) -> SchemaResult<ComponentSpec> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    let spec = serde_path_to_error::deserialize(&mut deserializer)?;
    deserializer
        .end()
        .map_err(|e| SchemaError::invalid_document(".", e.to_string()))?;
    Ok(spec)
}

pub fn from_slice(source: &[u8]) -> SchemaResult<ComponentSpec> {
    let mut deserializer = serde_json::Deserializer::from_slice(source);
    let spec = serde_path_to_error::deserialize(&mut deserializer)?;
    deserializer
        .end()
        .map_err(|e| SchemaError::invalid_document(".", e.to_string()))?;
    Ok(spec)
}

/// Parse a spec document from an already-decoded JSON value
pub fn from_value(value: serde_json::Value) -> SchemaResult<ComponentSpec> {
    Ok(serde_path_to_error::deserialize(value)?)
}

/// Read and parse a spec document from disk
pub fn load(path: &Path) -> SchemaResult<ComponentSpec> {
    let source = std::fs::read(path).map_err(|source| SchemaError::Io {
        file: path.to_path_buf(),
        source,
    })?;
    from_slice(&source)
}

/// Serialize a spec back to pretty JSON
pub fn to_string_pretty(spec: &ComponentSpec) -> serde_json::Result<String> {
    serde_json::to_string_pretty(spec)
}
