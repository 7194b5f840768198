use crate::variant::VariantConfiguration;
use serde::{Deserialize, Serialize};
use std::fmt;
use swatch_common::Color;

/// Authored description of a UI component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    pub meta: SpecMeta,
    pub component: ComponentDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecMeta {
    /// Unique document id. Empty when the author left it out.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(default)]
    pub name: String,
    pub frame: FrameSpec,
    /// Layers in paint order, bottom first
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantConfiguration>,
}

impl ComponentDefinition {
    /// First layer with the given name
    pub fn find_layer(&self, name: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.find_layer(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSpec {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

impl FrameSpec {
    pub fn padding_horizontal(&self) -> f64 {
        self.padding.and_then(|p| p.horizontal).unwrap_or(0.0)
    }

    pub fn padding_vertical(&self) -> f64 {
        self.padding.and_then(|p| p.vertical).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<f64>,
}

/// Token references by slot. Ids are resolved outside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<String>,
}

impl LayerTokens {
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.typography.is_none()
    }

    /// Referenced ids in slot order: fill, stroke, typography
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        [&self.fill, &self.stroke, &self.typography]
            .into_iter()
            .filter_map(|id| id.as_deref())
    }
}

/// A layer is either a rectangle or a text run, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerSpec {
    Rectangle(RectangleLayer),
    Text(TextLayer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Rectangle,
    Text,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Rectangle => write!(f, "rectangle"),
            LayerKind::Text => write!(f, "text"),
        }
    }
}

impl LayerSpec {
    pub fn name(&self) -> &str {
        match self {
            LayerSpec::Rectangle(layer) => &layer.name,
            LayerSpec::Text(layer) => &layer.name,
        }
    }

    pub fn tokens(&self) -> &LayerTokens {
        match self {
            LayerSpec::Rectangle(layer) => &layer.tokens,
            LayerSpec::Text(layer) => &layer.tokens,
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            LayerSpec::Rectangle(_) => LayerKind::Rectangle,
            LayerSpec::Text(_) => LayerKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleLayer {
    pub name: String,
    #[serde(default, skip_serializing_if = "LayerTokens::is_empty")]
    pub tokens: LayerTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<RectangleFallback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub name: String,
    pub characters: String,
    #[serde(default, skip_serializing_if = "LayerTokens::is_empty")]
    pub tokens: LayerTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<TextFallback>,
}

/// Literal paints used when a rectangle's tokens do not resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RectangleFallback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

/// Literal text style used when a text layer's typography token does not resolve.
///
/// `font_family`, `font_style` and `font_size` are all required for the fallback to
/// be usable; they are optional here so an incomplete fallback still loads and is
/// reported when the layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextFallback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl TextFallback {
    /// Names of the required fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.font_family.is_none() {
            missing.push("fontFamily");
        }
        if self.font_style.is_none() {
            missing.push("fontStyle");
        }
        if self.font_size.is_none() {
            missing.push("fontSize");
        }
        missing
    }
}
