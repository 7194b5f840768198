use crate::condition::RenderCondition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use swatch_common::{Color, TypographyStyle};

/// Solid paint, remembering the token it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Paint {
    pub fn literal(color: Color) -> Self {
        Self { color, token: None }
    }

    pub fn from_token(color: Color, token: impl Into<String>) -> Self {
        Self {
            color,
            token: Some(token.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub name: String,
    pub characters: String,
    pub typography: TypographyStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
}

/// Concrete node ready to hand to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderedNode {
    Rectangle(RectangleNode),
    Text(TextNode),
}

impl RenderedNode {
    pub fn name(&self) -> &str {
        match self {
            RenderedNode::Rectangle(node) => &node.name,
            RenderedNode::Text(node) => &node.name,
        }
    }
}

/// Output of rendering a single layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedLayer {
    pub node: RenderedNode,
    pub conditions: Vec<RenderCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameGeometry {
    pub width: f64,
    pub height: f64,
    pub padding_horizontal: f64,
    pub padding_vertical: f64,
}

impl FrameGeometry {
    /// Area inside the padding, never negative
    pub fn content_size(&self) -> (f64, f64) {
        (
            (self.width - 2.0 * self.padding_horizontal).max(0.0),
            (self.height - 2.0 * self.padding_vertical).max(0.0),
        )
    }
}

/// A component frame with its rendered layers in paint order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedComponent {
    pub name: String,
    pub frame: FrameGeometry,
    pub children: Vec<RenderedNode>,
    pub conditions: Vec<RenderCondition>,
}

/// One rendered variant node with its identity and chosen property values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedVariant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub component: RenderedComponent,
}
