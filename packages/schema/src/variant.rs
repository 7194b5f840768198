use crate::spec::{LayerTokens, RectangleFallback, TextFallback};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named properties crossed with value sets, and the concrete nodes that pick from them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Vec<VariantProperty>,
    #[serde(default)]
    pub nodes: Vec<VariantNodeSpec>,
}

impl VariantConfiguration {
    pub fn property(&self, name: &str) -> Option<&VariantProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantProperty {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl VariantProperty {
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// One concrete rendering of the component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNodeSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Property name to chosen value
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<VariantOverrideSpec>,
}

impl VariantNodeSpec {
    /// Layer overrides keyed by layer name, empty when none are given
    pub fn layer_overrides(&self) -> impl Iterator<Item = (&String, &VariantLayerOverride)> {
        self.overrides.iter().flat_map(|o| o.layers.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOverrideSpec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub layers: BTreeMap<String, VariantLayerOverride>,
}

/// Per-variant replacement of individual layer fields.
///
/// Only the fields that are set replace the base layer's; `tokens` and `fallback` are
/// merged slot by slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantLayerOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<LayerTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackOverride>,
    /// Text layers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// Rectangle layers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

/// Either fallback shape. A document carrying only `fill`/`stroke` reads as the
/// rectangle shape; any typography field makes it the text shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FallbackOverride {
    Rectangle(RectangleFallback),
    Text(TextFallback),
}
