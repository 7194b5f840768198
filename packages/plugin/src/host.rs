//! Host capability surface
//!
//! Everything the dispatcher needs from the design tool goes through [`Host`]. The
//! real tool binding lives outside this workspace; [`crate::MemoryHost`] implements
//! the same surface in memory.

use crate::error::HostError;
use crate::message::UiMessage;
use serde::{Deserialize, Serialize};
use std::fmt;
use swatch_common::Color;
use swatch_renderer::TextNode;

/// Identifier the host assigns to a created node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Component frame to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Rectangle to create, positioned relative to its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleProps {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    /// Empty means the variable is hidden from every property picker
    pub scopes: Vec<String>,
}

/// Operations the design tool exposes to the plugin
pub trait Host {
    fn show_ui(&mut self);

    fn post_message(&mut self, message: UiMessage);

    fn create_component(&mut self, props: &ComponentProps) -> Result<NodeId, HostError>;

    /// Create a rectangle inside `parent`, or on the page when `parent` is `None`
    fn create_rectangle(
        &mut self,
        parent: Option<&NodeId>,
        props: &RectangleProps,
    ) -> Result<NodeId, HostError>;

    fn create_text(
        &mut self,
        parent: &NodeId,
        x: f64,
        y: f64,
        text: &TextNode,
    ) -> Result<NodeId, HostError>;

    /// Combine components into a variant set named `name`
    fn combine_as_variants(&mut self, nodes: &[NodeId], name: &str) -> Result<NodeId, HostError>;

    /// Remove a node together with everything inside it
    fn remove_node(&mut self, node: &NodeId) -> Result<(), HostError>;

    /// Select `nodes` and scroll the viewport to them
    fn select_and_focus(&mut self, nodes: &[NodeId]);

    fn variable_collections(&self) -> Vec<VariableCollection>;

    fn set_variable_scopes(
        &mut self,
        variable_id: &str,
        scopes: &[String],
    ) -> Result<(), HostError>;

    fn notify(&mut self, message: &str);

    fn close(&mut self);
}
