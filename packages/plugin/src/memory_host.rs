use crate::error::HostError;
use crate::host::{ComponentProps, Host, NodeId, RectangleProps, VariableCollection};
use crate::message::UiMessage;
use serde::Serialize;
use swatch_common::{Color, TypographyStyle};
use swatch_renderer::TextNode;
use tracing::debug;

/// Smallest width or height the host accepts for a frame or shape
pub const MIN_NODE_SIZE: f64 = 0.01;

/// In-memory host used by tests and the `simulate` command
///
/// Records every call and assigns ids in the `1:1`, `1:2`, ... form.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    outbox: Vec<UiMessage>,
    selection: Vec<NodeId>,
    notifications: Vec<String>,
    collections: Vec<VariableCollection>,
    ui_visible: bool,
    closed: bool,
    #[serde(skip)]
    next_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryNode {
    pub id: NodeId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(flatten)]
    pub kind: MemoryNodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MemoryNodeKind {
    #[serde(rename_all = "camelCase")]
    Component {
        width: f64,
        height: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<Color>,
        #[serde(skip_serializing_if = "Option::is_none")]
        corner_radius: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        x: f64,
        y: f64,
        characters: String,
        typography: TypographyStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
    },
    ComponentSet,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(mut self, collections: Vec<VariableCollection>) -> Self {
        self.collections = collections;
        self
    }

    /// Live nodes in creation order
    pub fn nodes(&self) -> &[MemoryNode] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&MemoryNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn children(&self, parent: &NodeId) -> Vec<&MemoryNode> {
        self.nodes
            .iter()
            .filter(|node| node.parent.as_ref() == Some(parent))
            .collect()
    }

    pub fn outbox(&self) -> &[UiMessage] {
        &self.outbox
    }

    pub fn take_outbox(&mut self) -> Vec<UiMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn collections(&self) -> &[VariableCollection] {
        &self.collections
    }

    pub fn is_ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn insert(&mut self, name: &str, parent: Option<&NodeId>, kind: MemoryNodeKind) -> NodeId {
        self.next_id += 1;
        let id = NodeId(format!("1:{}", self.next_id));
        debug!(node = %id, name = %name, "Created node");
        self.nodes.push(MemoryNode {
            id: id.clone(),
            name: name.to_string(),
            parent: parent.cloned(),
            kind,
        });
        id
    }

    fn require(&self, id: &NodeId) -> Result<(), HostError> {
        match self.node(id) {
            Some(_) => Ok(()),
            None => Err(HostError::NodeNotFound(id.to_string())),
        }
    }
}

fn check_size(node: &str, width: f64, height: f64) -> Result<(), HostError> {
    for (what, value) in [("width", width), ("height", height)] {
        if !value.is_finite() || value < MIN_NODE_SIZE {
            return Err(HostError::InvalidGeometry {
                node: node.to_string(),
                message: format!("{} must be at least {}, got {}", what, MIN_NODE_SIZE, value),
            });
        }
    }
    Ok(())
}

fn check_position(node: &str, x: f64, y: f64) -> Result<(), HostError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(HostError::InvalidGeometry {
            node: node.to_string(),
            message: format!("position ({}, {}) is not finite", x, y),
        })
    }
}

impl Host for MemoryHost {
    fn show_ui(&mut self) {
        self.ui_visible = true;
    }

    fn post_message(&mut self, message: UiMessage) {
        self.outbox.push(message);
    }

    fn create_component(&mut self, props: &ComponentProps) -> Result<NodeId, HostError> {
        check_size(&props.name, props.width, props.height)?;
        Ok(self.insert(
            &props.name,
            None,
            MemoryNodeKind::Component {
                width: props.width,
                height: props.height,
                description: props.description.clone(),
            },
        ))
    }

    fn create_rectangle(
        &mut self,
        parent: Option<&NodeId>,
        props: &RectangleProps,
    ) -> Result<NodeId, HostError> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }
        check_size(&props.name, props.width, props.height)?;
        check_position(&props.name, props.x, props.y)?;
        if let Some(radius) = props.corner_radius.filter(|r| !r.is_finite() || *r < 0.0) {
            return Err(HostError::InvalidGeometry {
                node: props.name.clone(),
                message: format!("cornerRadius must be non-negative, got {}", radius),
            });
        }

        Ok(self.insert(
            &props.name,
            parent,
            MemoryNodeKind::Rectangle {
                x: props.x,
                y: props.y,
                width: props.width,
                height: props.height,
                fill: props.fill,
                stroke: props.stroke,
                corner_radius: props.corner_radius,
            },
        ))
    }

    fn create_text(
        &mut self,
        parent: &NodeId,
        x: f64,
        y: f64,
        text: &TextNode,
    ) -> Result<NodeId, HostError> {
        self.require(parent)?;
        check_position(&text.name, x, y)?;
        let font_size = text.typography.font_size;
        if !font_size.is_finite() || font_size < 1.0 {
            return Err(HostError::InvalidGeometry {
                node: text.name.clone(),
                message: format!("fontSize must be at least 1, got {}", font_size),
            });
        }

        Ok(self.insert(
            &text.name,
            Some(parent),
            MemoryNodeKind::Text {
                x,
                y,
                characters: text.characters.clone(),
                typography: text.typography.clone(),
                fill: text.fill.as_ref().map(|paint| paint.color),
            },
        ))
    }

    fn combine_as_variants(&mut self, nodes: &[NodeId], name: &str) -> Result<NodeId, HostError> {
        if nodes.is_empty() {
            return Err(HostError::Rejected(
                "cannot combine an empty list of nodes".to_string(),
            ));
        }
        for id in nodes {
            match self.node(id).map(|node| &node.kind) {
                Some(MemoryNodeKind::Component { .. }) => {}
                Some(_) => {
                    return Err(HostError::Rejected(format!(
                        "node '{}' is not a component",
                        id
                    )))
                }
                None => return Err(HostError::NodeNotFound(id.to_string())),
            }
        }

        let set = self.insert(name, None, MemoryNodeKind::ComponentSet);
        for node in self.nodes.iter_mut().filter(|node| nodes.contains(&node.id)) {
            node.parent = Some(set.clone());
        }
        Ok(set)
    }

    fn remove_node(&mut self, node: &NodeId) -> Result<(), HostError> {
        self.require(node)?;

        let mut doomed = vec![node.clone()];
        let mut index = 0;
        while index < doomed.len() {
            let current = doomed[index].clone();
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|n| n.parent.as_ref() == Some(&current))
                    .map(|n| n.id.clone()),
            );
            index += 1;
        }

        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.selection.retain(|id| !doomed.contains(id));
        debug!(node = %node, removed = doomed.len(), "Removed node");
        Ok(())
    }

    fn select_and_focus(&mut self, nodes: &[NodeId]) {
        self.selection = nodes.to_vec();
    }

    fn variable_collections(&self) -> Vec<VariableCollection> {
        self.collections.clone()
    }

    fn set_variable_scopes(
        &mut self,
        variable_id: &str,
        scopes: &[String],
    ) -> Result<(), HostError> {
        let variable = self
            .collections
            .iter_mut()
            .flat_map(|collection| collection.variables.iter_mut())
            .find(|variable| variable.id == variable_id)
            .ok_or_else(|| HostError::VariableNotFound(variable_id.to_string()))?;
        variable.scopes = scopes.to_vec();
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn close(&mut self) {
        self.ui_visible = false;
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Variable;

    fn frame(name: &str, width: f64) -> ComponentProps {
        ComponentProps {
            name: name.to_string(),
            width,
            height: 32.0,
            description: None,
        }
    }

    fn rect(name: &str) -> RectangleProps {
        RectangleProps {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            fill: None,
            stroke: None,
            corner_radius: None,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut host = MemoryHost::new();
        let a = host.create_component(&frame("A", 10.0)).unwrap();
        let b = host.create_rectangle(Some(&a), &rect("bg")).unwrap();

        assert_eq!(a.as_str(), "1:1");
        assert_eq!(b.as_str(), "1:2");
        assert_eq!(host.children(&a).len(), 1);
    }

    #[test]
    fn test_rejects_degenerate_frames() {
        let mut host = MemoryHost::new();
        let err = host.create_component(&frame("A", 0.0)).unwrap_err();
        assert!(matches!(err, HostError::InvalidGeometry { .. }));
        assert!(host.nodes().is_empty());
    }

    #[test]
    fn test_remove_node_removes_descendants() {
        let mut host = MemoryHost::new();
        let a = host.create_component(&frame("A", 10.0)).unwrap();
        host.create_rectangle(Some(&a), &rect("bg")).unwrap();
        let other = host.create_rectangle(None, &rect("loose")).unwrap();

        host.remove_node(&a).unwrap();

        let ids: Vec<_> = host.nodes().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![other]);
        assert!(matches!(
            host.remove_node(&a),
            Err(HostError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_combine_requires_components() {
        let mut host = MemoryHost::new();
        let a = host.create_component(&frame("A", 10.0)).unwrap();
        let b = host.create_component(&frame("B", 10.0)).unwrap();
        let loose = host.create_rectangle(None, &rect("loose")).unwrap();

        assert!(host.combine_as_variants(&[a.clone(), loose], "Set").is_err());

        let set = host.combine_as_variants(&[a.clone(), b.clone()], "Set").unwrap();
        assert_eq!(host.node(&a).unwrap().parent.as_ref(), Some(&set));
        assert_eq!(host.children(&set).len(), 2);
    }

    #[test]
    fn test_set_variable_scopes() {
        let mut host = MemoryHost::new().with_collections(vec![VariableCollection {
            id: "c1".to_string(),
            name: "brand/colors".to_string(),
            variables: vec![Variable {
                id: "v1".to_string(),
                name: "primary".to_string(),
                scopes: vec!["ALL_FILLS".to_string()],
            }],
        }]);

        host.set_variable_scopes("v1", &[]).unwrap();
        assert!(host.collections()[0].variables[0].scopes.is_empty());
        assert!(matches!(
            host.set_variable_scopes("missing", &[]),
            Err(HostError::VariableNotFound(_))
        ));
    }
}
