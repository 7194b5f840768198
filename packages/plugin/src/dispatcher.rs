//! # Message dispatcher
//!
//! Drives one plugin session. Messages are handled one at a time, to completion,
//! and every answer goes back through [`Host::post_message`].
//!
//! ```text
//! Idle --start()--> AwaitingUiReady --ui-ready--> Ready --close--> Closed
//! ```
//!
//! A render is prepared entirely in memory before the first host call. If the host
//! refuses part of it, the nodes already created for that request are removed again.

use crate::error::{HostError, PluginError, PluginResult};
use crate::host::{ComponentProps, Host, NodeId, RectangleProps};
use crate::message::{Envelope, PluginMessage, RenderRequest, UiMessage};
use swatch_common::{Color, TokenResolver};
use swatch_renderer::{
    expand_variants, render_component, RenderedComponent, RenderedNode, RenderedVariant,
};
use swatch_schema::ComponentSpec;
use tracing::{debug, info, instrument, warn};

const RECTANGLE_COLOR: Color = Color::rgb(1.0, 0.5, 0.0);
const RECTANGLE_SIZE: f64 = 100.0;
const RECTANGLE_SPACING: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    AwaitingUiReady,
    Ready,
    /// Terminal, every later message is ignored
    Closed,
}

pub struct Dispatcher<H: Host> {
    host: H,
    resolver: Box<dyn TokenResolver>,
    state: DispatcherState,
}

/// Everything a render request will create, computed before touching the host
enum RenderPlan {
    Single {
        name: String,
        description: Option<String>,
        component: RenderedComponent,
    },
    Variants {
        set_name: String,
        variants: Vec<RenderedVariant>,
    },
}

impl RenderPlan {
    fn prepare(spec: &ComponentSpec, resolver: &dyn TokenResolver) -> Self {
        let component = &spec.component;
        match &component.variants {
            Some(variants) => RenderPlan::Variants {
                set_name: variants
                    .name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| component.name.clone()),
                variants: expand_variants(component, variants, resolver),
            },
            None => RenderPlan::Single {
                name: component.name.clone(),
                description: spec.meta.description.clone(),
                component: render_component(component, resolver),
            },
        }
    }

    fn warnings(&self) -> Vec<String> {
        match self {
            RenderPlan::Single { component, .. } => {
                component.conditions.iter().map(|c| c.to_string()).collect()
            }
            RenderPlan::Variants { variants, .. } => variants
                .iter()
                .flat_map(|variant| {
                    variant
                        .component
                        .conditions
                        .iter()
                        .map(move |c| format!("variant '{}': {}", variant.name, c))
                })
                .collect(),
        }
    }
}

impl<H: Host> Dispatcher<H> {
    pub fn new(host: H, resolver: impl TokenResolver + 'static) -> Self {
        Self {
            host,
            resolver: Box::new(resolver),
            state: DispatcherState::Idle,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Show the UI and wait for it to report ready. Only valid from `Idle`.
    pub fn start(&mut self) {
        if self.state != DispatcherState::Idle {
            warn!(state = ?self.state, "Dispatcher already started");
            return;
        }
        self.host.show_ui();
        self.state = DispatcherState::AwaitingUiReady;
        info!("Waiting for UI");
    }

    /// Parse a raw envelope and handle it
    pub fn handle_json(&mut self, raw: &str) -> PluginResult<()> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        self.handle(&envelope);
        Ok(())
    }

    /// Handle one message envelope from the UI
    #[instrument(skip_all, fields(message_type = %envelope.message_type, state = ?self.state))]
    pub fn handle(&mut self, envelope: &Envelope) {
        let message = match PluginMessage::decode(envelope) {
            Ok(message) => message,
            Err(PluginError::UnknownMessageType(message_type)) => {
                warn!(message_type = %message_type, "Dropping unknown message");
                return;
            }
            Err(err) => {
                warn!(error = %err, "Dropping malformed message");
                if self.state == DispatcherState::Ready {
                    self.host.post_message(UiMessage::Error {
                        errors: vec![err.to_string()],
                    });
                }
                return;
            }
        };

        match (self.state, message) {
            (DispatcherState::AwaitingUiReady, PluginMessage::UiReady) => {
                self.state = DispatcherState::Ready;
                self.host.post_message(UiMessage::Ready);
                info!("UI ready");
            }
            (DispatcherState::Ready, PluginMessage::RenderSpec(request)) => {
                self.render_spec(request);
            }
            (DispatcherState::Ready, PluginMessage::CreateRectangle { count }) => {
                self.create_rectangles(count);
            }
            (DispatcherState::Ready, PluginMessage::UnscopeCollections { prefix }) => {
                self.unscope_collections(&prefix);
            }
            (DispatcherState::Ready, PluginMessage::Close) => {
                self.state = DispatcherState::Closed;
                self.host.close();
                info!("Plugin closed");
            }
            (state, message) => {
                warn!(
                    state = ?state,
                    message_type = message.message_type(),
                    "Ignoring message in current state"
                );
            }
        }
    }

    fn render_spec(&mut self, request: RenderRequest) {
        let summary = swatch_validator::validate(&request.spec, &request.source);
        if !summary.is_valid() {
            info!(spec = %summary.id, errors = summary.errors.len(), "Spec failed validation");
            self.host.post_message(UiMessage::RenderFailed {
                id: summary.id,
                errors: summary.errors,
            });
            return;
        }

        let plan = RenderPlan::prepare(&request.spec, self.resolver.as_ref());
        let warnings = plan.warnings();

        let mut created = Vec::new();
        let mut roots = Vec::new();
        match self.commit(&plan, &mut created, &mut roots) {
            Ok(focus) => {
                self.host.select_and_focus(&[focus]);
                info!(
                    spec = %summary.id,
                    nodes = created.len(),
                    warnings = warnings.len(),
                    "Rendered spec"
                );
                self.host.post_message(UiMessage::Rendered {
                    id: summary.id,
                    node_ids: created.iter().map(|id| id.to_string()).collect(),
                    warnings,
                });
            }
            Err(err) => {
                warn!(spec = %summary.id, error = %err, "Host rejected render");
                self.discard(&roots);
                self.host.post_message(UiMessage::RenderFailed {
                    id: summary.id,
                    errors: vec![err.to_string()],
                });
            }
        }
    }

    /// Create the planned nodes. Returns the node to select.
    fn commit(
        &mut self,
        plan: &RenderPlan,
        created: &mut Vec<NodeId>,
        roots: &mut Vec<NodeId>,
    ) -> PluginResult<NodeId> {
        match plan {
            RenderPlan::Single {
                name,
                description,
                component,
            } => {
                let root =
                    self.create_component(name, description.clone(), component, created, roots)?;
                Ok(root)
            }
            RenderPlan::Variants { set_name, variants } => {
                for variant in variants {
                    self.create_component(
                        &variant.name,
                        variant.description.clone(),
                        &variant.component,
                        created,
                        roots,
                    )?;
                }
                let set = self.host.combine_as_variants(roots, set_name)?;
                created.push(set.clone());
                Ok(set)
            }
        }
    }

    fn create_component(
        &mut self,
        name: &str,
        description: Option<String>,
        component: &RenderedComponent,
        created: &mut Vec<NodeId>,
        roots: &mut Vec<NodeId>,
    ) -> Result<NodeId, HostError> {
        let frame = component.frame;
        let root = self.host.create_component(&ComponentProps {
            name: name.to_string(),
            width: frame.width,
            height: frame.height,
            description,
        })?;
        created.push(root.clone());
        roots.push(root.clone());

        // Layers fill the content box, inset by the frame padding
        let (width, height) = frame.content_size();
        let (x, y) = (frame.padding_horizontal, frame.padding_vertical);

        for child in &component.children {
            let id = match child {
                RenderedNode::Rectangle(rect) => self.host.create_rectangle(
                    Some(&root),
                    &RectangleProps {
                        name: rect.name.clone(),
                        x,
                        y,
                        width,
                        height,
                        fill: rect.fill.as_ref().map(|paint| paint.color),
                        stroke: rect.stroke.as_ref().map(|paint| paint.color),
                        corner_radius: rect.corner_radius,
                    },
                )?,
                RenderedNode::Text(text) => self.host.create_text(&root, x, y, text)?,
            };
            created.push(id);
        }

        debug!(
            component = %name,
            node = %root,
            children = component.children.len(),
            "Created component"
        );
        Ok(root)
    }

    /// Best-effort removal of nodes created by a failed request
    fn discard(&mut self, roots: &[NodeId]) {
        for id in roots {
            if let Err(err) = self.host.remove_node(id) {
                warn!(node = %id, error = %err, "Could not remove node");
            }
        }
    }

    fn create_rectangles(&mut self, count: u32) {
        let mut created = Vec::new();
        for index in 0..count {
            let props = RectangleProps {
                name: "Rectangle".to_string(),
                x: f64::from(index) * RECTANGLE_SPACING,
                y: 0.0,
                width: RECTANGLE_SIZE,
                height: RECTANGLE_SIZE,
                fill: Some(RECTANGLE_COLOR),
                stroke: None,
                corner_radius: None,
            };
            match self.host.create_rectangle(None, &props) {
                Ok(id) => created.push(id),
                Err(err) => {
                    warn!(error = %err, "Host rejected rectangle");
                    self.discard(&created);
                    self.host.post_message(UiMessage::Error {
                        errors: vec![PluginError::from(err).to_string()],
                    });
                    return;
                }
            }
        }

        self.host.select_and_focus(&created);
        info!(count = created.len(), "Created rectangles");
        self.host.post_message(UiMessage::RectanglesCreated {
            node_ids: created.iter().map(|id| id.to_string()).collect(),
        });
    }

    /// Clear the scopes of every variable in collections whose name starts with `prefix`
    fn unscope_collections(&mut self, prefix: &str) {
        if prefix.is_empty() {
            self.host.post_message(UiMessage::Error {
                errors: vec!["collection prefix must not be empty".to_string()],
            });
            return;
        }

        let mut collections = 0;
        let mut variables = 0;
        let mut errors = Vec::new();

        for collection in self.host.variable_collections() {
            if !collection.name.starts_with(prefix) {
                continue;
            }
            collections += 1;
            for variable in &collection.variables {
                match self.host.set_variable_scopes(&variable.id, &[]) {
                    Ok(()) => variables += 1,
                    Err(err) => errors.push(PluginError::from(err).to_string()),
                }
            }
            debug!(
                collection = %collection.name,
                variables = collection.variables.len(),
                "Unscoped collection"
            );
        }

        if !errors.is_empty() {
            warn!(failed = errors.len(), "Some variables could not be unscoped");
            self.host.post_message(UiMessage::Error { errors });
            return;
        }

        self.host.notify(&format!(
            "Unscoped {} variables in {} collections",
            variables, collections
        ));
        self.host.post_message(UiMessage::CollectionsUnscoped {
            collections,
            variables,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Variable, VariableCollection};
    use crate::memory_host::{MemoryHost, MemoryNodeKind};
    use serde_json::json;
    use swatch_common::TokenSet;

    fn ready(host: MemoryHost) -> Dispatcher<MemoryHost> {
        let mut dispatcher = Dispatcher::new(host, TokenSet::new());
        dispatcher.start();
        dispatcher.handle(&Envelope::new("ui-ready"));
        dispatcher.host_mut().take_outbox();
        dispatcher
    }

    #[test]
    fn test_start_and_ui_ready() {
        let mut dispatcher = Dispatcher::new(MemoryHost::new(), TokenSet::new());
        assert_eq!(dispatcher.state(), DispatcherState::Idle);

        dispatcher.start();
        assert_eq!(dispatcher.state(), DispatcherState::AwaitingUiReady);
        assert!(dispatcher.host().is_ui_visible());

        dispatcher.handle(&Envelope::new("ui-ready"));
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
        assert_eq!(dispatcher.host().outbox(), &[UiMessage::Ready]);
    }

    #[test]
    fn test_messages_before_ui_ready_are_ignored() {
        let mut dispatcher = Dispatcher::new(MemoryHost::new(), TokenSet::new());
        dispatcher.handle(&Envelope::new("ui-ready"));
        assert_eq!(dispatcher.state(), DispatcherState::Idle);

        dispatcher.start();
        dispatcher.handle(&Envelope::new("create-rectangle"));
        assert_eq!(dispatcher.state(), DispatcherState::AwaitingUiReady);
        assert!(dispatcher.host().nodes().is_empty());
        assert!(dispatcher.host().outbox().is_empty());
    }

    #[test]
    fn test_create_rectangles() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.handle(&Envelope::new("create-rectangle").with_payload(json!({ "count": 3 })));

        let host = dispatcher.host();
        assert_eq!(host.nodes().len(), 3);
        match &host.nodes()[2].kind {
            MemoryNodeKind::Rectangle { x, fill, .. } => {
                assert_eq!(*x, 300.0);
                assert_eq!(*fill, Some(RECTANGLE_COLOR));
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
        assert_eq!(host.selection().len(), 3);
        assert_eq!(
            host.outbox(),
            &[UiMessage::RectanglesCreated {
                node_ids: vec!["1:1".to_string(), "1:2".to_string(), "1:3".to_string()],
            }]
        );
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
    }

    #[test]
    fn test_oversized_rectangle_count_is_refused() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.handle(
            &Envelope::new("create-rectangle").with_payload(json!({ "count": u32::MAX })),
        );

        let host = dispatcher.host();
        assert!(host.nodes().is_empty());
        assert_eq!(host.outbox().len(), 1);
        assert!(host.outbox()[0].is_failure());
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
    }

    #[test]
    fn test_malformed_payload_is_answered_with_errors() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.handle(&Envelope::new("unscope-collections").with_payload(json!({ "prefix": 3 })));

        let outbox = dispatcher.host().outbox();
        assert_eq!(outbox.len(), 1);
        assert!(outbox[0].is_failure());
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
    }

    #[test]
    fn test_unknown_message_is_dropped() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.handle(&Envelope::new("resize"));
        assert!(dispatcher.host().outbox().is_empty());
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
    }

    #[test]
    fn test_handle_json_rejects_non_envelopes() {
        let mut dispatcher = ready(MemoryHost::new());
        assert!(matches!(
            dispatcher.handle_json("[1, 2]"),
            Err(PluginError::Malformed(_))
        ));
        dispatcher.handle_json(r#"{ "type": "close" }"#).unwrap();
        assert_eq!(dispatcher.state(), DispatcherState::Closed);
    }

    #[test]
    fn test_unscope_matches_collection_prefix() {
        let variable = |id: &str| Variable {
            id: id.to_string(),
            name: id.to_string(),
            scopes: vec!["ALL_SCOPES".to_string()],
        };
        let host = MemoryHost::new().with_collections(vec![
            VariableCollection {
                id: "c1".to_string(),
                name: "swatch/primitives".to_string(),
                variables: vec![variable("v1"), variable("v2")],
            },
            VariableCollection {
                id: "c2".to_string(),
                name: "local".to_string(),
                variables: vec![variable("v3")],
            },
        ]);
        let mut dispatcher = ready(host);

        dispatcher.handle(
            &Envelope::new("unscope-collections").with_payload(json!({ "prefix": "swatch/" })),
        );

        let host = dispatcher.host();
        assert_eq!(
            host.outbox(),
            &[UiMessage::CollectionsUnscoped {
                collections: 1,
                variables: 2,
            }]
        );
        assert!(host.collections()[0].variables.iter().all(|v| v.scopes.is_empty()));
        assert_eq!(host.collections()[1].variables[0].scopes.len(), 1);
        assert_eq!(host.notifications().len(), 1);
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.handle(&Envelope::new("unscope-collections").with_payload(json!({ "prefix": "" })));
        assert!(dispatcher.host().outbox()[0].is_failure());
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let mut dispatcher = ready(MemoryHost::new());
        dispatcher.start();
        assert_eq!(dispatcher.state(), DispatcherState::Ready);
    }
}
