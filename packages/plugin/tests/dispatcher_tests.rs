//! End-to-end plugin sessions against the in-memory host

use serde_json::{json, Value};
use swatch_common::{Color, ResolvedStyle, TokenSet, TypographyStyle};
use swatch_plugin::{Dispatcher, DispatcherState, Envelope, MemoryHost, MemoryNodeKind, UiMessage};

fn tokens() -> TokenSet {
    TokenSet::new()
        .with_token("color.primary", ResolvedStyle::Paint { color: Color::rgb(0.0, 0.4, 1.0) })
        .with_token(
            "type.button",
            ResolvedStyle::Typography(TypographyStyle {
                font_family: "Inter".to_string(),
                font_style: "Semi Bold".to_string(),
                font_size: 14.0,
                line_height: Some(20.0),
                letter_spacing: None,
            }),
        )
}

fn session() -> Dispatcher<MemoryHost> {
    let mut dispatcher = Dispatcher::new(MemoryHost::new(), tokens());
    dispatcher.start();
    dispatcher.handle(&Envelope::new("ui-ready"));
    dispatcher.host_mut().take_outbox();
    dispatcher
}

fn render(spec: Value) -> Envelope {
    Envelope::new("render-spec").with_payload(json!({ "spec": spec, "source": "test" }))
}

fn button() -> Value {
    json!({
        "meta": { "id": "button", "title": "Button", "description": "Primary action" },
        "component": {
            "name": "Button",
            "frame": { "width": 120, "height": 40, "padding": { "horizontal": 16, "vertical": 8 } },
            "layers": [
                { "kind": "rectangle", "name": "bg", "tokens": { "fill": "color.primary" }, "cornerRadius": 6 },
                { "kind": "text", "name": "label", "characters": "Save",
                  "tokens": { "typography": "type.button", "fill": "color.on-primary" } }
            ]
        }
    })
}

fn sized_button() -> Value {
    let mut spec = button();
    spec["component"]["variants"] = json!({
        "name": "Button",
        "properties": [ { "name": "size", "values": ["sm", "lg"] } ],
        "nodes": [
            { "id": "sm", "properties": { "size": "sm" } },
            { "id": "lg", "properties": { "size": "lg" },
              "overrides": { "layers": { "label": { "characters": "Save changes" } } } }
        ]
    });
    spec
}

#[test]
fn test_renders_single_component() {
    let mut dispatcher = session();
    dispatcher.handle(&render(button()));

    let host = dispatcher.host();
    let outbox = host.outbox();
    assert_eq!(outbox.len(), 1);
    match &outbox[0] {
        UiMessage::Rendered { id, node_ids, warnings } => {
            assert_eq!(id, "button");
            assert_eq!(node_ids, &vec!["1:1".to_string(), "1:2".to_string(), "1:3".to_string()]);
            // color.on-primary is not in the token set and the label has no fill fallback
            assert_eq!(warnings.len(), 1);
            assert!(warnings[0].contains("color.on-primary"));
        }
        other => panic!("expected rendered, got {other:?}"),
    }

    let root = &host.nodes()[0];
    assert_eq!(root.name, "Button");
    assert!(matches!(
        root.kind,
        MemoryNodeKind::Component { width, height, .. } if width == 120.0 && height == 40.0
    ));
    match &host.nodes()[1].kind {
        MemoryNodeKind::Rectangle { x, y, width, height, fill, corner_radius, .. } => {
            assert_eq!((*x, *y), (16.0, 8.0));
            assert_eq!((*width, *height), (88.0, 24.0));
            assert_eq!(*fill, Some(Color::rgb(0.0, 0.4, 1.0)));
            assert_eq!(*corner_radius, Some(6.0));
        }
        other => panic!("expected rectangle, got {other:?}"),
    }
    assert_eq!(host.selection(), &[root.id.clone()]);
    assert_eq!(dispatcher.state(), DispatcherState::Ready);
}

#[test]
fn test_renders_variants_into_a_set() {
    let mut dispatcher = session();
    dispatcher.handle(&render(sized_button()));

    let host = dispatcher.host();
    let components: Vec<_> = host
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, MemoryNodeKind::Component { .. }))
        .collect();
    let names: Vec<_> = components.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["size=sm", "size=lg"]);

    let set = host
        .nodes()
        .iter()
        .find(|n| n.kind == MemoryNodeKind::ComponentSet)
        .unwrap();
    assert_eq!(set.name, "Button");
    assert_eq!(host.children(&set.id).len(), 2);
    assert_eq!(host.selection(), &[set.id.clone()]);

    let lg_label = host
        .children(&components[1].id)
        .into_iter()
        .find(|n| n.name == "label")
        .unwrap();
    match &lg_label.kind {
        MemoryNodeKind::Text { characters, typography, .. } => {
            assert_eq!(characters, "Save changes");
            assert_eq!(typography.font_style, "Semi Bold");
        }
        other => panic!("expected text, got {other:?}"),
    }

    match &host.outbox()[0] {
        UiMessage::Rendered { node_ids, warnings, .. } => {
            assert_eq!(node_ids.len(), 7);
            assert_eq!(node_ids.last(), Some(&set.id.to_string()));
            assert!(warnings.iter().all(|w| w.starts_with("variant 'size=")));
        }
        other => panic!("expected rendered, got {other:?}"),
    }
}

#[test]
fn test_invalid_spec_fails_without_creating_nodes() {
    let mut spec = sized_button();
    spec["component"]["variants"]["nodes"] = json!([{ "id": "v1", "properties": { "size": "xl" } }]);

    let mut dispatcher = session();
    dispatcher.handle(&render(spec));

    let host = dispatcher.host();
    assert!(host.nodes().is_empty());
    match &host.outbox()[0] {
        UiMessage::RenderFailed { id, errors } => {
            assert_eq!(id, "button");
            assert!(errors.iter().any(|e| e.contains("\"xl\"")));
        }
        other => panic!("expected render-failed, got {other:?}"),
    }
    assert_eq!(dispatcher.state(), DispatcherState::Ready);
}

#[test]
fn test_host_rejection_removes_partial_render() {
    // The padding leaves no room for the rectangle, which the host refuses
    let spec = json!({
        "meta": { "id": "chip", "title": "Chip" },
        "component": {
            "name": "Chip",
            "frame": { "width": 10, "height": 10, "padding": { "horizontal": 5 } },
            "layers": [ { "kind": "rectangle", "name": "bg", "fallback": { "fill": "#eeeeee" } } ]
        }
    });

    let mut dispatcher = session();
    dispatcher.handle(&render(spec));

    let host = dispatcher.host();
    assert!(host.nodes().is_empty());
    assert!(host.selection().is_empty());
    match &host.outbox()[0] {
        UiMessage::RenderFailed { id, errors } => {
            assert_eq!(id, "chip");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Host error:"));
            assert!(errors[0].contains("bg"));
        }
        other => panic!("expected render-failed, got {other:?}"),
    }
    assert_eq!(dispatcher.state(), DispatcherState::Ready);
}

#[test]
fn test_unparseable_spec_is_answered_with_path() {
    let mut spec = button();
    spec["component"]["layers"][0]["cornerRadius"] = json!("round");

    let mut dispatcher = session();
    dispatcher.handle(&render(spec));

    let errors = dispatcher.host().outbox()[0].errors().unwrap().to_vec();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("component.layers[0]"));
}

#[test]
fn test_close_is_terminal() {
    let mut dispatcher = session();
    dispatcher.handle(&Envelope::new("close"));

    assert_eq!(dispatcher.state(), DispatcherState::Closed);
    assert!(dispatcher.host().is_closed());

    dispatcher.handle(&render(button()));
    dispatcher.handle(&Envelope::new("create-rectangle"));
    dispatcher.handle(&Envelope::new("ui-ready"));
    dispatcher.handle(&Envelope::new("render-spec").with_payload(json!({ "spec": 1 })));

    let host = dispatcher.into_host();
    assert!(host.nodes().is_empty());
    assert!(host.outbox().is_empty());
}

#[test]
fn test_outbound_messages_serialize_to_wire_format() {
    let mut dispatcher = session();
    dispatcher.handle(&render(button()));

    let wire = serde_json::to_value(&dispatcher.host().outbox()[0]).unwrap();
    assert_eq!(wire["type"], "rendered");
    assert_eq!(wire["payload"]["id"], "button");
    assert_eq!(wire["payload"]["nodeIds"][0], "1:1");
}
