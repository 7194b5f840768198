//! Loading and round-tripping complete spec documents

use swatch_common::Color;
use swatch_schema::{FallbackOverride, LayerSpec};

const BUTTON: &str = r##"{
    "meta": {
        "id": "button",
        "title": "Button",
        "description": "Primary call to action",
        "tags": ["action", "form"]
    },
    "component": {
        "name": "Button",
        "frame": { "width": 120, "height": 40, "padding": { "horizontal": 16, "vertical": 8 } },
        "layers": [
            {
                "kind": "rectangle",
                "name": "background",
                "tokens": { "fill": "color.primary", "stroke": "color.border" },
                "cornerRadius": 6,
                "fallback": { "fill": "#3366ff" }
            },
            {
                "kind": "text",
                "name": "label",
                "characters": "Click me",
                "tokens": { "typography": "type.button", "fill": "color.on-primary" },
                "fallback": { "fontFamily": "Inter", "fontStyle": "Medium", "fontSize": 14, "fill": "#ffffff" }
            }
        ],
        "variants": {
            "name": "Button",
            "properties": [
                { "name": "size", "values": ["sm", "lg"] },
                { "name": "state", "values": ["default", "disabled"] }
            ],
            "nodes": [
                { "id": "sm-default", "properties": { "size": "sm", "state": "default" } },
                {
                    "id": "lg-disabled",
                    "name": "Large disabled",
                    "properties": { "size": "lg", "state": "disabled" },
                    "overrides": {
                        "layers": {
                            "background": { "tokens": { "fill": "color.muted" }, "cornerRadius": 8 },
                            "label": { "characters": "Unavailable", "fallback": { "fill": "#999999" } }
                        }
                    }
                }
            ]
        }
    }
}"##;

#[test]
fn test_load_full_document() {
    let spec = swatch_schema::from_str(BUTTON).unwrap();

    assert_eq!(spec.meta.tags, vec!["action", "form"]);
    assert_eq!(spec.component.frame.padding_horizontal(), 16.0);
    assert_eq!(spec.component.frame.padding_vertical(), 8.0);

    match &spec.component.layers[0] {
        LayerSpec::Rectangle(rect) => {
            assert_eq!(rect.corner_radius, Some(6.0));
            assert_eq!(
                rect.fallback.unwrap().fill,
                Some(Color::from_hex("#3366ff").unwrap())
            );
        }
        other => panic!("expected rectangle, got {other:?}"),
    }

    let variants = spec.component.variants.as_ref().unwrap();
    assert_eq!(variants.properties.len(), 2);
    assert_eq!(variants.nodes.len(), 2);

    let overrides: Vec<_> = variants.nodes[1].layer_overrides().collect();
    assert_eq!(overrides.len(), 2);
    let (_, label) = overrides.iter().find(|(name, _)| *name == "label").unwrap();
    assert_eq!(label.characters.as_deref(), Some("Unavailable"));
    assert!(matches!(label.fallback, Some(FallbackOverride::Rectangle(_))));
}

#[test]
fn test_round_trip_preserves_document() {
    let spec = swatch_schema::from_str(BUTTON).unwrap();
    let json = swatch_schema::to_string_pretty(&spec).unwrap();
    let reparsed = swatch_schema::from_str(&json).unwrap();
    assert_eq!(spec, reparsed);
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("button.json");
    std::fs::write(&path, BUTTON).unwrap();

    let spec = swatch_schema::load(&path).unwrap();
    assert_eq!(spec.meta.id, "button");
    assert!(spec.component.has_layer("label"));
    assert!(!spec.component.has_layer("icon"));
}

#[test]
fn test_trailing_garbage_is_rejected() {
    let doc = format!("{} {{}}", BUTTON);
    assert!(swatch_schema::from_str(&doc).is_err());
}
