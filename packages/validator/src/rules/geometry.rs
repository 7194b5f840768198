use crate::diagnostic::Diagnostic;
use crate::rules::{node_label, ValidationRule};
use swatch_schema::{ComponentSpec, LayerSpec};

/// Frame dimensions, padding and corner radii must be non-negative
pub struct GeometryRule;

impl ValidationRule for GeometryRule {
    fn name(&self) -> &'static str {
        "non-negative-geometry"
    }

    fn description(&self) -> &'static str {
        "Disallow negative frame sizes, padding and corner radii"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let frame = &spec.component.frame;

        let mut measures = vec![
            ("frame width", Some(frame.width)),
            ("frame height", Some(frame.height)),
        ];
        if let Some(padding) = frame.padding {
            measures.push(("frame padding.horizontal", padding.horizontal));
            measures.push(("frame padding.vertical", padding.vertical));
        }

        for (what, value) in measures {
            if let Some(value) = value.filter(|v| *v < 0.0) {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("{} must be non-negative, got {}", what, value),
                ));
            }
        }

        for layer in &spec.component.layers {
            if let LayerSpec::Rectangle(rect) = layer {
                if let Some(radius) = rect.corner_radius.filter(|r| *r < 0.0) {
                    diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "layer '{}' cornerRadius must be non-negative, got {}",
                            rect.name, radius
                        ),
                    ));
                }
            }
        }

        if let Some(variants) = &spec.component.variants {
            for (index, node) in variants.nodes.iter().enumerate() {
                for (layer_name, layer_override) in node.layer_overrides() {
                    if let Some(radius) = layer_override.corner_radius.filter(|r| *r < 0.0) {
                        diagnostics.push(Diagnostic::new(
                            self.name(),
                            format!(
                                "variant node {} overrides layer '{}' cornerRadius with {}, which must be non-negative",
                                node_label(index, node),
                                layer_name,
                                radius
                            ),
                        ));
                    }
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(json: &str) -> Vec<String> {
        let spec = swatch_schema::from_str(json).unwrap();
        GeometryRule.check(&spec).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_allows_zero_and_positive() {
        let messages = check(
            r#"{ "meta": { "id": "a", "title": "A" },
                 "component": { "name": "A",
                   "frame": { "width": 0, "height": 10, "padding": { "horizontal": 0 } },
                   "layers": [ { "kind": "rectangle", "name": "bg", "cornerRadius": 0 } ] } }"#,
        );
        assert!(messages.is_empty());
    }

    #[test]
    fn test_detects_negative_frame_and_padding() {
        let messages = check(
            r#"{ "meta": { "id": "a", "title": "A" },
                 "component": { "name": "A",
                   "frame": { "width": -1, "height": 10, "padding": { "vertical": -4 } } } }"#,
        );
        assert_eq!(
            messages,
            vec![
                "frame width must be non-negative, got -1",
                "frame padding.vertical must be non-negative, got -4",
            ]
        );
    }

    #[test]
    fn test_detects_negative_corner_radius_in_layer_and_override() {
        let messages = check(
            r#"{ "meta": { "id": "a", "title": "A" },
                 "component": { "name": "A", "frame": { "width": 1, "height": 1 },
                   "layers": [ { "kind": "rectangle", "name": "bg", "cornerRadius": -2 } ],
                   "variants": {
                     "properties": [ { "name": "size", "values": ["sm"] } ],
                     "nodes": [ { "id": "v1", "properties": { "size": "sm" },
                                  "overrides": { "layers": { "bg": { "cornerRadius": -3 } } } } ] } } }"#,
        );
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("layer 'bg' cornerRadius"));
        assert!(messages[1].contains("variant node 'v1'"));
        assert!(messages[1].contains("-3"));
    }
}
