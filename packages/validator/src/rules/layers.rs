use crate::diagnostic::Diagnostic;
use crate::rules::{unusable_token_slots, ValidationRule};
use std::collections::HashSet;
use swatch_schema::ComponentSpec;

/// Layers need unique, non-empty names and only reference token slots they use.
///
/// Variant overrides address layers by name, so a duplicate name makes an override
/// ambiguous.
pub struct LayerRule;

impl ValidationRule for LayerRule {
    fn name(&self) -> &'static str {
        "layers"
    }

    fn description(&self) -> &'static str {
        "Require unique layer names and token slots that match the layer kind"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for (index, layer) in spec.component.layers.iter().enumerate() {
            let name = layer.name();

            if name.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("layer {} has no name", index),
                ));
            } else if !seen.insert(name) && reported.insert(name) {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("duplicate layer name '{}'", name),
                ));
            }

            for (slot, token) in unusable_token_slots(layer.kind(), layer.tokens()) {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!(
                        "{} layer '{}' references {} token '{}', which {} layers do not use",
                        layer.kind(),
                        name,
                        slot,
                        token,
                        layer.kind()
                    ),
                ));
            }
        }

        diagnostics
    }
}
