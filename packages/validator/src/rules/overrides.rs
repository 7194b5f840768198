use crate::diagnostic::Diagnostic;
use crate::rules::{node_label, unusable_token_slots, ValidationRule};
use swatch_schema::{ComponentSpec, FallbackOverride, LayerKind};

/// Variant overrides must target existing layers with fields that apply to them
pub struct OverrideRule;

impl ValidationRule for OverrideRule {
    fn name(&self) -> &'static str {
        "variant-overrides"
    }

    fn description(&self) -> &'static str {
        "Check that variant overrides target existing layers and fit the layer kind"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let Some(variants) = &spec.component.variants else {
            return diagnostics;
        };

        for (index, node) in variants.nodes.iter().enumerate() {
            let label = node_label(index, node);

            for (layer_name, layer_override) in node.layer_overrides() {
                let Some(layer) = spec.component.find_layer(layer_name) else {
                    diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "variant node {} overrides unknown layer '{}'",
                            label, layer_name
                        ),
                    ));
                    continue;
                };

                let kind = layer.kind();
                let mut mismatch = |field: &str| {
                    diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "variant node {} sets {} on {} layer '{}'",
                            label, field, kind, layer_name
                        ),
                    ));
                };

                match kind {
                    LayerKind::Rectangle => {
                        if layer_override.characters.is_some() {
                            mismatch("characters");
                        }
                        if let Some(FallbackOverride::Text(fallback)) = &layer_override.fallback {
                            if fallback.font_family.is_some()
                                || fallback.font_style.is_some()
                                || fallback.font_size.is_some()
                                || fallback.letter_spacing.is_some()
                            {
                                mismatch("a text fallback");
                            }
                        }
                    }
                    LayerKind::Text => {
                        if layer_override.corner_radius.is_some() {
                            mismatch("cornerRadius");
                        }
                        if let Some(FallbackOverride::Rectangle(fallback)) =
                            &layer_override.fallback
                        {
                            if fallback.stroke.is_some() {
                                mismatch("a stroke fallback");
                            }
                        }
                    }
                }

                if let Some(tokens) = &layer_override.tokens {
                    for (slot, token) in unusable_token_slots(kind, tokens) {
                        mismatch(&format!("{} token '{}'", slot, token));
                    }
                }
            }
        }

        diagnostics
    }
}
