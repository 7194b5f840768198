mod geometry;
mod layers;
mod meta;
mod overrides;
mod variants;

pub use geometry::GeometryRule;
pub use layers::LayerRule;
pub use meta::MetaRule;
pub use overrides::OverrideRule;
pub use variants::{VariantNodeRule, VariantPropertyRule};

use crate::diagnostic::Diagnostic;
use swatch_schema::{ComponentSpec, LayerKind, LayerTokens, VariantNodeSpec};

/// Trait for implementing validation rules
pub trait ValidationRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a whole spec document
    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic>;
}

/// Registry of validation rules, run in registration order
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MetaRule),
                Box::new(GeometryRule),
                Box::new(LayerRule),
                Box::new(VariantPropertyRule),
                Box::new(VariantNodeRule),
                Box::new(OverrideRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}

/// How a variant node is named in messages: its id, or its position when it has none
pub(crate) fn node_label(index: usize, node: &VariantNodeSpec) -> String {
    if node.id.is_empty() {
        format!("#{}", index)
    } else {
        format!("'{}'", node.id)
    }
}

/// Token slots a layer kind never reads, paired with the referenced id
pub(crate) fn unusable_token_slots(
    kind: LayerKind,
    tokens: &LayerTokens,
) -> Vec<(&'static str, &str)> {
    let mut slots = Vec::new();
    match kind {
        LayerKind::Rectangle => {
            if let Some(id) = tokens.typography.as_deref() {
                slots.push(("typography", id));
            }
        }
        LayerKind::Text => {
            if let Some(id) = tokens.stroke.as_deref() {
                slots.push(("stroke", id));
            }
        }
    }
    slots
}
