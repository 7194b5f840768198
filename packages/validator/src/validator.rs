use crate::rules::RuleRegistry;
use crate::summary::SpecSummary;
use std::collections::BTreeSet;
use swatch_schema::ComponentSpec;
use tracing::{debug, instrument};

/// Options for configuring the validator
#[derive(Debug, Default)]
pub struct ValidateOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Validate a spec document with the built-in rules.
///
/// Never fails: every problem is collected into [`SpecSummary::errors`] and a summary
/// is always returned, even for an incomplete document. `source` is provenance only.
pub fn validate(spec: &ComponentSpec, source: &str) -> SpecSummary {
    validate_with(spec, source, ValidateOptions::default())
}

#[instrument(skip(spec, options), fields(id = %spec.meta.id))]
pub fn validate_with(spec: &ComponentSpec, source: &str, options: ValidateOptions) -> SpecSummary {
    let registry = options.registry.unwrap_or_default();
    let mut errors = Vec::new();

    for rule in registry.rules() {
        for diagnostic in rule.check(spec) {
            debug!(rule = %diagnostic.rule, message = %diagnostic.message, "Validation error");
            errors.push(diagnostic.message);
        }
    }

    let tokens = collect_tokens(spec);
    debug!(tokens = tokens.len(), errors = errors.len(), "Validation complete");

    SpecSummary {
        id: spec.meta.id.clone(),
        title: spec.meta.title.clone(),
        description: spec.meta.description.clone(),
        tokens,
        source: source.to_string(),
        errors,
    }
}

/// Every token id referenced by the base layers and by variant layer overrides
pub fn collect_tokens(spec: &ComponentSpec) -> BTreeSet<String> {
    let mut tokens: BTreeSet<String> = spec
        .component
        .layers
        .iter()
        .flat_map(|layer| layer.tokens().ids())
        .map(str::to_string)
        .collect();

    if let Some(variants) = &spec.component.variants {
        for node in &variants.nodes {
            for (_, layer_override) in node.layer_overrides() {
                if let Some(override_tokens) = &layer_override.tokens {
                    tokens.extend(override_tokens.ids().map(str::to_string));
                }
            }
        }
    }

    tokens
}
