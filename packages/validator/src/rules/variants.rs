use crate::diagnostic::Diagnostic;
use crate::rules::{node_label, ValidationRule};
use std::collections::{BTreeMap, HashMap, HashSet};
use swatch_schema::ComponentSpec;

/// Declared variant properties must be named, unique and have at least one value
pub struct VariantPropertyRule;

impl ValidationRule for VariantPropertyRule {
    fn name(&self) -> &'static str {
        "variant-properties"
    }

    fn description(&self) -> &'static str {
        "Require named, unique variant properties with non-empty value sets"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let Some(variants) = &spec.component.variants else {
            return diagnostics;
        };

        let mut seen = HashSet::new();
        for (index, property) in variants.properties.iter().enumerate() {
            if property.name.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("variant property {} has no name", index),
                ));
            } else if !seen.insert(property.name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("duplicate variant property '{}'", property.name),
                ));
            }

            if property.values.is_empty() {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("variant property '{}' declares no values", property.name),
                ));
            }

            let mut values = HashSet::new();
            for value in &property.values {
                if !values.insert(value.as_str()) {
                    diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "variant property '{}' declares value \"{}\" more than once",
                            property.name, value
                        ),
                    ));
                }
            }
        }

        diagnostics
    }
}

/// Variant nodes must be uniquely identified and pick declared values for every
/// declared property
pub struct VariantNodeRule;

impl ValidationRule for VariantNodeRule {
    fn name(&self) -> &'static str {
        "variant-nodes"
    }

    fn description(&self) -> &'static str {
        "Check variant node ids and their property values against the declared properties"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let Some(variants) = &spec.component.variants else {
            return diagnostics;
        };

        if variants.nodes.is_empty() {
            diagnostics.push(Diagnostic::new(
                self.name(),
                "variant configuration declares no nodes",
            ));
        }

        let mut ids = HashSet::new();
        let mut combinations: HashMap<&BTreeMap<String, String>, String> = HashMap::new();

        for (index, node) in variants.nodes.iter().enumerate() {
            let label = node_label(index, node);

            if node.id.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("variant node {} has no id", label),
                ));
            } else if !ids.insert(node.id.as_str()) {
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!("duplicate variant node id '{}'", node.id),
                ));
            }

            for (property_name, value) in &node.properties {
                match variants.property(property_name) {
                    None => diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "variant node {} references undeclared property '{}'",
                            label, property_name
                        ),
                    )),
                    Some(property) if !property.allows(value) => {
                        diagnostics.push(Diagnostic::new(
                            self.name(),
                            format!(
                                "variant node {} sets property '{}' to \"{}\", which is not one of [{}]",
                                label,
                                property_name,
                                value,
                                property.values.join(", ")
                            ),
                        ))
                    }
                    Some(_) => {}
                }
            }

            for property in &variants.properties {
                if !node.properties.contains_key(&property.name) {
                    diagnostics.push(Diagnostic::new(
                        self.name(),
                        format!(
                            "variant node {} does not set property '{}'",
                            label, property.name
                        ),
                    ));
                }
            }

            if node.properties.is_empty() {
                continue;
            }
            if let Some(first) = combinations.get(&node.properties) {
                let combination: Vec<String> = node
                    .properties
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                diagnostics.push(Diagnostic::new(
                    self.name(),
                    format!(
                        "variant nodes {} and {} both use {}",
                        first,
                        label,
                        combination.join(", ")
                    ),
                ));
            } else {
                combinations.insert(&node.properties, label);
            }
        }

        diagnostics
    }
}
