use crate::diagnostic::Diagnostic;
use crate::rules::ValidationRule;
use swatch_schema::ComponentSpec;

/// Document metadata and component name must be present
pub struct MetaRule;

impl ValidationRule for MetaRule {
    fn name(&self) -> &'static str {
        "meta"
    }

    fn description(&self) -> &'static str {
        "Require an id, a title and a component name"
    }

    fn check(&self, spec: &ComponentSpec) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if spec.meta.id.trim().is_empty() {
            diagnostics.push(Diagnostic::new(self.name(), "missing id"));
        }
        if spec.meta.title.trim().is_empty() {
            diagnostics.push(Diagnostic::new(self.name(), "missing title"));
        }
        if spec.component.name.trim().is_empty() {
            diagnostics.push(Diagnostic::new(self.name(), "component is missing a name"));
        }

        diagnostics
    }
}
