use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use swatch_common::TokenResolver;
use swatch_renderer::{expand_variants, render_component, RenderedComponent, RenderedVariant};
use swatch_schema::ComponentSpec;
use swatch_validator::SpecSummary;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Spec file to render
    pub input: PathBuf,

    /// Tokens file (overrides tokensFile from the config)
    #[arg(short, long)]
    pub tokens: Option<PathBuf>,
}

/// What `render` prints: the summary plus either the component or its variants
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub summary: SpecSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<RenderedComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<RenderedVariant>,
}

impl RenderOutput {
    /// Every condition, labelled with its variant when there is one
    pub fn warnings(&self) -> Vec<String> {
        let base = self
            .component
            .iter()
            .flat_map(|c| c.conditions.iter().map(|condition| condition.to_string()));
        let variants = self.variants.iter().flat_map(|variant| {
            variant
                .component
                .conditions
                .iter()
                .map(move |condition| format!("variant '{}': {}", variant.name, condition))
        });
        base.chain(variants).collect()
    }
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let tokens = config.load_tokens(cwd, args.tokens.as_deref())?;
    let input = PathBuf::from(cwd).join(&args.input);

    let spec = swatch_schema::load(&input)?;
    let output = render_spec(&spec, &input.display().to_string(), &tokens)
        .with_context(|| format!("Cannot render {}", input.display()))?;

    for warning in output.warnings() {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Validate, then render the component or every variant
pub fn render_spec<R>(spec: &ComponentSpec, source: &str, resolver: &R) -> Result<RenderOutput>
where
    R: TokenResolver + ?Sized,
{
    let summary = swatch_validator::validate(spec, source);
    if !summary.is_valid() {
        return Err(anyhow!(
            "spec '{}' has {} errors:\n  {}",
            summary.id,
            summary.errors.len(),
            summary.errors.join("\n  ")
        ));
    }

    let output = match &spec.component.variants {
        Some(variants) => RenderOutput {
            summary,
            component: None,
            variants: expand_variants(&spec.component, variants, resolver),
        },
        None => RenderOutput {
            summary,
            component: Some(render_component(&spec.component, resolver)),
            variants: Vec::new(),
        },
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_common::TokenSet;

    #[test]
    fn test_render_spec_reports_missing_tokens_as_warnings() {
        let spec = swatch_schema::from_str(
            r#"{ "meta": { "id": "btn-1", "title": "Button" },
                 "component": { "name": "Button", "frame": { "width": 100, "height": 32 },
                   "layers": [ { "kind": "rectangle", "name": "bg", "tokens": { "fill": "color.red" } } ] } }"#,
        )
        .unwrap();

        let output = render_spec(&spec, "test", &TokenSet::new()).unwrap();

        assert!(output.variants.is_empty());
        assert_eq!(output.component.as_ref().unwrap().children.len(), 1);
        let warnings = output.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("color.red"));
    }

    #[test]
    fn test_render_spec_refuses_invalid_specs() {
        let spec = swatch_schema::from_str(
            r#"{ "meta": { "id": "btn-1", "title": "" },
                 "component": { "name": "Button", "frame": { "width": 100, "height": 32 } } }"#,
        )
        .unwrap();

        let err = render_spec(&spec, "test", &TokenSet::new()).unwrap_err();
        assert!(err.to_string().contains("missing title"));
    }
}
