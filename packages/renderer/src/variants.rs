//! Variant expansion
//!
//! Each variant node renders a copy of the base layer tree with its layer overrides
//! merged in field by field. The base component is never modified.

use crate::component::render_component;
use crate::condition::RenderCondition;
use crate::node::RenderedVariant;
use swatch_common::TokenResolver;
use swatch_schema::{
    ComponentDefinition, FallbackOverride, LayerSpec, LayerTokens, RectangleFallback,
    TextFallback, VariantConfiguration, VariantLayerOverride, VariantNodeSpec,
};
use tracing::{debug, info, instrument, warn};

/// Render one component per variant node, in declaration order
#[instrument(skip_all, fields(component = %component.name, variants = variants.nodes.len()))]
pub fn expand_variants<R>(
    component: &ComponentDefinition,
    variants: &VariantConfiguration,
    resolver: &R,
) -> Vec<RenderedVariant>
where
    R: TokenResolver + ?Sized,
{
    let rendered: Vec<_> = variants
        .nodes
        .iter()
        .map(|node| expand_node(component, variants, node, resolver))
        .collect();

    info!(rendered = rendered.len(), "Variant expansion complete");
    rendered
}

fn expand_node<R>(
    component: &ComponentDefinition,
    variants: &VariantConfiguration,
    node: &VariantNodeSpec,
    resolver: &R,
) -> RenderedVariant
where
    R: TokenResolver + ?Sized,
{
    let mut layers = component.layers.clone();
    let mut suppressed = Vec::new();

    for (layer_name, layer_override) in node.layer_overrides() {
        match layers.iter_mut().find(|layer| layer.name() == layer_name.as_str()) {
            Some(layer) => {
                let (merged, skipped) = apply_override(layer, layer_override);
                *layer = merged;
                suppressed.extend(skipped);
            }
            None => {
                warn!(variant = %node.id, layer = %layer_name, "Override targets unknown layer");
                suppressed.push(RenderCondition::suppressed_override(
                    layer_name.as_str(),
                    format!("variant '{}' targets a layer that does not exist", node.id),
                ));
            }
        }
    }

    let variant_component = ComponentDefinition {
        name: component.name.clone(),
        frame: component.frame.clone(),
        layers,
        variants: None,
    };

    let mut rendered = render_component(&variant_component, resolver);
    suppressed.append(&mut rendered.conditions);
    rendered.conditions = suppressed;

    let name = variant_name(node, variants);
    debug!(variant = %node.id, name = %name, "Expanded variant");

    RenderedVariant {
        id: node.id.clone(),
        name,
        description: node.description.clone(),
        properties: node.properties.clone(),
        component: rendered,
    }
}

/// Explicit name, else `prop=value` pairs in declared property order.
///
/// Properties the node sets but the configuration does not declare are appended in
/// key order so the name still reflects everything the node chose.
pub fn variant_name(node: &VariantNodeSpec, variants: &VariantConfiguration) -> String {
    if let Some(name) = node.name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }

    let declared = variants
        .properties
        .iter()
        .filter_map(|p| node.properties.get(&p.name).map(|v| (p.name.as_str(), v.as_str())));
    let undeclared = node
        .properties
        .iter()
        .filter(|(k, _)| variants.property(k).is_none())
        .map(|(k, v)| (k.as_str(), v.as_str()));

    let pairs: Vec<String> = declared
        .chain(undeclared)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    if pairs.is_empty() {
        node.id.clone()
    } else {
        pairs.join(", ")
    }
}

/// Merge a variant override onto a copy of `layer`.
///
/// Returns the merged layer and a condition for every override field that does not
/// apply to the layer's kind.
pub fn apply_override(
    layer: &LayerSpec,
    layer_override: &VariantLayerOverride,
) -> (LayerSpec, Vec<RenderCondition>) {
    let mut skipped = Vec::new();
    let mut merged = layer.clone();

    match &mut merged {
        LayerSpec::Rectangle(rect) => {
            if let Some(tokens) = &layer_override.tokens {
                let mut tokens = tokens.clone();
                if tokens.typography.take().is_some() {
                    skipped.push(RenderCondition::suppressed_override(
                        &rect.name,
                        "typography token does not apply to rectangle layers",
                    ));
                }
                rect.tokens = overlay_tokens(&rect.tokens, &tokens);
            }
            if let Some(radius) = layer_override.corner_radius {
                rect.corner_radius = Some(radius);
            }
            if layer_override.characters.is_some() {
                skipped.push(RenderCondition::suppressed_override(
                    &rect.name,
                    "characters do not apply to rectangle layers",
                ));
            }
            match &layer_override.fallback {
                Some(FallbackOverride::Rectangle(fallback)) => {
                    rect.fallback = Some(overlay_rectangle_fallback(
                        &rect.fallback.unwrap_or_default(),
                        fallback,
                    ));
                }
                Some(FallbackOverride::Text(fallback)) => {
                    if let Some(fill) = fallback.fill {
                        let mut base = rect.fallback.unwrap_or_default();
                        base.fill = Some(fill);
                        rect.fallback = Some(base);
                    }
                    if fallback.font_family.is_some()
                        || fallback.font_style.is_some()
                        || fallback.font_size.is_some()
                        || fallback.letter_spacing.is_some()
                    {
                        skipped.push(RenderCondition::suppressed_override(
                            &rect.name,
                            "typography fallback does not apply to rectangle layers",
                        ));
                    }
                }
                None => {}
            }
        }
        LayerSpec::Text(text) => {
            if let Some(tokens) = &layer_override.tokens {
                let mut tokens = tokens.clone();
                if tokens.stroke.take().is_some() {
                    skipped.push(RenderCondition::suppressed_override(
                        &text.name,
                        "stroke token does not apply to text layers",
                    ));
                }
                text.tokens = overlay_tokens(&text.tokens, &tokens);
            }
            if let Some(characters) = &layer_override.characters {
                text.characters = characters.clone();
            }
            if layer_override.corner_radius.is_some() {
                skipped.push(RenderCondition::suppressed_override(
                    &text.name,
                    "cornerRadius does not apply to text layers",
                ));
            }
            match &layer_override.fallback {
                Some(FallbackOverride::Text(fallback)) => {
                    let base = text.fallback.clone().unwrap_or_default();
                    text.fallback = Some(overlay_text_fallback(&base, fallback));
                }
                Some(FallbackOverride::Rectangle(fallback)) => {
                    if let Some(fill) = fallback.fill {
                        let mut base = text.fallback.clone().unwrap_or_default();
                        base.fill = Some(fill);
                        text.fallback = Some(base);
                    }
                    if fallback.stroke.is_some() {
                        skipped.push(RenderCondition::suppressed_override(
                            &text.name,
                            "stroke fallback does not apply to text layers",
                        ));
                    }
                }
                None => {}
            }
        }
    }

    (merged, skipped)
}

fn overlay_tokens(base: &LayerTokens, over: &LayerTokens) -> LayerTokens {
    LayerTokens {
        fill: over.fill.clone().or_else(|| base.fill.clone()),
        stroke: over.stroke.clone().or_else(|| base.stroke.clone()),
        typography: over.typography.clone().or_else(|| base.typography.clone()),
    }
}

fn overlay_rectangle_fallback(
    base: &RectangleFallback,
    over: &RectangleFallback,
) -> RectangleFallback {
    RectangleFallback {
        fill: over.fill.or(base.fill),
        stroke: over.stroke.or(base.stroke),
    }
}

fn overlay_text_fallback(base: &TextFallback, over: &TextFallback) -> TextFallback {
    TextFallback {
        fill: over.fill.or(base.fill),
        font_family: over.font_family.clone().or_else(|| base.font_family.clone()),
        font_style: over.font_style.clone().or_else(|| base.font_style.clone()),
        font_size: over.font_size.or(base.font_size),
        letter_spacing: over.letter_spacing.or(base.letter_spacing),
    }
}
