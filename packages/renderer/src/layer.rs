//! Layer rendering
//!
//! Turns one [`LayerSpec`] into a concrete node. Token references win when they
//! resolve to the right kind of style; otherwise the layer's literal fallback is used.
//! A paint slot with neither leaves the node unpainted and records a condition. A text
//! layer with neither a typography token nor a complete fallback cannot be rendered.

use crate::condition::{ConditionKind, RenderCondition, TokenSlot};
use crate::error::{RenderError, RenderResult};
use crate::node::{Paint, RectangleNode, RenderedLayer, RenderedNode, TextNode};
use swatch_common::{Color, ResolvedStyle, TokenResolver, TypographyStyle};
use swatch_schema::{LayerSpec, RectangleLayer, TextLayer};
use tracing::{debug, instrument};

/// Render a single layer against the available tokens
#[instrument(skip(layer, resolver), fields(layer = %layer.name(), kind = %layer.kind()))]
pub fn render_layer<R>(layer: &LayerSpec, resolver: &R) -> RenderResult<RenderedLayer>
where
    R: TokenResolver + ?Sized,
{
    match layer {
        LayerSpec::Rectangle(rect) => Ok(render_rectangle(rect, resolver)),
        LayerSpec::Text(text) => render_text(text, resolver),
    }
}

fn render_rectangle<R>(layer: &RectangleLayer, resolver: &R) -> RenderedLayer
where
    R: TokenResolver + ?Sized,
{
    let mut conditions = Vec::new();
    let fallback = layer.fallback.unwrap_or_default();

    let fill = resolve_paint(
        &layer.name,
        TokenSlot::Fill,
        layer.tokens.fill.as_deref(),
        fallback.fill,
        resolver,
        &mut conditions,
    );
    let stroke = resolve_paint(
        &layer.name,
        TokenSlot::Stroke,
        layer.tokens.stroke.as_deref(),
        fallback.stroke,
        resolver,
        &mut conditions,
    );

    RenderedLayer {
        node: RenderedNode::Rectangle(RectangleNode {
            name: layer.name.clone(),
            fill,
            stroke,
            corner_radius: layer.corner_radius,
        }),
        conditions,
    }
}

fn render_text<R>(layer: &TextLayer, resolver: &R) -> RenderResult<RenderedLayer>
where
    R: TokenResolver + ?Sized,
{
    let mut conditions = Vec::new();
    let fallback = layer.fallback.clone().unwrap_or_default();

    let token_style = layer.tokens.typography.as_deref().and_then(|token| {
        let style = lookup(&layer.name, TokenSlot::Typography, token, resolver)?;
        match style {
            ResolvedStyle::Typography(typography) => Some(typography),
            other => {
                conditions.push(mismatch(&layer.name, TokenSlot::Typography, token, &other));
                None
            }
        }
    });

    let (typography, typography_token) = match token_style {
        Some(style) => (style, layer.tokens.typography.clone()),
        None => (fallback_typography(layer, &fallback)?, None),
    };

    let fill = resolve_paint(
        &layer.name,
        TokenSlot::Fill,
        layer.tokens.fill.as_deref(),
        fallback.fill,
        resolver,
        &mut conditions,
    );

    Ok(RenderedLayer {
        node: RenderedNode::Text(TextNode {
            name: layer.name.clone(),
            characters: layer.characters.clone(),
            typography,
            typography_token,
            fill,
        }),
        conditions,
    })
}

fn fallback_typography(
    layer: &TextLayer,
    fallback: &swatch_schema::TextFallback,
) -> RenderResult<TypographyStyle> {
    match (&fallback.font_family, &fallback.font_style, fallback.font_size) {
        (Some(font_family), Some(font_style), Some(font_size)) => {
            debug!(layer = %layer.name, "Using fallback typography");
            Ok(TypographyStyle {
                font_family: font_family.clone(),
                font_style: font_style.clone(),
                font_size,
                line_height: None,
                letter_spacing: fallback.letter_spacing,
            })
        }
        _ => Err(RenderError::missing_fallback(
            &layer.name,
            &fallback.missing_fields(),
        )),
    }
}

/// Token paint, else the fallback color, else nothing
fn resolve_paint<R>(
    layer: &str,
    slot: TokenSlot,
    token: Option<&str>,
    fallback: Option<Color>,
    resolver: &R,
    conditions: &mut Vec<RenderCondition>,
) -> Option<Paint>
where
    R: TokenResolver + ?Sized,
{
    if let Some(token) = token {
        if let Some(style) = lookup(layer, slot, token, resolver) {
            match style.as_paint() {
                Some(color) => return Some(Paint::from_token(color, token)),
                None => conditions.push(mismatch(layer, slot, token, &style)),
            }
        }
    }

    match (fallback, token) {
        (Some(color), _) => Some(Paint::literal(color)),
        (None, Some(token)) => {
            conditions.push(RenderCondition::token_missing(layer, slot, token));
            None
        }
        (None, None) => None,
    }
}

fn lookup<R>(layer: &str, slot: TokenSlot, token: &str, resolver: &R) -> Option<ResolvedStyle>
where
    R: TokenResolver + ?Sized,
{
    let style = resolver.resolve(token);
    if style.is_none() {
        debug!(layer = %layer, slot = %slot, token = %token, "Token did not resolve");
    }
    style
}

fn mismatch(layer: &str, slot: TokenSlot, token: &str, found: &ResolvedStyle) -> RenderCondition {
    RenderCondition::new(
        layer,
        ConditionKind::TokenKindMismatch {
            slot,
            token: token.to_string(),
            found: found.kind().to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_common::TokenSet;

    fn tokens() -> TokenSet {
        TokenSet::new()
            .with_token(
                "color.red",
                ResolvedStyle::Paint {
                    color: Color::rgb(1.0, 0.0, 0.0),
                },
            )
            .with_token(
                "type.body",
                ResolvedStyle::Typography(TypographyStyle {
                    font_family: "Inter".to_string(),
                    font_style: "Regular".to_string(),
                    font_size: 14.0,
                    line_height: Some(20.0),
                    letter_spacing: None,
                }),
            )
    }

    fn no_tokens(_: &str) -> Option<ResolvedStyle> {
        None
    }

    fn layer(json: &str) -> LayerSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rectangle_uses_resolved_token() {
        let layer = layer(r#"{ "kind": "rectangle", "name": "bg", "tokens": { "fill": "color.red" }, "cornerRadius": 4 }"#);
        let rendered = render_layer(&layer, &tokens()).unwrap();

        assert!(rendered.conditions.is_empty());
        match rendered.node {
            RenderedNode::Rectangle(rect) => {
                assert_eq!(rect.fill, Some(Paint::from_token(Color::rgb(1.0, 0.0, 0.0), "color.red")));
                assert_eq!(rect.stroke, None);
                assert_eq!(rect.corner_radius, Some(4.0));
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_rectangle_missing_token_without_fallback_is_a_condition() {
        let layer = layer(r#"{ "kind": "rectangle", "name": "bg", "tokens": { "fill": "color.red" } }"#);
        let rendered = render_layer(&layer, &no_tokens).unwrap();

        assert_eq!(
            rendered.conditions,
            vec![RenderCondition::token_missing("bg", TokenSlot::Fill, "color.red")]
        );
        match rendered.node {
            RenderedNode::Rectangle(rect) => assert!(rect.fill.is_none()),
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_rectangle_without_tokens_or_fallback_is_silent() {
        let layer = layer(r#"{ "kind": "rectangle", "name": "spacer" }"#);
        let rendered = render_layer(&layer, &no_tokens).unwrap();
        assert!(rendered.conditions.is_empty());
    }

    #[test]
    fn test_wrong_kind_token_falls_back() {
        let layer = layer(
            r##"{ "kind": "rectangle", "name": "bg", "tokens": { "fill": "type.body" }, "fallback": { "fill": "#00ff00" } }"##,
        );
        let rendered = render_layer(&layer, &tokens()).unwrap();

        assert_eq!(rendered.conditions.len(), 1);
        assert!(matches!(
            rendered.conditions[0].kind,
            ConditionKind::TokenKindMismatch { .. }
        ));
        match rendered.node {
            RenderedNode::Rectangle(rect) => {
                assert_eq!(rect.fill, Some(Paint::literal(Color::rgb(0.0, 1.0, 0.0))))
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_text_uses_typography_token_as_a_unit() {
        let layer = layer(
            r#"{ "kind": "text", "name": "label", "characters": "Hello", "tokens": { "typography": "type.body" },
                 "fallback": { "fontFamily": "Arial", "fontStyle": "Bold", "fontSize": 30, "letterSpacing": 2 } }"#,
        );
        let rendered = render_layer(&layer, &tokens()).unwrap();

        match rendered.node {
            RenderedNode::Text(text) => {
                assert_eq!(text.characters, "Hello");
                assert_eq!(text.typography.font_family, "Inter");
                assert_eq!(text.typography.line_height, Some(20.0));
                assert_eq!(text.typography.letter_spacing, None);
                assert_eq!(text.typography_token.as_deref(), Some("type.body"));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_text_falls_back_to_literal_typography() {
        let layer = layer(
            r##"{ "kind": "text", "name": "label", "characters": "  spaced  ", "tokens": { "typography": "type.missing" },
                 "fallback": { "fontFamily": "Arial", "fontStyle": "Bold", "fontSize": 12, "letterSpacing": 0.5, "fill": "#000000" } }"##,
        );
        let rendered = render_layer(&layer, &tokens()).unwrap();

        match rendered.node {
            RenderedNode::Text(text) => {
                assert_eq!(text.characters, "  spaced  ");
                assert_eq!(text.typography.font_family, "Arial");
                assert_eq!(text.typography.letter_spacing, Some(0.5));
                assert_eq!(text.typography_token, None);
                assert_eq!(text.fill, Some(Paint::literal(Color::rgb(0.0, 0.0, 0.0))));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_text_without_complete_fallback_fails() {
        let layer = layer(
            r#"{ "kind": "text", "name": "label", "characters": "Hi", "fallback": { "fontFamily": "Arial" } }"#,
        );
        let err = render_layer(&layer, &no_tokens).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingFallback {
                layer: "label".to_string(),
                missing: vec!["fontStyle".to_string(), "fontSize".to_string()],
            }
        );
    }

    #[test]
    fn test_text_with_no_fallback_at_all_fails() {
        let layer = layer(r#"{ "kind": "text", "name": "label", "characters": "Hi" }"#);
        let err = render_layer(&layer, &no_tokens).unwrap_err();
        assert!(err.to_string().contains("fontFamily, fontStyle, fontSize"));
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let layer = layer(
            r##"{ "kind": "rectangle", "name": "bg", "tokens": { "fill": "color.red", "stroke": "color.none" },
                 "fallback": { "stroke": "#123456" }, "cornerRadius": 2 }"##,
        );
        let before = layer.clone();
        let resolver = tokens();

        let first = render_layer(&layer, &resolver).unwrap();
        let second = render_layer(&layer, &resolver).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(layer, before);
    }
}
