use crate::condition::{ConditionKind, RenderCondition};
use crate::layer::render_layer;
use crate::node::{FrameGeometry, RenderedComponent};
use swatch_common::TokenResolver;
use swatch_schema::ComponentDefinition;
use tracing::{debug, instrument, warn};

/// Render the component frame and every layer in order.
///
/// A layer that cannot be rendered is left out and recorded as a `render-failed`
/// condition; the remaining layers still render.
#[instrument(
    skip(component, resolver),
    fields(component = %component.name, layers = component.layers.len())
)]
pub fn render_component<R>(component: &ComponentDefinition, resolver: &R) -> RenderedComponent
where
    R: TokenResolver + ?Sized,
{
    let frame = &component.frame;
    let mut children = Vec::with_capacity(component.layers.len());
    let mut conditions = Vec::new();

    for layer in &component.layers {
        match render_layer(layer, resolver) {
            Ok(rendered) => {
                debug!(
                    layer = %layer.name(),
                    conditions = rendered.conditions.len(),
                    "Rendered layer"
                );
                children.push(rendered.node);
                conditions.extend(rendered.conditions);
            }
            Err(err) => {
                warn!(layer = %layer.name(), error = %err, "Layer not rendered");
                conditions.push(RenderCondition::new(
                    layer.name(),
                    ConditionKind::RenderFailed {
                        message: err.to_string(),
                    },
                ));
            }
        }
    }

    RenderedComponent {
        name: component.name.clone(),
        frame: FrameGeometry {
            width: frame.width,
            height: frame.height,
            padding_horizontal: frame.padding_horizontal(),
            padding_vertical: frame.padding_vertical(),
        },
        children,
        conditions,
    }
}
