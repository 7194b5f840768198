pub mod component;
pub mod condition;
pub mod error;
pub mod layer;
pub mod node;
pub mod variants;

pub use component::render_component;
pub use condition::{ConditionKind, RenderCondition, TokenSlot};
pub use error::{RenderError, RenderResult};
pub use layer::render_layer;
pub use node::{
    FrameGeometry, Paint, RectangleNode, RenderedComponent, RenderedLayer, RenderedNode,
    RenderedVariant, TextNode,
};
pub use variants::{apply_override, expand_variants, variant_name};
