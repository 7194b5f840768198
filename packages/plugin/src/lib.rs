//! # Plugin runtime
//!
//! The boundary between the design tool and the spec pipeline. A [`Dispatcher`]
//! receives message envelopes from the plugin UI, validates and renders component
//! specs, creates nodes through a [`Host`], and answers the UI.
//!
//! The host is always passed in explicitly, so the whole runtime can be driven in
//! tests with [`MemoryHost`].

pub mod dispatcher;
pub mod error;
pub mod host;
pub mod memory_host;
pub mod message;

pub use dispatcher::{Dispatcher, DispatcherState};
pub use error::{HostError, PluginError, PluginResult};
pub use host::{ComponentProps, Host, NodeId, RectangleProps, Variable, VariableCollection};
pub use memory_host::{MemoryHost, MemoryNode, MemoryNodeKind};
pub use message::{Envelope, PluginMessage, RenderRequest, UiMessage, MAX_RECTANGLE_COUNT};
