pub mod init;
pub mod render;
pub mod simulate;
pub mod validate;

pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use simulate::{simulate, SimulateArgs};
pub use validate::{validate, ValidateArgs};
