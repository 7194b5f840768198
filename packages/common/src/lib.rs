pub mod color;
pub mod error;
pub mod result;
pub mod tokens;

pub use color::*;
pub use error::*;
pub use result::*;
pub use tokens::*;
