pub mod aggregate;
pub mod allocate;
pub mod codec;
mod document;
pub mod domain;
pub mod period;

pub use document::*;
pub use domain::*;
