//! Format registry module
//!
//! Static description of every export target: display metadata plus the
//! serializer family (`FormatKind`) that renders it.

pub mod model;
mod registry;

pub use model::{FormatCategory, FormatDescriptor, FormatKind};
pub use registry::FormatRegistry;
