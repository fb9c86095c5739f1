//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod gates;
pub mod translate;
pub mod version;
