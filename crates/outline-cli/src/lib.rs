//! Library components of the outline inspector.

pub mod logging;
pub mod render;
pub mod types;
