//! Data model shared by the engine, the sources and every consumer.
//!
//! All types serialize with camelCase keys; the JSON produced here is read
//! verbatim by the dashboard.

pub mod branch;
pub mod export;
pub mod plan;
pub mod report;

pub use branch::*;
pub use export::*;
pub use plan::*;
pub use report::*;
