//! Tools module - tool implementations for the conversation loop
//!
//! Contains the tool trait, the registry, and the sample weather tool.

pub mod registry;
pub mod weather;

pub use registry::{Tool, ToolRegistry};
pub use weather::WeatherTool;
