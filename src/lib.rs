//! Lane-offset transit maps.
//!
//! Routes sharing a directed segment are drawn side by side in separate
//! lanes, with corners mitred by intersecting consecutive offset segments.
//!
//! ```text
//! RouteSet -> LaneAssigner -> RouteTracer (CornerComputer) -> DrawingEmitter -> svg
//! ```

pub mod config;
pub mod drawing;
pub mod error;
pub mod io;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod route;
pub mod transform;

pub use config::MapConfig;
pub use error::{LanemapError, Result};
pub use pipeline::{MapOutput, RenderMap};
