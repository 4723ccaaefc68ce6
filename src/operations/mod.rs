pub mod corner;
pub mod lanes;
pub mod trace;

pub use corner::{CornerComputer, CornerConfig, CornerPoint, DebugLine, LanePoint};
pub use lanes::{LaneAssigner, LaneBase};
pub use trace::{EndPointPolicy, RouteTracer};
