pub mod coordinates;
pub mod route;
pub mod stop_marker;
pub mod viewport;

pub use coordinates::Coordinates;
pub use route::{CornerMarker, RouteLeg, RoutePlan, RoutePlanRequest, RouteStep};
pub use stop_marker::{derive_trace, diff_markers, MarkerDiff, StopMarker};
pub use viewport::{Heading, Viewport};
