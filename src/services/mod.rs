pub mod directions;
pub mod leg_cache;
pub mod mapbox;
pub mod route_planner;
