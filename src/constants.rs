//! Stable application-wide constants.
//!
//! Values here are structural invariants, geometry coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For knobs that benefit from runtime experimentation, see
//! [`RoutePlannerConfig`](crate::config::RoutePlannerConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Directions client defaults ---

/// Default per-request timeout for the directions API (seconds).
/// Overridden by `MAPBOX_TIMEOUT_SECS`.
pub const DEFAULT_DIRECTIONS_TIMEOUT_SECONDS: u64 = 15;

// --- Leg cache defaults (used when env vars are absent) ---

/// Default leg cache TTL: 1 hour. Overridden by `LEG_CACHE_TTL`; 0 disables the cache.
pub const DEFAULT_LEG_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory leg cache. Overridden by `LEG_CACHE_MAX_ENTRIES`.
pub const DEFAULT_LEG_CACHE_MAX_ENTRIES: u64 = 1_000;
/// Decimal places used when building leg cache keys (~0.1 m).
pub const LEG_CACHE_KEY_PRECISION: u32 = 6;

// --- Loop geometry ---

/// Number of walking legs in a loop: center -> A -> B -> C -> center.
pub const LOOP_LEG_COUNT: usize = 4;
/// Angle of the loop's corner at the user's position (degrees).
pub const DEFAULT_SPREAD_DEGREES: f64 = 90.0;
/// Rotation applied to the incoming heading before placing corners (degrees).
/// Aligns the loop's first edge with the direction the user is facing.
pub const HEADING_CORRECTION_DEGREES: f64 = 90.0;
/// Fraction of the visible latitudinal extent used as the loop's side length.
pub const VIEWPORT_SPAN_DIVISOR: f64 = 4.0;

// --- Stops ---

/// Stop markers produced when a request does not ask for a specific count.
pub const DEFAULT_STOP_COUNT: i64 = 10;
/// Upper bound accepted by the HTTP surface for the stop count.
pub const MAX_STOP_COUNT: i64 = 500;

/// Title of a plan created from a single user waypoint, before any route exists.
pub const UNTITLED_PLAN_TITLE: &str = "Untitled";
/// Labels of the four loop corner markers, in visiting order.
pub const CORNER_LABELS: [&str; LOOP_LEG_COUNT] = ["A", "B", "C", "D"];
