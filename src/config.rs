use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// When set, directions requests go to this base URL with bearer auth (proxy mode)
    pub mapbox_base_url: Option<String>,
    pub mapbox_timeout_secs: u64,
    /// Leg cache TTL in seconds; 0 disables the cache
    pub leg_cache_ttl: u64,
    pub leg_cache_max_entries: u64,
    pub planner: RoutePlannerConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlannerConfig {
    /// Angle of the loop's corner at the user's position, in degrees (0..=180)
    pub spread_degrees: f64,

    /// Stop markers produced when the caller does not specify a count
    pub default_stop_count: i64,

    /// Fetch the four legs concurrently instead of one after another.
    /// Results are always reassembled in leg order.
    pub parallel_legs: bool,
}

impl Default for RoutePlannerConfig {
    fn default() -> Self {
        Self {
            spread_degrees: DEFAULT_SPREAD_DEGREES,
            default_stop_count: DEFAULT_STOP_COUNT,
            parallel_legs: false,
        }
    }
}

impl RoutePlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let spread_degrees: f64 = env::var("PLANNER_SPREAD_DEGREES")
            .unwrap_or_else(|_| defaults.spread_degrees.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_SPREAD_DEGREES")?;

        if !(0.0..=180.0).contains(&spread_degrees) {
            return Err("PLANNER_SPREAD_DEGREES must be between 0 and 180".to_string());
        }

        let default_stop_count: i64 = env::var("PLANNER_DEFAULT_STOP_COUNT")
            .unwrap_or_else(|_| defaults.default_stop_count.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_DEFAULT_STOP_COUNT")?;

        if !(0..=MAX_STOP_COUNT).contains(&default_stop_count) {
            return Err(format!(
                "PLANNER_DEFAULT_STOP_COUNT must be between 0 and {}",
                MAX_STOP_COUNT
            ));
        }

        Ok(Self {
            spread_degrees,
            default_stop_count,
            parallel_legs: env::var("PLANNER_PARALLEL_LEGS")
                .unwrap_or_else(|_| defaults.parallel_legs.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_PARALLEL_LEGS")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok().filter(|s| !s.is_empty()),
            mapbox_timeout_secs: env::var("MAPBOX_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_DIRECTIONS_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid MAPBOX_TIMEOUT_SECS")?,
            leg_cache_ttl: env::var("LEG_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_LEG_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid LEG_CACHE_TTL")?,
            leg_cache_max_entries: env::var("LEG_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| DEFAULT_LEG_CACHE_MAX_ENTRIES.to_string())
                .parse()
                .map_err(|_| "Invalid LEG_CACHE_MAX_ENTRIES")?,
            planner: RoutePlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
