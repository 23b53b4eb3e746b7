//! Central configuration constants for the console's network and refresh behavior.

/// Base URL of the station REST backend, including the `api/` prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Environment variable that overrides the configured base URL.
pub const API_URL_ENV: &str = "VOLT_API_URL";

/// Total time budget for a single request (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Minimum allowed request timeout.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed request timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// TCP connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Interval of the silent refresh while a vehicle is charging. 10 seconds.
pub const CHARGING_REFRESH_INTERVAL_SECS: u64 = 10;

pub const MIN_REFRESH_INTERVAL_SECS: u64 = 2;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 300;

/// Convenience function to clamp a timeout value into allowed range.
pub fn clamp_timeout_secs(v: u64) -> u64 {
    v.clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS)
}

pub fn clamp_refresh_interval_secs(v: u64) -> u64 {
    v.clamp(MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_timeouts() {
        assert_eq!(clamp_timeout_secs(0), MIN_REQUEST_TIMEOUT_SECS);
        assert_eq!(clamp_timeout_secs(30), 30);
        assert_eq!(clamp_timeout_secs(10_000), MAX_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn clamps_refresh_interval() {
        assert_eq!(clamp_refresh_interval_secs(1), MIN_REFRESH_INTERVAL_SECS);
        assert_eq!(
            clamp_refresh_interval_secs(CHARGING_REFRESH_INTERVAL_SECS),
            CHARGING_REFRESH_INTERVAL_SECS
        );
    }
}
