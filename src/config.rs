use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Hard-coded fallback so the dashboard keeps working even when the env
/// var is missing from the deploy environment.
const DEFAULT_API_URL: &str = "https://algoforall-api.onrender.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        // Override wins only when present and non-empty; an empty string
        // in the env falls back to the literal default.
        let api_base_url = env::var("DASHBOARD_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        Config {
            api_base_url,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so parallel test threads never race on the env var.
    #[test]
    fn test_base_url_resolution() {
        unsafe { env::remove_var("DASHBOARD_API_URL") };
        let cfg = Config::load();
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);

        unsafe { env::set_var("DASHBOARD_API_URL", "") };
        let cfg = Config::load();
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);

        unsafe { env::set_var("DASHBOARD_API_URL", "http://localhost:8000") };
        let cfg = Config::load();
        assert_eq!(cfg.api_base_url, "http://localhost:8000");

        unsafe { env::remove_var("DASHBOARD_API_URL") };
    }
}
