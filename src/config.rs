use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movie catalog snapshot
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the similarity matrix snapshot
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when a request does not ask for one
    #[serde(default = "default_recommendation_count")]
    pub default_recommendation_count: usize,

    /// Number of titles drawn for the random picks panel
    #[serde(default = "default_random_pick_count")]
    pub random_pick_count: usize,

    /// Seconds a session may stay unused before it is dropped
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Seconds between two sweeps for idle sessions
    #[serde(default = "default_session_sweep_interval_secs")]
    pub session_sweep_interval_secs: u64,
}

fn default_catalog_path() -> String {
    "processed_movie_data.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity_matrix.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_count() -> usize {
    5
}

fn default_random_pick_count() -> usize {
    5
}

fn default_session_ttl_secs() -> u64 {
    3600
}

fn default_session_sweep_interval_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            similarity_path: default_similarity_path(),
            host: default_host(),
            port: default_port(),
            default_recommendation_count: default_recommendation_count(),
            random_pick_count: default_random_pick_count(),
            session_ttl_secs: default_session_ttl_secs(),
            session_sweep_interval_secs: default_session_sweep_interval_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Period of the idle session sweep, at least one second
    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs.max(1))
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.catalog_path, "processed_movie_data.json");
        assert_eq!(config.similarity_path, "similarity_matrix.json");
        assert_eq!(config.default_recommendation_count, 5);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.session_sweep_interval_secs, 60);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("CATALOG_PATH".to_string(), "/data/movies.json".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("RANDOM_PICK_COUNT".to_string(), "8".to_string()),
            ("SESSION_TTL_SECS".to_string(), "600".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.catalog_path, "/data/movies.json");
        assert_eq!(config.port, 8080);
        assert_eq!(config.random_pick_count, 8);
        assert_eq!(config.session_ttl_secs, 600);
    }
}
