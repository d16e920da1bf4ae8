use serde::{Deserialize, Serialize};

/// Endpoints and limits for talking to the remote assignment service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// URL of the remote login form.
    pub login_url: String,
    /// URL of the remote slot-assignment endpoint.
    pub assign_url: String,
    /// URL of the badge catalog feed.
    pub catalog_url: String,
    /// Upper bound on any single remote call, in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            login_url: "https://boardgamegeek.com/login".to_string(),
            assign_url: "https://boardgamegeek.com/geekmicrobadge.php".to_string(),
            catalog_url: "https://boardgamegeek.com/api/microbadges".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Minutes between randomize passes; also paces preset rotation.
    pub interval_minutes: u64,
    /// Remote assignment service endpoints.
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_minutes: 1,
            remote: RemoteConfig::default(),
        }
    }
}
