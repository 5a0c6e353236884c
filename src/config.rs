use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote dietetics API.
    pub api_base_url: String,
    /// Per-request timeout applied to every collaborator call, in seconds.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("NUTRIPRO_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".into());
        let request_timeout_secs = std::env::var("NUTRIPRO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            api_base_url,
            request_timeout_secs,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_api() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.request_timeout_secs, 30);
    }
}
