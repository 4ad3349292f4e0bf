use log::LevelFilter;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Runtime settings for the dashboard client.
///
/// The defaults can be overridden at build time with `ADMIN_API_URL` and
/// `ADMIN_LOG_LEVEL`, since a wasm bundle has no process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub log_level: LevelFilter,
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Absolute URL for an API path such as `/admin/42`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let log_level = option_env!("ADMIN_LOG_LEVEL")
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self {
            base_url: normalize_base_url(option_env!("ADMIN_API_URL").unwrap_or(DEFAULT_BASE_URL).to_string()),
            log_level,
        }
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let config = ClientConfig::with_base_url("https://api.example.com/v1/");
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.url("/admin/7"), "https://api.example.com/v1/admin/7");
        assert_eq!(config.url("plans"), "https://api.example.com/v1/plans");
    }

    #[test]
    fn test_default_has_no_trailing_slash() {
        let config = ClientConfig::default();
        assert!(!config.base_url.ends_with('/'));
    }
}
