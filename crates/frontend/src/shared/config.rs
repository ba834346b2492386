use super::api_utils::DEFAULT_BASE_PATH;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reservation: ReservationConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend context path, or `auto` to take it from the page URL
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReservationConfig {
    pub guest_search_debounce_ms: u32,
    pub guest_search_min_chars: usize,
    pub recent_checkins_limit: usize,
    /// Booked ranges listed under the room selector before "..."
    pub booked_hint_limit: usize,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            guest_search_debounce_ms: 350,
            guest_search_min_chars: 3,
            recent_checkins_limit: 6,
            booked_hint_limit: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub recent_limit: u32,
    pub stats_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: 8,
            stats_days: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown names fall back to `Debug`
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Debug)
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_path = "/OceanViewResortBooking"

[reservation]
guest_search_debounce_ms = 350
guest_search_min_chars = 3
recent_checkins_limit = 6
booked_hint_limit = 3

[dashboard]
recent_limit = 8
stats_days = 30

[logging]
level = "debug"
"#;

/// Element the host page may use to override settings:
/// `<script id="client-config" type="application/toml">...</script>`
pub const CONFIG_ELEMENT_ID: &str = "client-config";

/// TOML text of the override element, if the page has one
pub fn page_override() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|t| !t.trim().is_empty())
}

/// Load configuration.
///
/// Search order:
/// 1. `override_toml` (usually [`page_override`]); missing keys keep defaults
/// 2. Falls back to embedded default config
pub fn load_config(override_toml: Option<&str>) -> anyhow::Result<ClientConfig> {
    if let Some(text) = override_toml {
        let config: ClientConfig = toml::from_str(text)?;
        return Ok(config);
    }
    let config: ClientConfig = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.base_path, "/OceanViewResortBooking");
        assert_eq!(config.reservation, ReservationConfig::default());
        assert_eq!(config.dashboard.recent_limit, 8);
        assert_eq!(config.logging.level(), log::Level::Debug);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = load_config(Some(
            r#"
            [api]
            base_path = "auto"

            [reservation]
            guest_search_debounce_ms = 500
            "#,
        ))
        .unwrap();
        assert_eq!(config.api.base_path, "auto");
        assert_eq!(config.reservation.guest_search_debounce_ms, 500);
        assert_eq!(config.reservation.guest_search_min_chars, 3);
        assert_eq!(config.dashboard.stats_days, 30);
    }

    #[test]
    fn test_invalid_override_is_error() {
        assert!(load_config(Some("[reservation]\nguest_search_min_chars = \"three\"")).is_err());
    }

    #[test]
    fn test_log_level_fallback() {
        let logging = LoggingConfig {
            level: "warn".into(),
        };
        assert_eq!(logging.level(), log::Level::Warn);
        let logging = LoggingConfig {
            level: "loud".into(),
        };
        assert_eq!(logging.level(), log::Level::Debug);
    }
}
