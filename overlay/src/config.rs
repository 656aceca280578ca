use serde::{Deserialize, Serialize};

/// Which deployment the overlay is running in. Gates development aids such
/// as the keyboard alert trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
    Local,
}

impl RuntimeMode {
    pub fn debug_aids_enabled(self) -> bool {
        matches!(self, Self::Development | Self::Local)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub settings_url: String,
    pub polling_interval_ms: u64,
    pub runtime_mode: RuntimeMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://extra-life.donordrive.com"),
            settings_url: String::from("http://127.0.0.1:8081/settings"),
            polling_interval_ms: 15_000,
            runtime_mode: RuntimeMode::Production,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ser_app_config() {
        let config: AppConfig = Default::default();
        let serialized = toml::to_string(&config).unwrap();
        let deser = toml::from_str(&serialized);
        assert_eq!(deser, Ok(config));
    }

    #[test]
    fn test_runtime_mode_gates_debug_aids() {
        assert!(!RuntimeMode::Production.debug_aids_enabled());
        assert!(RuntimeMode::Development.debug_aids_enabled());
        assert!(RuntimeMode::Local.debug_aids_enabled());
    }
}
