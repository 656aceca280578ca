use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operator display settings, delivered by the companion settings service.
///
/// Every settings poll replaces the whole value. `theme` and `border` are
/// kept as the raw wire strings so an unrecognized value degrades to the
/// default look instead of rejecting the packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub lang: String,
    pub theme: String,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

impl DisplaySettings {
    pub fn theme(&self) -> Theme {
        self.theme.parse().unwrap_or_default()
    }

    pub fn border_style(&self) -> BorderStyle {
        self.border
            .as_deref()
            .and_then(|b| b.parse().ok())
            .unwrap_or(BorderStyle::None)
    }

    /// Alert volume, full scale when the service omits it.
    pub fn volume(&self) -> f32 {
        self.volume.unwrap_or(1.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(UnknownValue),
        }
    }
}

/// Decoration drawn around the full-viewport container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    None,
    /// Bordered, straight corners.
    Square,
    /// Bordered, rounded corners.
    Rounded,
}

impl FromStr for BorderStyle {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "rounded" => Ok(Self::Rounded),
            _ => Err(UnknownValue),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownValue;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deser_full_settings() {
        let json = r#"{
            "lang": "en",
            "theme": "dark",
            "volume": 0.5,
            "border": "rounded",
            "teamId": "T1"
        }"#;
        let settings: DisplaySettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.lang, "en");
        assert_eq!(settings.theme(), Theme::Dark);
        assert_eq!(settings.volume(), 0.5);
        assert_eq!(settings.border_style(), BorderStyle::Rounded);
        assert_eq!(settings.participant_id, None);
        assert_eq!(settings.team_id.as_deref(), Some("T1"));
    }

    #[test]
    fn test_deser_minimal_settings() {
        let settings: DisplaySettings =
            serde_json::from_str(r#"{"lang": "fr", "theme": "light"}"#).unwrap();
        assert_eq!(settings.theme(), Theme::Light);
        assert_eq!(settings.volume(), 1.0);
        assert_eq!(settings.border_style(), BorderStyle::None);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let settings: DisplaySettings =
            serde_json::from_str(r#"{"lang": "en", "theme": "neon"}"#).unwrap();
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn test_border_mapping() {
        for (wire, expected) in [
            (Some("square"), BorderStyle::Square),
            (Some("rounded"), BorderStyle::Rounded),
            (Some("dotted"), BorderStyle::None),
            (None, BorderStyle::None),
        ] {
            let settings = DisplaySettings {
                lang: String::from("en"),
                theme: String::from("dark"),
                volume: None,
                border: wire.map(String::from),
                participant_id: None,
                team_id: None,
            };
            assert_eq!(settings.border_style(), expected, "border {wire:?}");
        }
    }

    #[test]
    fn test_volume_clamped() {
        let settings: DisplaySettings =
            serde_json::from_str(r#"{"lang": "en", "theme": "dark", "volume": 3.5}"#).unwrap();
        assert_eq!(settings.volume(), 1.0);
    }
}
