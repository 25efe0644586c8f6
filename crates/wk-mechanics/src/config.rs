//! Engine configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::Formula;
use crate::error::{MechError, MechResult};

/// Campaign setting. Prefixes roll category keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    /// Sword and sorcery.
    #[default]
    Fantasy,
    /// Space opera.
    StarWars,
    /// Hard science fiction.
    SciFi,
    /// Present day.
    Modern,
}

impl Setting {
    /// Key used in localization paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::StarWars => "star_wars",
            Self::SciFi => "sci_fi",
            Self::Modern => "modern",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Setting {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fantasy" => Ok(Self::Fantasy),
            "star_wars" => Ok(Self::StarWars),
            "sci_fi" => Ok(Self::SciFi),
            "modern" => Ok(Self::Modern),
            other => Err(MechError::InvalidConfig(format!("unknown setting: {other}"))),
        }
    }
}

/// Configuration shared by every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Campaign setting.
    pub setting: Setting,
    /// Action points every character gets per round.
    pub max_actions: u32,
    /// Dice rolled for ability and aptitude checks.
    pub check_dice: String,
    /// Critical range applied to checks.
    pub critical_range: String,
    /// Dice rolled for initiative.
    pub initiative_dice: String,
    /// Separator used when joining multi-line descriptions.
    pub description_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            setting: Setting::Fantasy,
            max_actions: 5,
            check_dice: "1d20".into(),
            critical_range: "20".into(),
            initiative_dice: "1d20".into(),
            description_separator: "<br>".into(),
        }
    }
}

impl EngineConfig {
    /// Set the campaign setting.
    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.setting = setting;
        self
    }

    /// Set the per-round action points.
    pub fn with_max_actions(mut self, max: u32) -> Self {
        self.max_actions = max;
        self
    }

    /// Set the check dice.
    pub fn with_check_dice(mut self, dice: impl Into<String>) -> Self {
        self.check_dice = dice.into();
        self
    }

    /// Set the critical range.
    pub fn with_critical_range(mut self, range: impl Into<String>) -> Self {
        self.critical_range = range.into();
        self
    }

    /// Set the initiative dice.
    pub fn with_initiative_dice(mut self, dice: impl Into<String>) -> Self {
        self.initiative_dice = dice.into();
        self
    }

    /// Set the description separator.
    pub fn with_description_separator(mut self, separator: impl Into<String>) -> Self {
        self.description_separator = separator.into();
        self
    }

    /// `max_actions` as a pool bound.
    pub fn max_actions_i32(&self) -> i32 {
        i32::try_from(self.max_actions).unwrap_or(i32::MAX)
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(source: &str) -> MechResult<Self> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `WK_SETTING` and `WK_MAX_ACTIONS`.
    pub fn from_env() -> MechResult<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup (the environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> MechResult<Self> {
        if let Some(setting) = lookup("WK_SETTING") {
            self.setting = setting.parse()?;
        }
        if let Some(max) = lookup("WK_MAX_ACTIONS") {
            self.max_actions = max.trim().parse().map_err(|_| {
                MechError::InvalidConfig(format!("WK_MAX_ACTIONS is not a count: {max}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the dice expressions parse.
    pub fn validate(&self) -> MechResult<()> {
        for (name, dice) in [
            ("check_dice", &self.check_dice),
            ("initiative_dice", &self.initiative_dice),
        ] {
            Formula::parse(dice)
                .map_err(|e| MechError::InvalidConfig(format!("{name}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.setting, Setting::Fantasy);
        assert_eq!(config.max_actions, 5);
        assert_eq!(config.check_dice, "1d20");
        assert_eq!(config.critical_range, "20");
        assert_eq!(config.description_separator, "<br>");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let config = EngineConfig::default()
            .with_setting(Setting::StarWars)
            .with_max_actions(3)
            .with_critical_range("18-20");
        assert_eq!(config.setting.as_str(), "star_wars");
        assert_eq!(config.max_actions_i32(), 3);
        assert_eq!(config.critical_range, "18-20");
    }

    #[test]
    fn json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"setting": "sci_fi", "max_actions": 4}"#).unwrap();
        assert_eq!(config.setting, Setting::SciFi);
        assert_eq!(config.max_actions, 4);
        assert_eq!(config.initiative_dice, "1d20");
    }

    #[test]
    fn json_rejects_bad_dice() {
        let err = EngineConfig::from_json(r#"{"check_dice": "d"}"#).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfig(_)));
    }

    #[test]
    fn overrides_from_lookup() {
        let config = EngineConfig::default()
            .with_overrides(|key| match key {
                "WK_SETTING" => Some("modern".into()),
                "WK_MAX_ACTIONS" => Some("7".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.setting, Setting::Modern);
        assert_eq!(config.max_actions, 7);
    }

    #[test]
    fn bad_override_is_rejected() {
        let err = EngineConfig::default()
            .with_overrides(|key| (key == "WK_MAX_ACTIONS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("WK_MAX_ACTIONS"));
    }

    #[test]
    fn setting_parse() {
        assert_eq!("Star-Wars".parse::<Setting>().unwrap(), Setting::StarWars);
        assert!("steampunk".parse::<Setting>().is_err());
    }
}
