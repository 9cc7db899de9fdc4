//! Logger configuration: one setting per record kind.
//!
//! Each kind is either a named severity, `off` (suppress the kind
//! entirely), or unset (use the documented default). Severity names are
//! validated when the middleware is constructed, not here, so a bad name
//! fails fast before any dispatch happens.

use std::env;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Per-kind level setting. In serialized form a kind accepts a severity
/// name or the boolean `false` to disable it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelSetting {
    /// Not configured; the resolver applies the kind's default severity.
    #[default]
    Unset,
    /// A severity name, validated at resolve time.
    Named(String),
    /// The kind is suppressed entirely.
    Off,
}

impl LevelSetting {
    /// Parse a configuration string. `"off"` and `"false"` disable the
    /// kind; anything else is taken as a severity name.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "off" | "false" => LevelSetting::Off,
            _ => LevelSetting::Named(s.to_string()),
        }
    }
}

impl From<&str> for LevelSetting {
    fn from(s: &str) -> Self {
        LevelSetting::parse(s)
    }
}

impl<'de> Deserialize<'de> for LevelSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SettingVisitor;

        impl<'de> Visitor<'de> for SettingVisitor {
            type Value = LevelSetting;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a severity name or `false`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LevelSetting, E> {
                Ok(LevelSetting::parse(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<LevelSetting, E> {
                if v {
                    Err(E::custom("`true` is not a severity; use a name or omit the kind"))
                } else {
                    Ok(LevelSetting::Off)
                }
            }
        }

        deserializer.deserialize_any(SettingVisitor)
    }
}

/// Level settings for the four record kinds of a dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LevelConfig {
    #[serde(default)]
    pub prev_state: LevelSetting,
    #[serde(default)]
    pub action: LevelSetting,
    #[serde(default)]
    pub error: LevelSetting,
    #[serde(default)]
    pub next_state: LevelSetting,
}

impl LevelConfig {
    pub fn with_prev_state(mut self, setting: impl Into<LevelSetting>) -> Self {
        self.prev_state = setting.into();
        self
    }

    pub fn with_action(mut self, setting: impl Into<LevelSetting>) -> Self {
        self.action = setting.into();
        self
    }

    pub fn with_error(mut self, setting: impl Into<LevelSetting>) -> Self {
        self.error = setting.into();
        self
    }

    pub fn with_next_state(mut self, setting: impl Into<LevelSetting>) -> Self {
        self.next_state = setting.into();
        self
    }

    /// Load level settings from environment variables. Unset vars leave
    /// the kind at its default severity.
    ///
    /// Recognized: `CAUSEWAY_LEVEL_PREV_STATE`, `CAUSEWAY_LEVEL_ACTION`,
    /// `CAUSEWAY_LEVEL_ERROR`, `CAUSEWAY_LEVEL_NEXT_STATE`.
    pub fn from_env() -> Self {
        Self {
            prev_state: env_setting("CAUSEWAY_LEVEL_PREV_STATE"),
            action: env_setting("CAUSEWAY_LEVEL_ACTION"),
            error: env_setting("CAUSEWAY_LEVEL_ERROR"),
            next_state: env_setting("CAUSEWAY_LEVEL_NEXT_STATE"),
        }
    }
}

fn env_setting(key: &str) -> LevelSetting {
    match env::var(key) {
        Ok(v) => LevelSetting::parse(&v),
        Err(_) => LevelSetting::Unset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_names_and_false() {
        let config: LevelConfig = serde_json::from_str(
            r#"{ "action": "warn", "prev_state": false, "next_state": "off" }"#,
        )
        .unwrap();

        assert_eq!(config.action, LevelSetting::Named("warn".into()));
        assert_eq!(config.prev_state, LevelSetting::Off);
        assert_eq!(config.next_state, LevelSetting::Off);
        assert_eq!(config.error, LevelSetting::Unset);
    }

    #[test]
    fn rejects_true() {
        let result: Result<LevelConfig, _> = serde_json::from_str(r#"{ "action": true }"#);
        assert!(result.is_err());
    }

    #[test]
    fn builders_accept_names_and_off() {
        let config = LevelConfig::default()
            .with_action("debug")
            .with_prev_state(LevelSetting::Off);

        assert_eq!(config.action, LevelSetting::Named("debug".into()));
        assert_eq!(config.prev_state, LevelSetting::Off);
    }
}
