//! Level resolution: configuration settings mapped to concrete emission
//! decisions, once, at middleware construction.

use causeway_common::{CausewayError, LevelConfig, LevelSetting, Severity};

use crate::record::{Emission, RecordKind};

/// Resolved emission decision for each record kind.
///
/// Defaults when a kind is unset: `action` and `error` at Info,
/// `prev_state` and `next_state` at Debug.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLevels {
    pub prev_state: Emission,
    pub action: Emission,
    pub error: Emission,
    pub next_state: Emission,
}

impl ResolvedLevels {
    /// Resolve a configuration. An unknown severity name fails here,
    /// before any dispatch occurs.
    pub fn resolve(config: &LevelConfig) -> Result<Self, CausewayError> {
        Ok(Self {
            prev_state: resolve_one(&config.prev_state, Severity::Debug)?,
            action: resolve_one(&config.action, Severity::Info)?,
            error: resolve_one(&config.error, Severity::Info)?,
            next_state: resolve_one(&config.next_state, Severity::Debug)?,
        })
    }

    pub fn for_kind(&self, kind: RecordKind) -> Emission {
        match kind {
            RecordKind::PrevState => self.prev_state,
            RecordKind::Action => self.action,
            RecordKind::Error => self.error,
            RecordKind::NextState => self.next_state,
        }
    }
}

fn resolve_one(setting: &LevelSetting, default: Severity) -> Result<Emission, CausewayError> {
    match setting {
        LevelSetting::Unset => Ok(Emission::At(default)),
        LevelSetting::Off => Ok(Emission::Suppressed),
        LevelSetting::Named(name) => Ok(Emission::At(name.parse()?)),
    }
}
