//! Configuration types.

use serde::{Deserialize, Serialize};

use super::{Palette, PaletteEntry};
use crate::alert::Rule;

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 2;

/// Which rules contribute channels to the watched-channel index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Every rule, enabled or not.
    #[default]
    AllRules,
    /// Only enabled rules.
    EnabledOnly,
}

/// Alert configuration: the ordered rule list plus global settings.
///
/// Rule order is priority order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub version: u32,
    pub index_policy: IndexPolicy,
    pub palette: Vec<PaletteEntry>,
    pub alerts: Vec<Rule>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            index_policy: IndexPolicy::default(),
            palette: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl AlertsConfig {
    /// Create a configuration holding `alerts`.
    #[must_use]
    pub fn with_alerts(alerts: Vec<Rule>) -> Self {
        Self {
            alerts,
            ..Self::default()
        }
    }

    /// Color lookup built from the palette entries.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::from_entries(&self.palette)
    }

    /// Clamp out-of-range values loaded from disk.
    pub fn normalize(&mut self) {
        for rule in &mut self.alerts {
            let volume = rule.volume;
            rule.set_volume(volume);
        }
    }
}
