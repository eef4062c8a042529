use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{OpenSloError, Result};

/// Selects which references the inliner and exporter resolve.
///
/// Every switch defaults to `true`. A disabled switch leaves its slots exactly
/// as given: nothing is embedded or extracted, nothing is marked as consumed
/// and dangling references in that arm are not reported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub v1: ReferenceConfigV1,
}

/// Switches for `openslo/v1` objects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfigV1 {
    pub slo: SloReferences,
    pub alert_policy: AlertPolicyReferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SloReferences {
    /// `spec.alertPolicies[*]`, including the policies' own references.
    pub alert_policy: bool,
    /// `spec.indicatorRef` and `spec.objectives[*].indicatorRef`.
    pub sli: bool,
}

impl Default for SloReferences {
    fn default() -> Self {
        Self {
            alert_policy: true,
            sli: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicyReferences {
    /// `spec.conditions[*]`.
    pub alert_condition: bool,
    /// `spec.notificationTargets[*]`.
    pub alert_notification_target: bool,
}

impl Default for AlertPolicyReferences {
    fn default() -> Self {
        Self {
            alert_condition: true,
            alert_notification_target: true,
        }
    }
}

/// A single (source kind, dependency) pair governed by [`ReferenceConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    SloIndicator,
    SloAlertPolicies,
    AlertPolicyConditions,
    AlertPolicyNotificationTargets,
}

#[allow(clippy::should_implement_trait)]
impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::SloIndicator,
        Relation::SloAlertPolicies,
        Relation::AlertPolicyConditions,
        Relation::AlertPolicyNotificationTargets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::SloIndicator => "slo-indicator",
            Relation::SloAlertPolicies => "slo-alert-policies",
            Relation::AlertPolicyConditions => "alert-policy-conditions",
            Relation::AlertPolicyNotificationTargets => "alert-policy-notification-targets",
        }
    }

    pub fn from_str(s: &str) -> Option<Relation> {
        Relation::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl ReferenceConfig {
    /// A configuration with every relation disabled.
    pub fn none() -> Self {
        let mut config = Self::default();
        for relation in Relation::ALL {
            config.set(relation, false);
        }
        config
    }

    pub fn is_enabled(&self, relation: Relation) -> bool {
        match relation {
            Relation::SloIndicator => self.v1.slo.sli,
            Relation::SloAlertPolicies => self.v1.slo.alert_policy,
            Relation::AlertPolicyConditions => self.v1.alert_policy.alert_condition,
            Relation::AlertPolicyNotificationTargets => {
                self.v1.alert_policy.alert_notification_target
            }
        }
    }

    pub fn set(&mut self, relation: Relation, enabled: bool) {
        let switch = match relation {
            Relation::SloIndicator => &mut self.v1.slo.sli,
            Relation::SloAlertPolicies => &mut self.v1.slo.alert_policy,
            Relation::AlertPolicyConditions => &mut self.v1.alert_policy.alert_condition,
            Relation::AlertPolicyNotificationTargets => {
                &mut self.v1.alert_policy.alert_notification_target
            }
        };
        *switch = enabled;
    }

    /// Builder form of [`ReferenceConfig::set`].
    pub fn with(mut self, relation: Relation, enabled: bool) -> Self {
        self.set(relation, enabled);
        self
    }
}

/// Loads a [`ReferenceConfig`] from a `.json` or `.toml` file.
///
/// Missing sections and switches keep their defaults.
pub fn load_config(path: &Path) -> Result<ReferenceConfig> {
    let contents = fs::read_to_string(path).map_err(|e| OpenSloError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    } else {
        toml::from_str(&contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| OpenSloError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })
}

/// Saves a [`ReferenceConfig`] as TOML using an atomic write.
pub fn save_config(path: &Path, config: &ReferenceConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).map_err(|e| OpenSloError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &contents).map_err(|e| OpenSloError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| OpenSloError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
