use serde::{Deserialize, Serialize};

use super::{v1_object, DurationShorthand, Metadata, Operator};
use crate::resolution::slot::{Embedded, Slot};
use crate::types::{Kind, Version};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPolicy {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertPolicySpec,
}

v1_object!(AlertPolicy, AlertPolicySpec, Kind::AlertPolicy, AlertPolicy);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPolicySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub alert_when_no_data: bool,
    #[serde(default)]
    pub alert_when_resolved: bool,
    #[serde(default)]
    pub alert_when_breaching: bool,
    #[serde(default)]
    pub conditions: Vec<Slot<AlertPolicyConditionInline>>,
    #[serde(default)]
    pub notification_targets: Vec<Slot<AlertPolicyNotificationTargetInline>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCondition {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertConditionSpec,
}

v1_object!(AlertCondition, AlertConditionSpec, Kind::AlertCondition, AlertCondition);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConditionSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub severity: String,
    pub condition: ConditionRule,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRule {
    /// Only `burnrate` is defined by v1.
    pub kind: String,
    #[serde(rename = "op", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    pub threshold: f64,
    pub lookback_window: DurationShorthand,
    pub alert_after: DurationShorthand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotificationTarget {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertNotificationTargetSpec,
}

v1_object!(
    AlertNotificationTarget,
    AlertNotificationTargetSpec,
    Kind::AlertNotificationTarget,
    AlertNotificationTarget
);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertNotificationTargetSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub target: String,
}

/// An alert condition embedded in an alert policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicyConditionInline {
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertConditionSpec,
}

impl Embedded for AlertPolicyConditionInline {
    type Standalone = AlertCondition;
    const REFERENCE_FIELD: &'static str = "conditionRef";

    fn embed(object: &AlertCondition) -> Self {
        Self {
            kind: object.kind,
            metadata: object.metadata.clone(),
            spec: object.spec.clone(),
        }
    }

    fn extract(&self) -> AlertCondition {
        AlertCondition::new(self.metadata.clone(), self.spec.clone())
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// A notification target embedded in an alert policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicyNotificationTargetInline {
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertNotificationTargetSpec,
}

impl Embedded for AlertPolicyNotificationTargetInline {
    type Standalone = AlertNotificationTarget;
    const REFERENCE_FIELD: &'static str = "targetRef";

    fn embed(object: &AlertNotificationTarget) -> Self {
        Self {
            kind: object.kind,
            metadata: object.metadata.clone(),
            spec: object.spec.clone(),
        }
    }

    fn extract(&self) -> AlertNotificationTarget {
        AlertNotificationTarget::new(self.metadata.clone(), self.spec.clone())
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}
