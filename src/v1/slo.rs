use serde::{Deserialize, Serialize};

use super::{
    v1_object, AlertPolicy, AlertPolicySpec, DurationShorthand, Metadata, Operator, Sli, SliSpec,
};
use crate::resolution::slot::{Embedded, Slot};
use crate::types::{Kind, Version};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slo {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: SloSpec,
}

v1_object!(Slo, SloSpec, Kind::Slo, Slo);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub service: String,
    /// `indicator` or `indicatorRef` on the wire.
    #[serde(flatten, with = "indicator_fields")]
    pub indicator: Option<Slot<SloIndicatorInline>>,
    #[serde(default)]
    pub budgeting_method: BudgetingMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_window: Vec<TimeWindow>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert_policies: Vec<Slot<SloAlertPolicyInline>>,
}

impl SloSpec {
    /// Composite SLOs define their indicators per objective.
    pub fn has_composite_objectives(&self) -> bool {
        self.objectives.iter().any(|o| o.indicator.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BudgetingMethod {
    #[default]
    Occurrences,
    Timeslices,
    RatioTimeslices,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "op", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slice_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slice_window: Option<DurationShorthand>,
    /// Set only for composite SLOs.
    #[serde(flatten, with = "indicator_fields")]
    pub indicator: Option<Slot<SloIndicatorInline>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_weight: Option<f64>,
}

/// (De)serializes an optional indicator slot flattened into its parent map.
///
/// Decoding goes through a plain struct rather than a flattened `Option`, so
/// a malformed payload or both keys being set fail the whole decode instead
/// of leaving the indicator unset.
mod indicator_fields {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::SloIndicatorInline;
    use crate::resolution::slot::Slot;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct IndicatorFields {
        #[serde(default)]
        indicator: Option<serde_json::Value>,
        #[serde(default)]
        indicator_ref: Option<serde_json::Value>,
    }

    pub fn serialize<S: Serializer>(
        indicator: &Option<Slot<SloIndicatorInline>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        indicator.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Slot<SloIndicatorInline>>, D::Error> {
        let fields = IndicatorFields::deserialize(deserializer)?;

        let mut map = serde_json::Map::new();
        if let Some(inline) = fields.indicator {
            map.insert("indicator".to_string(), inline);
        }
        if let Some(reference) = fields.indicator_ref {
            map.insert("indicatorRef".to_string(), reference);
        }
        if map.is_empty() {
            return Ok(None);
        }

        Slot::deserialize(serde_json::Value::Object(map))
            .map(Some)
            .map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub duration: DurationShorthand,
    #[serde(default)]
    pub is_rolling: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<Calendar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub start_time: String,
    pub time_zone: String,
}

/// An SLI embedded in an SLO or in a composite objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloIndicatorInline {
    pub metadata: Metadata,
    pub spec: SliSpec,
}

impl Embedded for SloIndicatorInline {
    type Standalone = Sli;
    const REFERENCE_FIELD: &'static str = "indicatorRef";
    const INLINE_FIELD: Option<&'static str> = Some("indicator");

    fn embed(object: &Sli) -> Self {
        Self {
            metadata: object.metadata.clone(),
            spec: object.spec.clone(),
        }
    }

    fn extract(&self) -> Sli {
        Sli::new(self.metadata.clone(), self.spec.clone())
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// An alert policy embedded in an SLO's `alertPolicies` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloAlertPolicyInline {
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: AlertPolicySpec,
}

impl Embedded for SloAlertPolicyInline {
    type Standalone = AlertPolicy;
    const REFERENCE_FIELD: &'static str = "alertPolicyRef";

    fn embed(object: &AlertPolicy) -> Self {
        Self {
            kind: object.kind,
            metadata: object.metadata.clone(),
            spec: object.spec.clone(),
        }
    }

    fn extract(&self) -> AlertPolicy {
        AlertPolicy::new(self.metadata.clone(), self.spec.clone())
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}
