use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{v1_object, Metadata};
use crate::types::{Kind, Version};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sli {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: SliSpec,
}

v1_object!(Sli, SliSpec, Kind::Sli, Sli);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_metric: Option<MetricSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_metric: Option<RatioMetric>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioMetric {
    #[serde(default)]
    pub counter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good: Option<MetricSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad: Option<MetricSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<MetricSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<RawMetricType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<MetricSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawMetricType {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    pub metric_source: MetricSource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metric_source_ref: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub source_type: String,
    #[serde(default)]
    pub spec: BTreeMap<String, serde_json::Value>,
}
