use serde::{Deserialize, Serialize};

use super::{v1_object, Metadata};
use crate::types::{Kind, Version};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: ServiceSpec,
}

v1_object!(Service, ServiceSpec, Kind::Service, Service);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub api_version: Version,
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: DataSourceSpec,
}

v1_object!(DataSource, DataSourceSpec, Kind::DataSource, DataSource);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub source_type: String,
    /// Provider specific, kept as free-form JSON.
    #[serde(default)]
    pub connection_details: serde_json::Value,
}
