//! Typed model of the `openslo/v1` specification.
//!
//! This is the only version whose objects carry resolvable references
//! (see [`crate::resolution`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Kind, Version};

mod alert;
mod service;
mod sli;
mod slo;

pub use alert::*;
pub use service::*;
pub use sli::*;
pub use slo::*;

/// The `apiVersion` of every object in this module.
pub const API_VERSION: Version = Version::V1;

/// Kinds supported by `openslo/v1`.
pub const SUPPORTED_KINDS: &[Kind] = &[
    Kind::Slo,
    Kind::Sli,
    Kind::DataSource,
    Kind::Service,
    Kind::AlertPolicy,
    Kind::AlertCondition,
    Kind::AlertNotificationTarget,
];

/// Object metadata shared by every v1 kind and by inline payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

impl Metadata {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub type Labels = BTreeMap<String, Label>;

pub type Annotations = BTreeMap<String, String>;

/// A label value; decodes from either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Label(pub Vec<String>);

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(value) => Label(vec![value]),
            Repr::Many(values) => Label(values),
        })
    }
}

/// Comparison operator used by objectives and alert conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Gt,
    Lt,
    Gte,
    Lte,
}

/// Duration in OpenSLO shorthand notation, e.g. `28d` or `5m`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationShorthand(pub String);

/// Any `openslo/v1` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Object {
    Service(Service),
    Slo(Slo),
    Sli(Sli),
    DataSource(DataSource),
    AlertPolicy(AlertPolicy),
    AlertCondition(AlertCondition),
    AlertNotificationTarget(AlertNotificationTarget),
}

impl Object {
    pub fn kind(&self) -> Kind {
        match self {
            Object::Service(_) => Kind::Service,
            Object::Slo(_) => Kind::Slo,
            Object::Sli(_) => Kind::Sli,
            Object::DataSource(_) => Kind::DataSource,
            Object::AlertPolicy(_) => Kind::AlertPolicy,
            Object::AlertCondition(_) => Kind::AlertCondition,
            Object::AlertNotificationTarget(_) => Kind::AlertNotificationTarget,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Object::Service(o) => &o.metadata,
            Object::Slo(o) => &o.metadata,
            Object::Sli(o) => &o.metadata,
            Object::DataSource(o) => &o.metadata,
            Object::AlertPolicy(o) => &o.metadata,
            Object::AlertCondition(o) => &o.metadata,
            Object::AlertNotificationTarget(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Decodes a v1 object of the given kind from a generic document.
    pub fn from_value(kind: Kind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            Kind::Service => Object::Service(serde_json::from_value(value)?),
            Kind::Slo => Object::Slo(serde_json::from_value(value)?),
            Kind::Sli => Object::Sli(serde_json::from_value(value)?),
            Kind::DataSource => Object::DataSource(serde_json::from_value(value)?),
            Kind::AlertPolicy => Object::AlertPolicy(serde_json::from_value(value)?),
            Kind::AlertCondition => Object::AlertCondition(serde_json::from_value(value)?),
            Kind::AlertNotificationTarget => {
                Object::AlertNotificationTarget(serde_json::from_value(value)?)
            }
        })
    }
}

/// Implements construction, catalog lookup and conversion into
/// [`crate::types::Object`] for a standalone v1 object type.
macro_rules! v1_object {
    ($ty:ident, $spec:ident, $kind:expr, $variant:ident) => {
        impl $ty {
            pub fn new(metadata: $crate::v1::Metadata, spec: $spec) -> Self {
                Self {
                    api_version: $crate::v1::API_VERSION,
                    kind: $kind,
                    metadata,
                    spec,
                }
            }
        }

        impl $crate::catalog::Cataloged for $ty {
            const OBJECT_TYPE: $crate::types::ObjectType =
                $crate::types::ObjectType::new($crate::v1::API_VERSION, $kind);

            fn from_object(object: &$crate::types::Object) -> Option<&Self> {
                match object {
                    $crate::types::Object::V1($crate::v1::Object::$variant(o)) => Some(o),
                    _ => None,
                }
            }

            fn into_object(self) -> $crate::types::Object {
                $crate::types::Object::V1($crate::v1::Object::$variant(self))
            }
        }

        impl From<$ty> for $crate::types::Object {
            fn from(value: $ty) -> Self {
                $crate::types::Object::V1($crate::v1::Object::$variant(value))
            }
        }
    };
}

pub(crate) use v1_object;
