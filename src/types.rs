use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::resolution::ReferenceResolution;
use crate::v1;

/// Versions of the OpenSLO specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "openslo/v1alpha")]
    V1alpha,
    #[serde(rename = "openslo/v1")]
    V1,
    #[serde(rename = "openslo.com/v2alpha")]
    V2alpha,
}

#[allow(clippy::should_implement_trait)]
impl Version {
    /// Returns the `apiVersion` string of this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1alpha => "openslo/v1alpha",
            Version::V1 => "openslo/v1",
            Version::V2alpha => "openslo.com/v2alpha",
        }
    }

    /// Parses an `apiVersion` string, returning `None` for unsupported values.
    pub fn from_str(s: &str) -> Option<Version> {
        match s {
            "openslo/v1alpha" => Some(Version::V1alpha),
            "openslo/v1" => Some(Version::V1),
            "openslo.com/v2alpha" => Some(Version::V2alpha),
            _ => None,
        }
    }

    /// Returns the version without its group prefix, e.g. `v1` for `openslo/v1`.
    pub fn short(&self) -> &'static str {
        let full = self.as_str();
        match full.find('/') {
            Some(i) => &full[i + 1..],
            None => full,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object kinds defined by the OpenSLO specification.
///
/// Not every specification version supports every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "SLO")]
    Slo,
    #[serde(rename = "SLI")]
    Sli,
    DataSource,
    Service,
    AlertPolicy,
    AlertCondition,
    AlertNotificationTarget,
}

#[allow(clippy::should_implement_trait)]
impl Kind {
    /// Returns the wire representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Slo => "SLO",
            Kind::Sli => "SLI",
            Kind::DataSource => "DataSource",
            Kind::Service => "Service",
            Kind::AlertPolicy => "AlertPolicy",
            Kind::AlertCondition => "AlertCondition",
            Kind::AlertNotificationTarget => "AlertNotificationTarget",
        }
    }

    /// Parses a kind string, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Kind> {
        match s {
            "SLO" => Some(Kind::Slo),
            "SLI" => Some(Kind::Sli),
            "DataSource" => Some(Kind::DataSource),
            "Service" => Some(Kind::Service),
            "AlertPolicy" => Some(Kind::AlertPolicy),
            "AlertCondition" => Some(Kind::AlertCondition),
            "AlertNotificationTarget" => Some(Kind::AlertNotificationTarget),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version and kind pair, printed as `v1.SLO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectType {
    pub version: Version,
    pub kind: Kind,
}

impl ObjectType {
    pub const fn new(version: Version, kind: Kind) -> Self {
        Self { version, kind }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.version.short(), self.kind)
    }
}

/// Printable identity of a single object, e.g. `v1.SLO 'my-slo'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentity {
    pub object_type: ObjectType,
    pub name: String,
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.object_type)
        } else {
            write!(f, "{} '{}'", self.object_type, self.name)
        }
    }
}

/// Metadata of an object whose version has no typed model.
///
/// Only the name is interpreted; everything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An object of a specification version without a typed model.
///
/// These objects never carry resolvable references and pass through the
/// inliner and exporter untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericObject {
    #[serde(rename = "apiVersion")]
    pub api_version: Version,
    pub kind: Kind,
    #[serde(default)]
    pub metadata: GenericMetadata,
    #[serde(flatten)]
    pub body: serde_json::Map<String, serde_json::Value>,
}

/// A single OpenSLO object of any supported version and kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    V1(v1::Object),
    Generic(GenericObject),
}

impl Object {
    pub fn version(&self) -> Version {
        match self {
            Object::V1(_) => Version::V1,
            Object::Generic(o) => o.api_version,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Object::V1(o) => o.kind(),
            Object::Generic(o) => o.kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Object::V1(o) => o.name(),
            Object::Generic(o) => &o.metadata.name,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::new(self.version(), self.kind())
    }

    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity {
            object_type: self.object_type(),
            name: self.name().to_string(),
        }
    }

    /// Returns the reference resolution capability of this object, if its
    /// version supports inline and referenced dependencies.
    pub fn reference_resolution(&self) -> Option<&dyn ReferenceResolution> {
        match self {
            Object::V1(o) => Some(o),
            Object::Generic(_) => None,
        }
    }

    /// Builds an object from a decoded document, dispatching on `apiVersion`
    /// and then on `kind`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let header = |field: &str| -> Result<String, serde_json::Error> {
            value
                .get(field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| serde_json::Error::custom(format!("missing '{field}' field")))
        };
        let api_version = header("apiVersion")?;
        let version = Version::from_str(&api_version).ok_or_else(|| {
            serde_json::Error::custom(format!("unsupported apiVersion: {api_version}"))
        })?;
        let kind_str = header("kind")?;
        let kind = Kind::from_str(&kind_str)
            .ok_or_else(|| serde_json::Error::custom(format!("unsupported kind: {kind_str}")))?;

        match version {
            Version::V1 => v1::Object::from_value(kind, value).map(Object::V1),
            Version::V1alpha | Version::V2alpha => {
                serde_json::from_value(value).map(Object::Generic)
            }
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identity().fmt(f)
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Object::V1(o) => o.serialize(serializer),
            Object::Generic(o) => o.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Object::from_value(value).map_err(D::Error::custom)
    }
}
