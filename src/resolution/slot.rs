use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Cataloged;

/// A dependency that is either embedded in its parent or referenced by name.
///
/// Exactly one arm is ever populated, so the "both" and "neither" states of
/// the wire format cannot be represented once decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Inline(T),
    Reference(String),
}

impl<T> Slot<T> {
    pub fn reference(name: impl Into<String>) -> Self {
        Slot::Reference(name.into())
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Slot::Inline(_))
    }

    pub fn as_inline(&self) -> Option<&T> {
        match self {
            Slot::Inline(payload) => Some(payload),
            Slot::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Slot::Inline(_) => None,
            Slot::Reference(name) => Some(name),
        }
    }
}

impl<T: Embedded> Slot<T> {
    /// Name of the dependency, whichever arm holds it.
    pub fn target_name(&self) -> &str {
        match self {
            Slot::Inline(payload) => payload.name(),
            Slot::Reference(name) => name,
        }
    }
}

/// The inline payload of a [`Slot`], convertible to and from the standalone
/// object it stands for.
pub trait Embedded: Sized {
    type Standalone: Cataloged + Clone;

    /// Wire field holding the referenced name, e.g. `targetRef`.
    const REFERENCE_FIELD: &'static str;

    /// Wire field wrapping the inline payload, when it is not embedded
    /// directly in the enclosing map (e.g. `indicator`).
    const INLINE_FIELD: Option<&'static str> = None;

    /// Builds the inline payload from a standalone object.
    fn embed(object: &Self::Standalone) -> Self;

    /// Builds a standalone object from the inline payload.
    fn extract(&self) -> Self::Standalone;

    fn name(&self) -> &str;
}

impl<T: Embedded + Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self, T::INLINE_FIELD) {
            (Slot::Inline(payload), None) => payload.serialize(serializer),
            (Slot::Inline(payload), Some(field)) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(field, payload)?;
                map.end()
            }
            (Slot::Reference(name), _) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(T::REFERENCE_FIELD, name)?;
                map.end()
            }
        }
    }
}

impl<'de, T: Embedded + DeserializeOwned> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields: serde_json::Map<String, serde_json::Value> =
            Deserialize::deserialize(deserializer)?;
        let reference = fields.remove(T::REFERENCE_FIELD);

        let payload = match T::INLINE_FIELD {
            Some(field) => fields.remove(field),
            // An embedded payload always carries a spec.
            None if fields.contains_key("spec") => Some(serde_json::Value::Object(fields)),
            None => None,
        };

        match (reference, payload) {
            (Some(_), Some(_)) => Err(D::Error::custom(format!(
                "'{}' and an inline definition are mutually exclusive",
                T::REFERENCE_FIELD
            ))),
            (Some(reference), None) => match reference {
                serde_json::Value::String(name) => Ok(Slot::Reference(name)),
                other => Err(D::Error::custom(format!(
                    "'{}' must be a string, got {other}",
                    T::REFERENCE_FIELD
                ))),
            },
            (None, Some(payload)) => serde_json::from_value(payload)
                .map(Slot::Inline)
                .map_err(D::Error::custom),
            (None, None) => Err(D::Error::custom(format!(
                "expected either '{}' or an inline definition",
                T::REFERENCE_FIELD
            ))),
        }
    }
}
