use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{OpenSloError, Result};
use crate::types::Object;

/// Wire formats understood by [`decode`] and [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectFormat {
    #[default]
    Yaml,
    Json,
}

#[allow(clippy::should_implement_trait)]
impl ObjectFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectFormat::Yaml => "yaml",
            ObjectFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<ObjectFormat> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ObjectFormat::Yaml),
            "json" => Some(ObjectFormat::Json),
            _ => None,
        }
    }

    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<ObjectFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ObjectFormat::from_str)
    }
}

impl fmt::Display for ObjectFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes every object found in `input`.
///
/// YAML input may hold several `---` separated documents; each document, like
/// a JSON input, is either a single object or a sequence of objects. Empty
/// documents are skipped.
pub fn decode(input: &str, format: ObjectFormat) -> Result<Vec<Object>> {
    let decode_err = |message: String| OpenSloError::Decode { message, format };

    let documents = match format {
        ObjectFormat::Json => {
            let document: serde_json::Value =
                serde_json::from_str(input).map_err(|e| decode_err(e.to_string()))?;
            vec![document]
        }
        ObjectFormat::Yaml => {
            let mut documents = Vec::new();
            for document in serde_yaml::Deserializer::from_str(input) {
                let value = serde_json::Value::deserialize(document)
                    .map_err(|e| decode_err(e.to_string()))?;
                documents.push(value);
            }
            documents
        }
    };

    let mut objects = Vec::new();
    for document in documents {
        match document {
            serde_json::Value::Null => {}
            serde_json::Value::Array(items) => {
                for item in items {
                    let object = Object::from_value(item).map_err(|e| decode_err(e.to_string()))?;
                    objects.push(object);
                }
            }
            serde_json::Value::Object(_) => {
                let object = Object::from_value(document).map_err(|e| decode_err(e.to_string()))?;
                objects.push(object);
            }
            other => {
                return Err(decode_err(format!(
                    "expected an object or a list of objects, got {other}"
                )))
            }
        }
    }
    Ok(objects)
}

/// Encodes `objects` in the given format.
///
/// A single object is written on its own; several objects become a YAML
/// document stream or a JSON array.
pub fn encode(objects: &[Object], format: ObjectFormat) -> Result<String> {
    let encode_err = |message: String| OpenSloError::Encode { message, format };

    match format {
        ObjectFormat::Json => {
            let mut out = match objects {
                [single] => serde_json::to_string_pretty(single),
                _ => serde_json::to_string_pretty(objects),
            }
            .map_err(|e| encode_err(e.to_string()))?;
            out.push('\n');
            Ok(out)
        }
        ObjectFormat::Yaml => {
            let mut documents = Vec::with_capacity(objects.len());
            for object in objects {
                let document =
                    serde_yaml::to_string(object).map_err(|e| encode_err(e.to_string()))?;
                documents.push(document);
            }
            Ok(documents.join("---\n"))
        }
    }
}
