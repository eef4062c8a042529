/// Reference resolution module.
///
/// Converts dependencies between their by-name reference form and their
/// inline form, in both directions:
///
/// - [`ReferenceInliner`] embeds referenced objects into the objects that
///   reference them, tracking which standalone objects were consumed.
/// - [`ReferenceExporter`] extracts inline definitions into standalone
///   objects and leaves references behind.
///
/// Both walk only objects exposing [`ReferenceResolution`].
pub mod path;
pub mod slot;

mod exporter;
mod inliner;

pub use exporter::{export_objects, ReferenceExporter};
pub use inliner::{inline_objects, InlineContext, InlineResult, ReferenceInliner};
pub use path::FieldPath;
pub use slot::{Embedded, Slot};

use crate::config::ReferenceConfig;
use crate::errors::ReferenceNotFound;
use crate::types::Object;
use crate::v1;

/// Capability of an object version whose objects carry inline-or-reference
/// dependencies.
pub trait ReferenceResolution {
    /// Returns a copy of the object with every enabled reference replaced by
    /// an inline copy of the object it names.
    fn inline_references(&self, ctx: &mut InlineContext<'_>) -> Result<Object, ReferenceNotFound>;

    /// Pushes a copy of the object with every enabled inline definition
    /// replaced by a reference, followed by the extracted definitions.
    fn export_references(&self, config: &ReferenceConfig, out: &mut Vec<Object>);
}

impl ReferenceResolution for v1::Object {
    fn inline_references(&self, ctx: &mut InlineContext<'_>) -> Result<Object, ReferenceNotFound> {
        ctx.inline_v1(self)
    }

    fn export_references(&self, config: &ReferenceConfig, out: &mut Vec<Object>) {
        exporter::export_v1(self, config, out);
    }
}
