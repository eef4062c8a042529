use tracing::{debug, info};

use super::slot::{Embedded, Slot};
use crate::catalog::Cataloged;
use crate::config::{ReferenceConfig, Relation};
use crate::types::Object;
use crate::v1::{self, AlertPolicy, Slo};

/// Replaces inline dependencies with by-name references, emitting each
/// extracted dependency as a standalone object right after its parent.
#[derive(Debug, Clone)]
pub struct ReferenceExporter<'a> {
    objects: &'a [Object],
    config: ReferenceConfig,
}

impl<'a> ReferenceExporter<'a> {
    pub fn new(objects: &'a [Object]) -> Self {
        Self {
            objects,
            config: ReferenceConfig::default(),
        }
    }

    /// Restricts which relations are exported.
    pub fn with_config(mut self, config: ReferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn export(&self) -> Vec<Object> {
        let mut exported = Vec::with_capacity(self.objects.len());
        for object in self.objects {
            match object.reference_resolution() {
                Some(resolvable) => resolvable.export_references(&self.config, &mut exported),
                None => exported.push(object.clone()),
            }
        }

        info!(
            objects = self.objects.len(),
            extracted = exported.len() - self.objects.len(),
            "exported inline definitions"
        );
        exported
    }
}

/// Exports every inline definition in `objects` with the default config.
pub fn export_objects(objects: &[Object]) -> Vec<Object> {
    ReferenceExporter::new(objects).export()
}

pub(crate) fn export_v1(object: &v1::Object, config: &ReferenceConfig, out: &mut Vec<Object>) {
    match object {
        v1::Object::AlertPolicy(policy) => export_alert_policy(policy.clone(), config, out),
        v1::Object::Slo(slo) => export_slo(slo.clone(), config, out),
        other => out.push(Object::V1(other.clone())),
    }
}

fn export_alert_policy(mut policy: AlertPolicy, config: &ReferenceConfig, out: &mut Vec<Object>) {
    let mut extracted = Vec::new();
    if config.is_enabled(Relation::AlertPolicyNotificationTargets) {
        for slot in &mut policy.spec.notification_targets {
            extract_slot(slot, &mut extracted);
        }
    }
    if config.is_enabled(Relation::AlertPolicyConditions) {
        for slot in &mut policy.spec.conditions {
            extract_slot(slot, &mut extracted);
        }
    }

    out.push(policy.into_object());
    out.extend(extracted);
}

fn export_slo(mut slo: Slo, config: &ReferenceConfig, out: &mut Vec<Object>) {
    let mut extracted = Vec::new();

    if config.is_enabled(Relation::SloAlertPolicies) {
        for slot in &mut slo.spec.alert_policies {
            let Slot::Inline(inline) = slot else {
                continue;
            };
            let policy = inline.extract();
            debug!(
                kind = %AlertPolicy::OBJECT_TYPE,
                name = %policy.metadata.name,
                "extracted inline definition"
            );
            *slot = Slot::reference(policy.metadata.name.clone());
            export_alert_policy(policy, config, &mut extracted);
        }
    }

    if config.is_enabled(Relation::SloIndicator) {
        if let Some(slot) = slo.spec.indicator.as_mut() {
            extract_slot(slot, &mut extracted);
        }
        for objective in &mut slo.spec.objectives {
            if let Some(slot) = objective.indicator.as_mut() {
                extract_slot(slot, &mut extracted);
            }
        }
    }

    out.push(slo.into_object());
    out.extend(extracted);
}

/// Replaces an inline slot with a reference to its payload's name, pushing the
/// extracted standalone object to `out`.
fn extract_slot<E: Embedded>(slot: &mut Slot<E>, out: &mut Vec<Object>) {
    let Slot::Inline(payload) = slot else {
        return;
    };
    let kind = <E::Standalone as Cataloged>::OBJECT_TYPE;
    let name = payload.name().to_string();
    let standalone = payload.extract();
    debug!(kind = %kind, name = %name, "extracted inline definition");
    *slot = Slot::Reference(name);
    out.push(standalone.into_object());
}
