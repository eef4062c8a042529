use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::path::FieldPath;
use super::slot::{Embedded, Slot};
use crate::catalog::{Catalog, Cataloged};
use crate::config::{ReferenceConfig, Relation};
use crate::errors::{OpenSloError, ReferenceNotFound, Result};
use crate::types::Object;
use crate::v1::{self, AlertPolicySpec, SloSpec};

type Resolved<T> = std::result::Result<T, ReferenceNotFound>;

/// Replaces by-name references with inline copies of the referenced objects.
///
/// The input pool is only borrowed; every rewritten object is a fresh copy.
/// Inlining is repeatable: calling [`ReferenceInliner::inline`] twice gives
/// the same result.
#[derive(Debug, Clone)]
pub struct ReferenceInliner<'a> {
    objects: &'a [Object],
    universe: Option<&'a [Object]>,
    config: ReferenceConfig,
    remove_referenced: bool,
}

/// Output of [`ReferenceInliner::inline_with_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct InlineResult {
    /// The inlined objects, compacted if requested.
    pub objects: Vec<Object>,
    /// Indices into the input objects that were folded into some inline slot.
    pub consumed: BTreeSet<usize>,
}

impl<'a> ReferenceInliner<'a> {
    pub fn new(objects: &'a [Object]) -> Self {
        Self {
            objects,
            universe: None,
            config: ReferenceConfig::default(),
            remove_referenced: false,
        }
    }

    /// Restricts which relations are inlined.
    pub fn with_config(mut self, config: ReferenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves references against `universe` instead of the input objects.
    pub fn with_universe(mut self, universe: &'a [Object]) -> Self {
        self.universe = Some(universe);
        self
    }

    /// Drops every input object that got inlined somewhere from the output.
    pub fn remove_referenced_objects(mut self) -> Self {
        self.remove_referenced = true;
        self
    }

    pub fn inline(&self) -> Result<Vec<Object>> {
        self.inline_with_report().map(|result| result.objects)
    }

    /// Like [`ReferenceInliner::inline`], also reporting which input objects
    /// were consumed.
    ///
    /// Stops at the first unresolved reference; no partial output is returned.
    pub fn inline_with_report(&self) -> Result<InlineResult> {
        let universe = self.universe.unwrap_or(self.objects);
        let mut ctx = InlineContext::new(Catalog::new(universe), &self.config);

        let mut inlined = Vec::with_capacity(self.objects.len());
        for object in self.objects {
            let resolved = match object.reference_resolution() {
                Some(resolvable) => resolvable
                    .inline_references(&mut ctx)
                    .map_err(|source| OpenSloError::Inline {
                        object: object.identity(),
                        source,
                    })?,
                None => object.clone(),
            };
            inlined.push(resolved);
        }

        let consumed = self.consumed_inputs(universe, &ctx.consumed);
        let objects = if self.remove_referenced {
            inlined
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !consumed.contains(i))
                .map(|(_, object)| object)
                .collect()
        } else {
            inlined
        };

        info!(
            objects = self.objects.len(),
            consumed = consumed.len(),
            output = objects.len(),
            "inlined references"
        );

        Ok(InlineResult { objects, consumed })
    }

    /// Maps consumed universe indices back to input indices.
    fn consumed_inputs(
        &self,
        universe: &[Object],
        consumed: &BTreeSet<usize>,
    ) -> BTreeSet<usize> {
        if self.universe.is_none() {
            return consumed.clone();
        }

        let mut inputs = BTreeSet::new();
        for &index in consumed {
            let Some(target) = universe.get(index) else {
                continue;
            };
            let counterpart = self.objects.iter().position(|o| {
                o.name() == target.name() && o.object_type() == target.object_type()
            });
            match counterpart {
                Some(i) => {
                    inputs.insert(i);
                }
                None if self.remove_referenced => {
                    warn!(
                        object = %target,
                        "consumed reference has no counterpart among the input objects"
                    );
                }
                None => {}
            }
        }
        inputs
    }
}

/// Inlines references in `objects` against themselves, keeping every object.
pub fn inline_objects(objects: &[Object], config: ReferenceConfig) -> Result<Vec<Object>> {
    ReferenceInliner::new(objects).with_config(config).inline()
}

/// State of a single inlining pass: the reference universe, the active
/// switches and the universe indices consumed so far.
#[derive(Debug)]
pub struct InlineContext<'a> {
    catalog: Catalog<'a>,
    config: &'a ReferenceConfig,
    consumed: BTreeSet<usize>,
}

impl<'a> InlineContext<'a> {
    fn new(catalog: Catalog<'a>, config: &'a ReferenceConfig) -> Self {
        Self {
            catalog,
            config,
            consumed: BTreeSet::new(),
        }
    }

    pub(crate) fn inline_v1(&mut self, object: &v1::Object) -> Resolved<Object> {
        let root = FieldPath::root();
        Ok(match object {
            v1::Object::AlertPolicy(policy) => {
                let mut policy = policy.clone();
                self.inline_alert_policy(&mut policy.spec, &root)?;
                policy.into_object()
            }
            v1::Object::Slo(slo) => {
                let mut slo = slo.clone();
                self.inline_slo(&mut slo.spec, &root)?;
                slo.into_object()
            }
            other => Object::V1(other.clone()),
        })
    }

    /// Resolves the notification targets and then the conditions of an alert
    /// policy, reporting failures below `at`.
    fn inline_alert_policy(&mut self, spec: &mut AlertPolicySpec, at: &FieldPath) -> Resolved<()> {
        let spec_path = at.field("spec");

        if self.config.is_enabled(Relation::AlertPolicyNotificationTargets) {
            let list = spec_path.field("notificationTargets");
            for (i, slot) in spec.notification_targets.iter_mut().enumerate() {
                self.resolve(slot, &list.index(i))?;
            }
        }

        if self.config.is_enabled(Relation::AlertPolicyConditions) {
            let list = spec_path.field("conditions");
            for (i, slot) in spec.conditions.iter_mut().enumerate() {
                self.resolve(slot, &list.index(i))?;
            }
        }

        Ok(())
    }

    fn inline_slo(&mut self, spec: &mut SloSpec, at: &FieldPath) -> Resolved<()> {
        let spec_path = at.field("spec");

        if self.config.is_enabled(Relation::SloAlertPolicies) {
            let list = spec_path.field("alertPolicies");
            for (i, slot) in spec.alert_policies.iter_mut().enumerate() {
                let entry = list.index(i);
                self.resolve(slot, &entry)?;
                if let Slot::Inline(policy) = slot {
                    self.inline_alert_policy(&mut policy.spec, &entry)?;
                }
            }
        }

        if self.config.is_enabled(Relation::SloIndicator) {
            if let Some(slot) = spec.indicator.as_mut() {
                self.resolve(slot, &spec_path)?;
            }
            let list = spec_path.field("objectives");
            for (i, objective) in spec.objectives.iter_mut().enumerate() {
                if let Some(slot) = objective.indicator.as_mut() {
                    self.resolve(slot, &list.index(i))?;
                }
            }
        }

        Ok(())
    }

    /// Turns a reference slot into an inline copy of the object it names.
    ///
    /// `at` is the path of the object holding the slot's fields; the reported
    /// failure path appends the reference field name to it.
    fn resolve<E: Embedded>(&mut self, slot: &mut Slot<E>, at: &FieldPath) -> Resolved<()> {
        let Slot::Reference(name) = slot else {
            return Ok(());
        };

        let expected = <E::Standalone as Cataloged>::OBJECT_TYPE;
        let field_path = at.field(E::REFERENCE_FIELD);
        let Some((index, target)) = self.catalog.lookup::<E::Standalone>(name) else {
            return Err(ReferenceNotFound::new(expected, field_path, name.as_str()));
        };

        debug!(
            kind = %expected,
            name = %name,
            path = %field_path,
            "inlined reference"
        );
        self.consumed.insert(index);
        *slot = Slot::Inline(E::embed(target));
        Ok(())
    }
}
