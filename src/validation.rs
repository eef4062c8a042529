//! Structural checks on decoded objects.
//!
//! These are not run by the inliner or the exporter; callers invoke
//! [`validate`] when they want malformed documents rejected up front.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{OpenSloError, Result};
use crate::resolution::{FieldPath, Slot};
use crate::types::{Kind, Object};
use crate::v1::{self, AlertPolicySpec, Metadata, SloSpec};

const INDICATOR_PLACEMENT: &str = "'indicator' or 'indicatorRef' fields must either be defined \
     on the 'spec' level (standard SLOs) or on the 'spec.objectives[*]' level (composite SLOs)";

/// RFC 1123 label: lowercase alphanumerics and '-', at most 63 characters,
/// starting and ending with an alphanumeric.
static DNS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]{0,61}[a-z0-9])?$").expect("valid DNS label pattern")
});

/// Validates every object, returning the first violation found.
pub fn validate(objects: &[Object]) -> Result<()> {
    objects.iter().try_for_each(validate_object)
}

pub fn validate_object(object: &Object) -> Result<()> {
    let fail = |message: String| OpenSloError::Validation {
        object: object.identity(),
        message,
    };

    check_name(object.name(), &FieldPath::root().field("metadata").field("name")).map_err(fail)?;

    let Object::V1(object) = object else {
        return Ok(());
    };
    let checked = match object {
        v1::Object::Slo(slo) => check_slo(&slo.spec),
        v1::Object::AlertPolicy(policy) => check_alert_policy(&policy.spec, &FieldPath::root()),
        _ => Ok(()),
    };
    checked.map_err(fail)
}

/// Whether `name` is an RFC 1123 DNS label.
pub fn is_dns_label(name: &str) -> bool {
    DNS_LABEL_RE.is_match(name)
}

fn check_name(name: &str, at: &FieldPath) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err(format!("{at}: property is required but was empty"));
    }
    if !is_dns_label(name) {
        return Err(format!(
            "{at}: '{name}' must be a lowercase RFC 1123 DNS label of at most 63 characters"
        ));
    }
    Ok(())
}

fn check_kind(actual: Kind, expected: Kind, at: &FieldPath) -> std::result::Result<(), String> {
    if actual != expected {
        return Err(format!("{at}: should be equal to '{expected}', got '{actual}'"));
    }
    Ok(())
}

fn check_inline_metadata(metadata: &Metadata, at: &FieldPath) -> std::result::Result<(), String> {
    check_name(&metadata.name, &at.field("metadata").field("name"))
}

fn check_slo(spec: &SloSpec) -> std::result::Result<(), String> {
    let spec_path = FieldPath::root().field("spec");

    match (spec.indicator.is_some(), spec.has_composite_objectives()) {
        (false, false) => {
            return Err(format!("spec: {INDICATOR_PLACEMENT}, but none were provided"))
        }
        (true, true) => return Err(format!("spec: {INDICATOR_PLACEMENT}, but not both")),
        _ => {}
    }

    if let Some(Slot::Inline(indicator)) = &spec.indicator {
        check_inline_metadata(&indicator.metadata, &spec_path.field("indicator"))?;
    }
    for (i, objective) in spec.objectives.iter().enumerate() {
        if let Some(Slot::Inline(indicator)) = &objective.indicator {
            let at = spec_path.field("objectives").index(i).field("indicator");
            check_inline_metadata(&indicator.metadata, &at)?;
        }
    }

    for (i, slot) in spec.alert_policies.iter().enumerate() {
        if let Slot::Inline(policy) = slot {
            let at = spec_path.field("alertPolicies").index(i);
            check_kind(policy.kind, Kind::AlertPolicy, &at.field("kind"))?;
            check_inline_metadata(&policy.metadata, &at)?;
            check_alert_policy(&policy.spec, &at)?;
        }
    }
    Ok(())
}

fn check_alert_policy(spec: &AlertPolicySpec, at: &FieldPath) -> std::result::Result<(), String> {
    let spec_path = at.field("spec");

    for (i, slot) in spec.conditions.iter().enumerate() {
        if let Slot::Inline(condition) = slot {
            let at = spec_path.field("conditions").index(i);
            check_kind(condition.kind, Kind::AlertCondition, &at.field("kind"))?;
            check_inline_metadata(&condition.metadata, &at)?;
        }
    }
    for (i, slot) in spec.notification_targets.iter().enumerate() {
        if let Slot::Inline(target) = slot {
            let at = spec_path.field("notificationTargets").index(i);
            check_kind(target.kind, Kind::AlertNotificationTarget, &at.field("kind"))?;
            check_inline_metadata(&target.metadata, &at)?;
        }
    }
    Ok(())
}
