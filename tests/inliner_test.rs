use openslo_sdk::catalog::Cataloged;
use openslo_sdk::config::{ReferenceConfig, Relation};
use openslo_sdk::errors::OpenSloError;
use openslo_sdk::resolution::{inline_objects, ReferenceInliner, Slot};
use openslo_sdk::types::{Kind, Object};
use openslo_sdk::v1::*;

fn sli(name: &str) -> Sli {
    Sli::new(
        Metadata::named(name),
        SliSpec {
            description: "request latency".to_string(),
            threshold_metric: Some(MetricSpec {
                metric_source: MetricSource {
                    source_type: "Prometheus".to_string(),
                    ..Default::default()
                },
            }),
            ratio_metric: None,
        },
    )
}

fn target(name: &str) -> AlertNotificationTarget {
    AlertNotificationTarget::new(
        Metadata::named(name),
        AlertNotificationTargetSpec {
            description: String::new(),
            target: "email".to_string(),
        },
    )
}

fn condition(name: &str) -> AlertCondition {
    AlertCondition::new(
        Metadata::named(name),
        AlertConditionSpec {
            description: String::new(),
            severity: "page".to_string(),
            condition: ConditionRule {
                kind: "burnrate".to_string(),
                operator: Some(Operator::Gte),
                threshold: 2.0,
                lookback_window: DurationShorthand("1h".to_string()),
                alert_after: DurationShorthand("5m".to_string()),
            },
        },
    )
}

fn policy(name: &str, targets: &[&str], conditions: &[&str]) -> AlertPolicy {
    AlertPolicy::new(
        Metadata::named(name),
        AlertPolicySpec {
            alert_when_breaching: true,
            notification_targets: targets.iter().map(|t| Slot::reference(*t)).collect(),
            conditions: conditions.iter().map(|c| Slot::reference(*c)).collect(),
            ..Default::default()
        },
    )
}

fn slo(name: &str, indicator: &str, policies: &[&str]) -> Slo {
    Slo::new(
        Metadata::named(name),
        SloSpec {
            service: "web".to_string(),
            indicator: Some(Slot::reference(indicator)),
            objectives: vec![Objective {
                target: Some(0.99),
                ..Default::default()
            }],
            alert_policies: policies.iter().map(|p| Slot::reference(*p)).collect(),
            ..Default::default()
        },
    )
}

/// A full reference graph: SLO -> SLI, SLO -> policy -> {2 targets, condition}.
fn reference_graph() -> Vec<Object> {
    vec![
        slo("my-slo", "my-sli", &["my-policy"]).into(),
        sli("my-sli").into(),
        policy("my-policy", &["devs-slack", "devs-email"], &["burn-rate"]).into(),
        target("devs-slack").into(),
        target("devs-email").into(),
        condition("burn-rate").into(),
    ]
}

fn inline_error_path(result: openslo_sdk::errors::Result<Vec<Object>>) -> String {
    match result {
        Err(OpenSloError::Inline { source, .. }) => source.field_path.to_string(),
        other => panic!("expected an inline error, got {:?}", other),
    }
}

#[test]
fn test_inline_full_graph() {
    let objects = reference_graph();
    let inlined = ReferenceInliner::new(&objects).inline().unwrap();
    assert_eq!(inlined.len(), objects.len());

    let slo = Slo::from_object(&inlined[0]).unwrap();
    let indicator = slo.spec.indicator.as_ref().unwrap().as_inline().unwrap();
    assert_eq!(indicator.metadata.name, "my-sli");
    assert_eq!(indicator.spec, sli("my-sli").spec);

    let policy = slo.spec.alert_policies[0].as_inline().unwrap();
    assert_eq!(policy.kind, Kind::AlertPolicy);
    assert_eq!(policy.metadata.name, "my-policy");
    let target_names: Vec<&str> = policy
        .spec
        .notification_targets
        .iter()
        .map(|t| {
            assert!(t.is_inline());
            t.target_name()
        })
        .collect();
    assert_eq!(target_names, vec!["devs-slack", "devs-email"]);
    assert!(policy.spec.conditions[0].is_inline());

    // The standalone policy is inlined on its own as well.
    let standalone = AlertPolicy::from_object(&inlined[2]).unwrap();
    assert!(standalone.spec.notification_targets.iter().all(Slot::is_inline));
    assert!(standalone.spec.conditions.iter().all(Slot::is_inline));
}

#[test]
fn test_inline_does_not_modify_input() {
    let objects = reference_graph();
    let before = objects.clone();
    ReferenceInliner::new(&objects).inline().unwrap();
    assert_eq!(objects, before);
}

#[test]
fn test_remove_referenced_objects() {
    let objects = reference_graph();
    let inlined = ReferenceInliner::new(&objects)
        .remove_referenced_objects()
        .inline()
        .unwrap();
    assert_eq!(inlined.len(), 1);
    assert_eq!(inlined[0].name(), "my-slo");
}

#[test]
fn test_inline_with_report_lists_consumed_inputs() {
    let mut objects = reference_graph();
    objects.push(Service::new(Metadata::named("web"), ServiceSpec::default()).into());

    let result = ReferenceInliner::new(&objects).inline_with_report().unwrap();
    let consumed: Vec<usize> = result.consumed.into_iter().collect();
    assert_eq!(consumed, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.objects.len(), objects.len());
}

#[test]
fn test_missing_nested_target_reports_full_path() {
    let objects: Vec<Object> = vec![
        slo("my-slo", "my-sli", &["my-policy"]).into(),
        sli("my-sli").into(),
        policy("my-policy", &["devs-slack", "devs-email-notification"], &[]).into(),
        target("devs-slack").into(),
    ];

    let err = ReferenceInliner::new(&objects).inline().unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to inline v1.SLO 'my-slo': v1.AlertNotificationTarget 'devs-email-notification' \
         referenced at 'spec.alertPolicies[0].spec.notificationTargets[1].targetRef' does not exist"
    );
}

/// An SLO embedding its alert policy instead of referencing it.
fn slo_with_embedded_policy(targets: &[&str], conditions: &[&str]) -> Slo {
    let embedded = policy("my-policy", targets, conditions);
    let mut slo = slo("my-slo", "my-sli", &[]);
    slo.spec.alert_policies = vec![Slot::Inline(SloAlertPolicyInline {
        kind: Kind::AlertPolicy,
        metadata: embedded.metadata,
        spec: embedded.spec,
    })];
    slo
}

#[test]
fn test_missing_target_in_embedded_policy_reports_full_path() {
    let objects: Vec<Object> = vec![
        slo_with_embedded_policy(&["devs-slack", "devs-email-notification"], &[]).into(),
        sli("my-sli").into(),
        target("devs-slack").into(),
    ];

    let err = ReferenceInliner::new(&objects).inline().unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to inline v1.SLO 'my-slo': v1.AlertNotificationTarget 'devs-email-notification' \
         referenced at 'spec.alertPolicies[0].spec.notificationTargets[1].targetRef' does not exist"
    );
}

#[test]
fn test_embedded_policy_references_are_inlined_and_consumed() {
    let objects: Vec<Object> = vec![
        slo_with_embedded_policy(&["devs-slack", "devs-email"], &["burn-rate"]).into(),
        sli("my-sli").into(),
        target("devs-slack").into(),
        target("devs-email").into(),
        condition("burn-rate").into(),
    ];

    let result = ReferenceInliner::new(&objects).inline_with_report().unwrap();
    let consumed: Vec<usize> = result.consumed.into_iter().collect();
    assert_eq!(consumed, vec![1, 2, 3, 4]);

    let slo = Slo::from_object(&result.objects[0]).unwrap();
    let policy = slo.spec.alert_policies[0].as_inline().unwrap();
    assert_eq!(policy.metadata.name, "my-policy");
    assert!(policy.spec.notification_targets.iter().all(|t| t.is_inline()));
    assert_eq!(policy.spec.notification_targets[1].target_name(), "devs-email");
    assert!(policy.spec.conditions[0].is_inline());
}

#[test]
fn test_missing_target_on_standalone_policy() {
    let objects: Vec<Object> = vec![
        policy("my-policy", &["devs-slack", "devs-email"], &[]).into(),
        target("devs-slack").into(),
    ];

    let err = ReferenceInliner::new(&objects).inline().unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to inline v1.AlertPolicy 'my-policy': v1.AlertNotificationTarget 'devs-email' \
         referenced at 'spec.notificationTargets[1].targetRef' does not exist"
    );
}

#[test]
fn test_missing_alert_policy_path() {
    let objects: Vec<Object> = vec![
        slo("my-slo", "my-sli", &["missing-policy"]).into(),
        sli("my-sli").into(),
    ];
    let path = inline_error_path(ReferenceInliner::new(&objects).inline());
    assert_eq!(path, "spec.alertPolicies[0].alertPolicyRef");
}

#[test]
fn test_missing_condition_path() {
    let objects: Vec<Object> = vec![policy("my-policy", &[], &["missing"]).into()];
    let path = inline_error_path(ReferenceInliner::new(&objects).inline());
    assert_eq!(path, "spec.conditions[0].conditionRef");
}

#[test]
fn test_targets_resolved_before_conditions() {
    let objects: Vec<Object> = vec![policy("my-policy", &["no-target"], &["no-condition"]).into()];
    let path = inline_error_path(ReferenceInliner::new(&objects).inline());
    assert_eq!(path, "spec.notificationTargets[0].targetRef");
}

#[test]
fn test_alert_policies_resolved_before_indicator() {
    let objects: Vec<Object> = vec![slo("my-slo", "no-sli", &["no-policy"]).into()];
    let path = inline_error_path(ReferenceInliner::new(&objects).inline());
    assert_eq!(path, "spec.alertPolicies[0].alertPolicyRef");
}

#[test]
fn test_missing_indicator_path() {
    let objects: Vec<Object> = vec![slo("my-slo", "no-sli", &[]).into()];
    let err = ReferenceInliner::new(&objects).inline().unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to inline v1.SLO 'my-slo': v1.SLI 'no-sli' referenced at 'spec.indicatorRef' does not exist"
    );
}

#[test]
fn test_composite_objective_indicators() {
    let mut composite = slo("composite", "unused", &[]);
    composite.spec.indicator = None;
    composite.spec.objectives = vec![
        Objective {
            indicator: Some(Slot::reference("latency")),
            composite_weight: Some(1.0),
            ..Default::default()
        },
        Objective {
            indicator: Some(Slot::reference("errors")),
            composite_weight: Some(2.0),
            ..Default::default()
        },
    ];

    let objects: Vec<Object> = vec![composite.clone().into(), sli("latency").into()];
    let path = inline_error_path(ReferenceInliner::new(&objects).inline());
    assert_eq!(path, "spec.objectives[1].indicatorRef");

    let objects: Vec<Object> = vec![composite.into(), sli("latency").into(), sli("errors").into()];
    let inlined = ReferenceInliner::new(&objects)
        .remove_referenced_objects()
        .inline()
        .unwrap();
    assert_eq!(inlined.len(), 1);
    let slo = Slo::from_object(&inlined[0]).unwrap();
    for objective in &slo.spec.objectives {
        assert!(objective.indicator.as_ref().unwrap().is_inline());
    }
}

#[test]
fn test_wrong_kind_reference_is_not_found() {
    // A Service shares the name the SLO's indicator points to.
    let objects: Vec<Object> = vec![
        slo("my-slo", "web", &[]).into(),
        Service::new(Metadata::named("web"), ServiceSpec::default()).into(),
    ];
    let err = ReferenceInliner::new(&objects).inline().unwrap_err();
    match err {
        OpenSloError::Inline { object, source } => {
            assert_eq!(object.name, "my-slo");
            assert_eq!(source.expected, Sli::OBJECT_TYPE);
            assert_eq!(source.name, "web");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_first_match_wins() {
    let mut first = sli("my-sli");
    first.spec.description = "first".to_string();
    let mut second = sli("my-sli");
    second.spec.description = "second".to_string();

    let objects: Vec<Object> = vec![slo("my-slo", "my-sli", &[]).into(), first.into(), second.into()];
    let result = ReferenceInliner::new(&objects).inline_with_report().unwrap();

    let slo = Slo::from_object(&result.objects[0]).unwrap();
    let indicator = slo.spec.indicator.as_ref().unwrap().as_inline().unwrap();
    assert_eq!(indicator.spec.description, "first");
    assert!(result.consumed.contains(&1));
    assert!(!result.consumed.contains(&2));
}

#[test]
fn test_disabled_alert_policies_tolerate_dangling_reference() {
    let objects: Vec<Object> = vec![
        slo("my-slo", "my-sli", &["does-not-exist"]).into(),
        sli("my-sli").into(),
    ];
    let config = ReferenceConfig::default().with(Relation::SloAlertPolicies, false);

    let inlined = ReferenceInliner::new(&objects)
        .with_config(config)
        .remove_referenced_objects()
        .inline()
        .unwrap();

    assert_eq!(inlined.len(), 1);
    let slo = Slo::from_object(&inlined[0]).unwrap();
    assert!(slo.spec.indicator.as_ref().unwrap().is_inline());
    assert_eq!(slo.spec.alert_policies[0].as_reference(), Some("does-not-exist"));
}

#[test]
fn test_disabled_conditions_leave_slots_untouched() {
    let objects = reference_graph();
    let config = ReferenceConfig::default().with(Relation::AlertPolicyConditions, false);

    let result = ReferenceInliner::new(&objects)
        .with_config(config)
        .inline_with_report()
        .unwrap();

    let slo = Slo::from_object(&result.objects[0]).unwrap();
    let policy = slo.spec.alert_policies[0].as_inline().unwrap();
    assert!(policy.spec.notification_targets.iter().all(Slot::is_inline));
    assert_eq!(policy.spec.conditions[0].as_reference(), Some("burn-rate"));
    assert!(!result.consumed.contains(&5));
}

#[test]
fn test_nothing_enabled_is_identity() {
    let objects = reference_graph();
    let result = ReferenceInliner::new(&objects)
        .with_config(ReferenceConfig::none())
        .remove_referenced_objects()
        .inline_with_report()
        .unwrap();
    assert!(result.consumed.is_empty());
    assert_eq!(result.objects, objects);
}

#[test]
fn test_inline_is_repeatable_and_idempotent() {
    let objects = reference_graph();
    let inliner = ReferenceInliner::new(&objects);
    let first = inliner.inline().unwrap();
    let second = inliner.inline().unwrap();
    assert_eq!(first, second);

    let again = ReferenceInliner::new(&first).inline().unwrap();
    assert_eq!(again, first);
}

#[test]
fn test_distinct_universe() {
    let objects: Vec<Object> = vec![slo("my-slo", "my-sli", &["my-policy"]).into()];
    let universe: Vec<Object> = vec![
        sli("my-sli").into(),
        policy("my-policy", &["devs-slack"], &[]).into(),
        target("devs-slack").into(),
    ];

    let result = ReferenceInliner::new(&objects)
        .with_universe(&universe)
        .remove_referenced_objects()
        .inline_with_report()
        .unwrap();

    assert!(result.consumed.is_empty());
    assert_eq!(result.objects.len(), 1);
    let slo = Slo::from_object(&result.objects[0]).unwrap();
    assert!(slo.spec.indicator.as_ref().unwrap().is_inline());
    assert!(slo.spec.alert_policies[0].is_inline());
}

#[test]
fn test_distinct_universe_maps_consumed_to_inputs() {
    let objects: Vec<Object> = vec![slo("my-slo", "my-sli", &[]).into(), sli("my-sli").into()];
    let universe: Vec<Object> = vec![target("unrelated").into(), sli("my-sli").into()];

    let result = ReferenceInliner::new(&objects)
        .with_universe(&universe)
        .remove_referenced_objects()
        .inline_with_report()
        .unwrap();

    assert_eq!(result.consumed.into_iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(result.objects.len(), 1);
}

#[test]
fn test_generic_objects_pass_through() {
    let generic = Object::from_value(serde_json::json!({
        "apiVersion": "openslo/v1alpha",
        "kind": "SLO",
        "metadata": {"name": "legacy"},
        "spec": {"indicatorRef": "nowhere"}
    }))
    .unwrap();
    assert!(generic.reference_resolution().is_none());

    let objects = vec![generic.clone()];
    let inlined = inline_objects(&objects, ReferenceConfig::default()).unwrap();
    assert_eq!(inlined, vec![generic]);
}

#[test]
fn test_end_to_end_slo_and_sli() {
    let objects: Vec<Object> = vec![slo("my-slo", "my-sli", &[]).into(), sli("my-sli").into()];

    let kept = ReferenceInliner::new(&objects).inline().unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[1], objects[1]);

    let compacted = ReferenceInliner::new(&objects)
        .remove_referenced_objects()
        .inline()
        .unwrap();
    assert_eq!(compacted.len(), 1);
    assert_eq!(compacted[0], kept[0]);

    let slo = Slo::from_object(&compacted[0]).unwrap();
    let indicator = slo.spec.indicator.as_ref().unwrap().as_inline().unwrap();
    assert_eq!(indicator.metadata, Metadata::named("my-sli"));
}
